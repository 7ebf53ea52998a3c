//! Color types.
//!
//! [`Rgb`] is the floating-point triple stored in color tables, [`Rgba`] is the
//! 8-bit pixel written into framebuffers.

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red, the default selection stroke.
    pub const RED: Self = Self::new(255, 0, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Parse an opaque color from `#RRGGBB` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the text is not six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Floating-point RGB triple, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Create a new RGB triple.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from a `[r, g, b]` array.
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to an opaque 8-bit pixel.
    ///
    /// Channels are scaled by 255, rounded to nearest and clamped, the same
    /// way an 8-bit clamped pixel array stores them.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let quantize = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba::rgb(quantize(self.r), quantize(self.g), quantize(self.b))
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.to_rgba()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        let arr = color.to_array();
        assert_eq!(arr, [10, 20, 30, 40]);
        assert_eq!(Rgba::from_array(arr), color);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#FF0000").unwrap(), Rgba::RED);
        assert_eq!(Rgba::from_hex("00ff00").unwrap(), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::from_hex(" #0000FF ").unwrap(), Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Rgba::from_hex("#FFF").is_err());
        assert!(Rgba::from_hex("#GG0000").is_err());
        assert!(Rgba::from_hex("").is_err());
        assert!(Rgba::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_rgb_to_rgba_rounds() {
        // 0.267004 * 255 = 68.09, 0.004874 * 255 = 1.24, 0.329415 * 255 = 84.0
        let first_viridis = Rgb::new(0.267_004, 0.004_874, 0.329_415);
        assert_eq!(first_viridis.to_rgba(), Rgba::rgb(68, 1, 84));

        // 0.5 * 255 = 127.5 rounds up
        assert_eq!(Rgb::new(0.5, 0.5, 0.5).to_rgba(), Rgba::rgb(128, 128, 128));
    }

    #[test]
    fn test_rgb_to_rgba_clamps() {
        let out_of_range = Rgb::new(-0.5, 1.5, 1.0);
        assert_eq!(Rgba::from(out_of_range), Rgba::rgb(0, 255, 255));
    }

    #[test]
    fn test_rgb_array_roundtrip() {
        let rgb = Rgb::from_array([0.1, 0.2, 0.3]);
        assert_eq!(rgb.to_array(), [0.1, 0.2, 0.3]);
    }
}
