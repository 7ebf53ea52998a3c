//! RGBA8 pixel buffer the heatmap window and selection overlay are rendered into.
//!
//! Rows are padded to a 64-byte stride; [`Framebuffer::to_compact_pixels`]
//! strips the padding for encoders and hosts that expect packed rows.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Row stride alignment in bytes (16 RGBA pixels).
const ROW_ALIGNMENT: usize = 64;

/// Row-padded RGBA framebuffer. New buffers are fully transparent.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// RGBA bytes, `stride` bytes per row.
    pixels: Vec<u8>,
    stride: usize,
}

impl Framebuffer {
    /// Create a transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_heatmap::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(40, 25).unwrap();
    /// assert_eq!(fb.width(), 40);
    /// assert_eq!(fb.height(), 25);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let stride = (width as usize * 4).next_multiple_of(ROW_ALIGNMENT);
        Ok(Self {
            width,
            height,
            pixels: vec![0; stride * height as usize],
            stride,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row width in bytes, including padding.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * 4
    }

    /// Visible bytes of row `y`, without padding.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        (y < self.height).then(|| {
            let start = self.offset(0, y);
            &self.pixels[start..start + self.width as usize * 4]
        })
    }

    /// Mutable visible bytes of row `y`.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = self.offset(0, y);
        let end = start + self.width as usize * 4;
        Some(&mut self.pixels[start..end])
    }

    /// Fill the whole buffer with `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.fill_rect(0, 0, self.width, self.height, color);
    }

    /// Fill a `w` x `h` block at `(x, y)`, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        let rgba = color.to_array();
        for row in y..y_end {
            let start = self.offset(x, row);
            let end = self.offset(x_end, row);
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let px = &self.pixels[i..i + 4];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Overwrite `(x, y)`; ignored outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.pixels[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Alpha-blend `color` over `(x, y)` with the "over" operator.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let Some(dst) = self.get_pixel(x, y) else {
            return;
        };

        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(dst.a) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let mix = |s: u8, d: u8| {
            let v = (f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        self.set_pixel(
            x,
            y,
            Rgba::new(
                mix(color.r, dst.r),
                mix(color.g, dst.g),
                mix(color.b, dst.b),
                (out_a * 255.0).round() as u8,
            ),
        );
    }

    /// Composite `overlay` over this buffer.
    ///
    /// Transparent overlay pixels are skipped and opaque ones copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffers differ in size.
    pub fn composite(&mut self, overlay: &Framebuffer) -> Result<()> {
        if self.width != overlay.width || self.height != overlay.height {
            return Err(Error::InvalidDimensions {
                width: overlay.width,
                height: overlay.height,
            });
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let Some(color) = overlay.get_pixel(x, y) else {
                    continue;
                };
                match color.a {
                    0 => {}
                    255 => self.set_pixel(x, y, color),
                    _ => self.blend_pixel(x, y, color),
                }
            }
        }
        Ok(())
    }

    /// Copy the `width` x `height` block at `(x, y)` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is empty or does not fit.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Framebuffer> {
        let fits = x.checked_add(width).is_some_and(|r| r <= self.width)
            && y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits {
            return Err(Error::InvalidDimensions { width, height });
        }

        let mut out = Framebuffer::new(width, height)?;
        let span = width as usize * 4;
        for row in 0..height {
            let src = self.offset(x, y + row);
            let dst = out.offset(0, row);
            out.pixels[dst..dst + span].copy_from_slice(&self.pixels[src..src + span]);
        }
        Ok(out)
    }

    /// Pixels as tightly packed RGBA rows, as PNG and `ImageData` expect.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        (0..self.height)
            .filter_map(|y| self.row(y))
            .flatten()
            .copied()
            .collect()
    }
}
