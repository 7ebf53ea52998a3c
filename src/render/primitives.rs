//! Primitive rendering functions.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::PixelRect;

/// Fill the part of an inclusive span that lies on the framebuffer.
fn fill_clipped(fb: &mut Framebuffer, rect: PixelRect, color: Rgba) {
    let bounds = PixelRect::of_size(fb.width(), fb.height());
    if let Some(visible) = rect.intersect(&bounds) {
        fb.fill_rect(
            visible.left as u32,
            visible.top as u32,
            visible.width() as u32,
            visible.height() as u32,
            color,
        );
    }
}

/// Draw a one-pixel outline along the edges of `rect`.
///
/// Edges that fall outside the framebuffer are skipped; edges that cross it
/// are clipped. A single-pixel rectangle draws one pixel.
pub fn stroke_rect(fb: &mut Framebuffer, rect: PixelRect, color: Rgba) {
    if rect.is_empty() {
        return;
    }

    let PixelRect {
        left,
        top,
        right,
        bottom,
    } = rect;

    // Top edge
    fill_clipped(fb, PixelRect::new(left, top, right, top), color);
    // Bottom edge
    fill_clipped(fb, PixelRect::new(left, bottom, right, bottom), color);
    // Left edge
    fill_clipped(fb, PixelRect::new(left, top, left, bottom), color);
    // Right edge
    fill_clipped(fb, PixelRect::new(right, top, right, bottom), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut fb = Framebuffer::new(10, 10).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);

        stroke_rect(&mut fb, PixelRect::new(2, 2, 6, 5), Rgba::RED);

        assert_eq!(fb.get_pixel(2, 2), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(6, 2), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(2, 5), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(6, 5), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(4, 2), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(2, 4), Some(Rgba::RED));
        // Interior untouched
        assert_eq!(fb.get_pixel(4, 4), Some(Rgba::WHITE));
        // Outside untouched
        assert_eq!(fb.get_pixel(7, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_stroke_single_pixel() {
        let mut fb = Framebuffer::new(4, 4).expect("framebuffer creation should succeed");
        stroke_rect(&mut fb, PixelRect::new(1, 1, 1, 1), Rgba::RED);
        assert_eq!(fb.get_pixel(1, 1), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(0, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(fb.get_pixel(2, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_stroke_clips_partially_visible_rect() {
        let mut fb = Framebuffer::new(10, 10).expect("framebuffer creation should succeed");
        stroke_rect(&mut fb, PixelRect::new(-5, 3, 4, 1000), Rgba::RED);

        // Top and right edges visible, left and bottom off-surface
        assert_eq!(fb.get_pixel(0, 3), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(4, 9), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(0, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_stroke_fully_outside_is_noop() {
        let mut fb = Framebuffer::new(10, 10).expect("framebuffer creation should succeed");
        stroke_rect(&mut fb, PixelRect::new(20, 20, 30, 30), Rgba::RED);
        stroke_rect(&mut fb, PixelRect::new(5, 5, 4, 4), Rgba::RED);
        assert!(fb.to_compact_pixels().iter().all(|&b| b == 0));
    }
}
