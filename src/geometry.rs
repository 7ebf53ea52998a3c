//! Pixel-space rectangles.
//!
//! Selection rectangles are translated into window-relative pixels before they
//! are drawn or cropped. They may extend past the window on any side, so
//! corners are signed.

/// Inclusive rectangle in window-relative pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left column.
    pub left: i64,
    /// Top row.
    pub top: i64,
    /// Right column (inclusive).
    pub right: i64,
    /// Bottom row (inclusive).
    pub bottom: i64,
}

impl PixelRect {
    /// Create a rectangle from inclusive corners.
    #[must_use]
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle covering a `width` x `height` surface.
    #[must_use]
    pub const fn of_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i64 - 1, height as i64 - 1)
    }

    /// Number of columns covered (0 if empty).
    #[must_use]
    pub const fn width(&self) -> u64 {
        if self.right < self.left {
            0
        } else {
            (self.right - self.left + 1) as u64
        }
    }

    /// Number of rows covered (0 if empty).
    #[must_use]
    pub const fn height(&self) -> u64 {
        if self.bottom < self.top {
            0
        } else {
            (self.bottom - self.top + 1) as u64
        }
    }

    /// Whether the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.right < self.left || self.bottom < self.top
    }

    /// Overlap with `other`, or `None` if they do not touch.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let clipped = Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Whether pixel `(x, y)` lies inside.
    #[must_use]
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_inclusive() {
        let rect = PixelRect::new(2, 3, 2, 3);
        assert_eq!(rect.width(), 1);
        assert_eq!(rect.height(), 1);
        assert!(!rect.is_empty());

        let rect = PixelRect::new(-2, -1, 5, 4);
        assert_eq!(rect.width(), 8);
        assert_eq!(rect.height(), 6);
    }

    #[test]
    fn test_empty() {
        let rect = PixelRect::new(5, 0, 4, 3);
        assert!(rect.is_empty());
        assert_eq!(rect.width(), 0);
    }

    #[test]
    fn test_of_size() {
        assert_eq!(PixelRect::of_size(10, 4), PixelRect::new(0, 0, 9, 3));
    }

    #[test]
    fn test_intersect() {
        let window = PixelRect::of_size(10, 10);
        let sel = PixelRect::new(-5, 8, 3, 20);
        assert_eq!(sel.intersect(&window), Some(PixelRect::new(0, 8, 3, 9)));

        let outside = PixelRect::new(11, 0, 15, 5);
        assert_eq!(outside.intersect(&window), None);
    }

    #[test]
    fn test_contains() {
        let rect = PixelRect::new(-1, -1, 1, 1);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(-1, 1));
        assert!(!rect.contains(2, 0));
    }
}
