//! Rectangular region selection driven by pointer drags.
//!
//! The drag lifecycle is `Idle -> Dragging -> Idle`. The region survives the
//! end of a drag and is only dropped by [`Selection::clear`], a new drag, or a
//! data reload. Every mutation replaces the [`SelectionRegion`] snapshot
//! wholesale, so renderers and exporters always read a consistent copy.

/// A drawn rectangle in data coordinates.
///
/// `(x1, y1)` is where the drag started and `(x2, y2)` where it is now (or
/// ended). The corners are not ordered; see [`SelectionRegion::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRegion {
    /// Drag-start column.
    pub x1: usize,
    /// Drag-start row.
    pub y1: usize,
    /// Current column.
    pub x2: usize,
    /// Current row.
    pub y2: usize,
}

/// A rectangle with ordered corners, `xs <= xe` and `ys <= ye`, all inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedRegion {
    /// Left column.
    pub xs: usize,
    /// Top row.
    pub ys: usize,
    /// Right column.
    pub xe: usize,
    /// Bottom row.
    pub ye: usize,
}

impl SelectionRegion {
    /// Create a region from two corners.
    #[must_use]
    pub const fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Zero-area region at a single point.
    #[must_use]
    pub const fn point(x: usize, y: usize) -> Self {
        Self::new(x, y, x, y)
    }

    /// Order the corners upper-left / lower-right.
    #[must_use]
    pub fn normalize(self) -> NormalizedRegion {
        normalize(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Order two arbitrary corners into a [`NormalizedRegion`].
#[must_use]
pub fn normalize(x1: usize, y1: usize, x2: usize, y2: usize) -> NormalizedRegion {
    NormalizedRegion {
        xs: x1.min(x2),
        ys: y1.min(y2),
        xe: x1.max(x2),
        ye: y1.max(y2),
    }
}

impl NormalizedRegion {
    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.xe - self.xs + 1
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.ye - self.ys + 1
    }

    /// The full extent of a `width` x `height` grid.
    #[must_use]
    pub const fn full(width: usize, height: usize) -> Self {
        Self {
            xs: 0,
            ys: 0,
            xe: width.saturating_sub(1),
            ye: height.saturating_sub(1),
        }
    }
}

impl From<NormalizedRegion> for SelectionRegion {
    fn from(region: NormalizedRegion) -> Self {
        Self::new(region.xs, region.ys, region.xe, region.ye)
    }
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Pointer is down and the region follows it.
    Dragging,
}

/// Selection state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    region: Option<SelectionRegion>,
    state: DragState,
}

impl Selection {
    /// Empty, idle selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at `(x, y)`, replacing any previous region.
    pub fn start_drag(&mut self, x: usize, y: usize) {
        self.region = Some(SelectionRegion::point(x, y));
        self.state = DragState::Dragging;
        tracing::debug!(x, y, "selection drag started");
    }

    /// Move the drag end to `(x, y)`.
    ///
    /// Ignored unless a drag is in progress. Returns whether the region changed.
    pub fn update_drag(&mut self, x: usize, y: usize) -> bool {
        if self.state != DragState::Dragging {
            return false;
        }
        match self.region {
            Some(region) if region.x2 == x && region.y2 == y => false,
            Some(region) => {
                self.region = Some(SelectionRegion {
                    x2: x,
                    y2: y,
                    ..region
                });
                true
            }
            None => false,
        }
    }

    /// Finish the drag; the region stays as drawn.
    pub fn end_drag(&mut self) {
        if self.state == DragState::Dragging {
            tracing::debug!(region = ?self.region, "selection drag ended");
        }
        self.state = DragState::Idle;
    }

    /// Drop the region and force the idle state.
    pub fn clear(&mut self) {
        self.region = None;
        self.state = DragState::Idle;
    }

    /// Current drag state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Snapshot of the current region.
    #[must_use]
    pub const fn region(&self) -> Option<SelectionRegion> {
        self.region
    }

    /// Snapshot of the current region with ordered corners.
    #[must_use]
    pub fn normalized(&self) -> Option<NormalizedRegion> {
        self.region.map(SelectionRegion::normalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ordered() {
        assert_eq!(
            normalize(1, 2, 3, 4),
            NormalizedRegion {
                xs: 1,
                ys: 2,
                xe: 3,
                ye: 4
            }
        );
    }

    #[test]
    fn test_normalize_reversed() {
        assert_eq!(
            normalize(8, 7, 6, 5),
            NormalizedRegion {
                xs: 6,
                ys: 5,
                xe: 8,
                ye: 7
            }
        );
    }

    #[test]
    fn test_normalized_dimensions() {
        let region = SelectionRegion::new(4, 9, 1, 2).normalize();
        assert_eq!(region.width(), 4);
        assert_eq!(region.height(), 8);
        assert_eq!(SelectionRegion::point(3, 3).normalize().width(), 1);
    }

    #[test]
    fn test_full_region() {
        let full = NormalizedRegion::full(5, 3);
        assert_eq!((full.xs, full.ys, full.xe, full.ye), (0, 0, 4, 2));
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut sel = Selection::new();
        assert_eq!(sel.state(), DragState::Idle);
        assert_eq!(sel.region(), None);

        sel.start_drag(5, 6);
        assert!(sel.is_dragging());
        assert_eq!(sel.region(), Some(SelectionRegion::point(5, 6)));

        assert!(sel.update_drag(2, 9));
        assert!(!sel.update_drag(2, 9));
        assert_eq!(sel.region(), Some(SelectionRegion::new(5, 6, 2, 9)));

        sel.end_drag();
        assert_eq!(sel.state(), DragState::Idle);
        assert_eq!(sel.region(), Some(SelectionRegion::new(5, 6, 2, 9)));
        assert_eq!(
            sel.normalized(),
            Some(NormalizedRegion {
                xs: 2,
                ys: 6,
                xe: 5,
                ye: 9
            })
        );
    }

    #[test]
    fn test_update_ignored_when_idle() {
        let mut sel = Selection::new();
        assert!(!sel.update_drag(1, 1));
        assert_eq!(sel.region(), None);

        sel.start_drag(0, 0);
        sel.end_drag();
        assert!(!sel.update_drag(7, 7));
        assert_eq!(sel.region(), Some(SelectionRegion::point(0, 0)));
    }

    #[test]
    fn test_clear_interrupts_drag() {
        let mut sel = Selection::new();
        sel.start_drag(1, 1);
        sel.update_drag(4, 4);
        sel.clear();
        assert_eq!(sel.state(), DragState::Idle);
        assert_eq!(sel.region(), None);
        assert!(!sel.update_drag(5, 5));
    }

    #[test]
    fn test_new_drag_replaces_region() {
        let mut sel = Selection::new();
        sel.start_drag(1, 1);
        sel.update_drag(9, 9);
        sel.end_drag();

        sel.start_drag(3, 3);
        assert_eq!(sel.region(), Some(SelectionRegion::point(3, 3)));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut sel = Selection::new();
        sel.start_drag(1, 1);
        let before = sel.region();
        sel.update_drag(2, 2);
        assert_eq!(before, Some(SelectionRegion::point(1, 1)));
    }

    #[test]
    fn test_end_drag_when_idle_is_noop() {
        let mut sel = Selection::new();
        sel.end_drag();
        assert_eq!(sel, Selection::new());
    }
}
