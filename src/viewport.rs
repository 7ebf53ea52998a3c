//! The visible window into a [`DataGrid`](crate::grid::DataGrid).
//!
//! A [`Viewport`] owns inclusive bounds `x_min..=x_max`, `y_min..=y_max` and a
//! zoom factor in `[1, 10]`. Zooming anchors on the top-left corner and shifts
//! the window back inside the grid when it would overflow; panning moves the
//! window by a tenth of its horizontal span on either axis. Neither operation
//! ever changes the window size except through the zoom factor.
//!
//! All state transitions are pure: [`Viewport::with_zoom`] and
//! [`Viewport::panned`] return the new state and the caller decides when to
//! redraw.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Smallest zoom factor (full extent).
pub const MIN_ZOOM: f32 = 1.0;

/// Largest zoom factor.
pub const MAX_ZOOM: f32 = 10.0;

/// Pan step as a fraction of the horizontal span.
const PAN_DIVISOR: f64 = 10.0;

/// Round half toward positive infinity.
///
/// Pointer math can produce negative coordinates; this keeps `-2.5` at `-2`
/// so both sides of the origin round the same way.
#[inline]
pub(crate) fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Pan direction on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Lowercase name used by the control surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

/// Size of the rendering surface that pointer coordinates are relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    /// Visible width in pixels.
    pub width: f64,
    /// Visible height in pixels.
    pub height: f64,
}

impl CanvasGeometry {
    /// Create a canvas geometry.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl batuta_common::display::WithDimensions for CanvasGeometry {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = f64::from(width);
        self.height = f64::from(height);
    }
}

/// A point in data coordinates before clamping; may lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPoint {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

/// Visible sub-rectangle of a grid plus zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x_min: usize,
    x_max: usize,
    y_min: usize,
    y_max: usize,
    zoom: f32,
    grid_width: usize,
    grid_height: usize,
}

impl Viewport {
    /// Full-extent viewport over a `width` x `height` grid at zoom 1.
    ///
    /// Dimensions are floored at one cell.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            x_min: 0,
            x_max: width - 1,
            y_min: 0,
            y_max: height - 1,
            zoom: MIN_ZOOM,
            grid_width: width,
            grid_height: height,
        }
    }

    /// Reset to the full extent of a (possibly new) grid, zoom 1.
    pub fn reset(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Leftmost visible column.
    #[must_use]
    pub const fn x_min(&self) -> usize {
        self.x_min
    }

    /// Rightmost visible column (inclusive).
    #[must_use]
    pub const fn x_max(&self) -> usize {
        self.x_max
    }

    /// Top visible row.
    #[must_use]
    pub const fn y_min(&self) -> usize {
        self.y_min
    }

    /// Bottom visible row (inclusive).
    #[must_use]
    pub const fn y_max(&self) -> usize {
        self.y_max
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Width of the grid this viewport windows into.
    #[must_use]
    pub const fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Height of the grid this viewport windows into.
    #[must_use]
    pub const fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Number of visible columns.
    #[must_use]
    pub const fn window_width(&self) -> usize {
        self.x_max - self.x_min + 1
    }

    /// Number of visible rows.
    #[must_use]
    pub const fn window_height(&self) -> usize {
        self.y_max - self.y_min + 1
    }

    /// Whether the viewport shows the whole grid.
    #[must_use]
    pub const fn is_full_extent(&self) -> bool {
        self.x_min == 0
            && self.y_min == 0
            && self.x_max + 1 == self.grid_width
            && self.y_max + 1 == self.grid_height
    }

    /// State after setting the zoom factor to `zoom`.
    ///
    /// The factor is clamped to `[1, 10]`. The window keeps its top-left
    /// corner, takes `round(dim / zoom)` cells per axis, and is shifted back
    /// by the overflow if it would run past the last row or column.
    #[must_use]
    pub fn with_zoom(&self, zoom: f32) -> Self {
        let zoom = if zoom.is_nan() {
            MIN_ZOOM
        } else {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        };

        let (x_min, x_max) = Self::zoom_axis(self.x_min, self.grid_width, zoom);
        let (y_min, y_max) = Self::zoom_axis(self.y_min, self.grid_height, zoom);

        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            zoom,
            ..*self
        }
    }

    /// Resize one axis anchored at `min`, pulling it back inside `[0, dim-1]`.
    fn zoom_axis(min: usize, dim: usize, zoom: f32) -> (usize, usize) {
        let span = (round_half_up(dim as f64 / f64::from(zoom)).max(1) as usize).min(dim);
        let mut lo = min.min(dim - 1);
        let mut hi = lo + span - 1;
        if hi > dim - 1 {
            let overflow = hi - (dim - 1);
            lo -= overflow;
            hi -= overflow;
        }
        (lo, hi)
    }

    /// Set the zoom factor in place. See [`Viewport::with_zoom`].
    pub fn set_zoom(&mut self, zoom: f32) {
        *self = self.with_zoom(zoom);
        tracing::debug!(
            zoom = self.zoom,
            x_min = self.x_min,
            x_max = self.x_max,
            y_min = self.y_min,
            y_max = self.y_max,
            "viewport zoomed"
        );
    }

    /// Pan step: a tenth of the horizontal span, used for both axes.
    #[must_use]
    pub fn pan_step(&self) -> usize {
        round_half_up((self.x_max - self.x_min) as f64 / PAN_DIVISOR).max(0) as usize
    }

    /// State after panning one step in `direction`.
    ///
    /// The moving edge stops at the grid boundary and the opposite edge moves
    /// by the same amount, so the window size never changes.
    #[must_use]
    pub fn panned(&self, direction: Direction) -> Self {
        let delta = self.pan_step();
        let mut next = *self;

        match direction {
            Direction::Left => {
                let shift = delta.min(self.x_min);
                next.x_min -= shift;
                next.x_max -= shift;
            }
            Direction::Right => {
                let shift = delta.min(self.grid_width - 1 - self.x_max);
                next.x_min += shift;
                next.x_max += shift;
            }
            Direction::Up => {
                let shift = delta.min(self.y_min);
                next.y_min -= shift;
                next.y_max -= shift;
            }
            Direction::Down => {
                let shift = delta.min(self.grid_height - 1 - self.y_max);
                next.y_min += shift;
                next.y_max += shift;
            }
        }

        next
    }

    /// Pan in place. See [`Viewport::panned`].
    pub fn pan(&mut self, direction: Direction) {
        *self = self.panned(direction);
        tracing::debug!(
            %direction,
            x_min = self.x_min,
            y_min = self.y_min,
            "viewport panned"
        );
    }

    /// Map a canvas pixel to data coordinates using the current bounds.
    ///
    /// `x = round(x_min + (x_max - x_min) * canvas_x / canvas_width)`, and the
    /// same for `y`. The result is not clamped; pointers outside the canvas
    /// map outside the window. A zero-sized canvas axis maps to its minimum.
    #[must_use]
    pub fn canvas_to_data(&self, canvas_x: f64, canvas_y: f64, canvas: CanvasGeometry) -> DataPoint {
        let map = |pos: f64, extent: f64, min: usize, max: usize| {
            if extent <= 0.0 || !pos.is_finite() {
                return min as i64;
            }
            round_half_up(min as f64 + (max - min) as f64 * pos / extent)
        };

        DataPoint {
            x: map(canvas_x, canvas.width, self.x_min, self.x_max),
            y: map(canvas_y, canvas.height, self.y_min, self.y_max),
        }
    }

    /// Clamp a data point into the grid so it can be used as an index.
    #[must_use]
    pub fn clamp_to_grid(&self, point: DataPoint) -> (usize, usize) {
        let clamp = |v: i64, dim: usize| v.clamp(0, dim as i64 - 1) as usize;
        (
            clamp(point.x, self.grid_width),
            clamp(point.y, self.grid_height),
        )
    }

    /// Whether the data cell `(x, y)` is inside the visible window.
    #[must_use]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    /// Reachable state: any sequence of zooms and pans from full extent.
    fn reachable() -> impl Strategy<Value = Viewport> {
        (
            1usize..300,
            1usize..300,
            prop::collection::vec((1.0f32..=10.0, prop::collection::vec(direction(), 0..20)), 0..6),
        )
            .prop_map(|(w, h, steps)| {
                let mut vp = Viewport::new(w, h);
                for (zoom, pans) in steps {
                    vp = vp.with_zoom(zoom);
                    for dir in pans {
                        vp = vp.panned(dir);
                    }
                }
                vp
            })
    }

    fn assert_in_bounds(vp: &Viewport) -> std::result::Result<(), TestCaseError> {
        prop_assert!(vp.x_min() <= vp.x_max());
        prop_assert!(vp.y_min() <= vp.y_max());
        prop_assert!(vp.x_max() < vp.grid_width());
        prop_assert!(vp.y_max() < vp.grid_height());
        prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&vp.zoom()));
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Zoom never leaves the grid, from any reachable state and any input.
        #[test]
        fn prop_zoom_stays_in_bounds(vp in reachable(), zoom in -5.0f32..20.0) {
            let next = vp.with_zoom(zoom);
            assert_in_bounds(&next)?;
        }

        /// Window size follows round(dim / zoom) with a one-cell floor.
        #[test]
        fn prop_zoom_window_size(vp in reachable(), zoom in 1.0f32..=10.0) {
            let next = vp.with_zoom(zoom);
            let expected_w = round_half_up(vp.grid_width() as f64 / f64::from(zoom)).max(1) as usize;
            let expected_h = round_half_up(vp.grid_height() as f64 / f64::from(zoom)).max(1) as usize;
            prop_assert_eq!(next.window_width(), expected_w.min(vp.grid_width()));
            prop_assert_eq!(next.window_height(), expected_h.min(vp.grid_height()));
        }

        /// Pan preserves window size exactly and stays in bounds.
        #[test]
        fn prop_pan_preserves_window(vp in reachable(), dir in direction()) {
            let next = vp.panned(dir);
            prop_assert_eq!(next.x_max() - next.x_min(), vp.x_max() - vp.x_min());
            prop_assert_eq!(next.y_max() - next.y_min(), vp.y_max() - vp.y_min());
            assert_in_bounds(&next)?;
        }

        /// Canvas corners map onto the window corners.
        #[test]
        fn prop_canvas_corners_map_to_window(vp in reachable(), cw in 1.0f64..2000.0, ch in 1.0f64..2000.0) {
            let canvas = CanvasGeometry::new(cw, ch);
            let top_left = vp.canvas_to_data(0.0, 0.0, canvas);
            let bottom_right = vp.canvas_to_data(cw, ch, canvas);
            prop_assert_eq!(top_left, DataPoint { x: vp.x_min() as i64, y: vp.y_min() as i64 });
            prop_assert_eq!(bottom_right, DataPoint { x: vp.x_max() as i64, y: vp.y_max() as i64 });
        }
    }
}
