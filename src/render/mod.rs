//! Rasterization of the visible heatmap window and the selection overlay.
//!
//! The heatmap is drawn one pixel per data cell, so a frame is exactly
//! `window_width` x `window_height` pixels and selection rectangles translate
//! to pixels by subtracting the window origin. Scaling to the display surface
//! is the render sink's business.

mod primitives;

pub use primitives::stroke_rect;

use crate::color::Rgba;
use crate::colormap::ColorTable;
use crate::error::{Error, Result};
use crate::export::to_viewport_pixels;
use crate::framebuffer::Framebuffer;
use crate::grid::DataGrid;
use crate::selection::NormalizedRegion;
use crate::viewport::Viewport;

/// Renders grid windows through a color table.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    table: ColorTable,
    selection_color: Rgba,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self::new(ColorTable::viridis())
    }
}

impl HeatmapRenderer {
    /// Create a renderer using `table`, with a red selection stroke.
    #[must_use]
    pub fn new(table: ColorTable) -> Self {
        Self {
            table,
            selection_color: Rgba::RED,
        }
    }

    /// Set the selection stroke color.
    #[must_use]
    pub fn selection_color(mut self, color: Rgba) -> Self {
        self.selection_color = color;
        self
    }

    /// The color table in use.
    #[must_use]
    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Render the visible window of `grid` to an opaque RGBA8 frame.
    ///
    /// # Errors
    ///
    /// Returns an error if `viewport` was not built for a grid of this size.
    pub fn render_window(&self, grid: &DataGrid, viewport: &Viewport) -> Result<Framebuffer> {
        if viewport.grid_width() != grid.width() || viewport.grid_height() != grid.height() {
            return Err(Error::InvalidDimensions {
                width: viewport.grid_width() as u32,
                height: viewport.grid_height() as u32,
            });
        }

        let mut fb = Framebuffer::new(
            viewport.window_width() as u32,
            viewport.window_height() as u32,
        )?;

        for (out_y, data_y) in (viewport.y_min()..=viewport.y_max()).enumerate() {
            let Some(values) = grid.row(data_y) else {
                break;
            };
            let visible = &values[viewport.x_min()..=viewport.x_max()];
            if let Some(row) = fb.row_mut(out_y as u32) {
                for (chunk, &value) in row.chunks_exact_mut(4).zip(visible) {
                    chunk.copy_from_slice(&self.table.pixel_of(value).to_array());
                }
            }
        }

        Ok(fb)
    }

    /// Render the selection outline on a transparent window-sized overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay cannot be allocated.
    pub fn render_selection(
        &self,
        viewport: &Viewport,
        region: Option<NormalizedRegion>,
    ) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(
            viewport.window_width() as u32,
            viewport.window_height() as u32,
        )?;

        if let Some(region) = region {
            stroke_rect(&mut fb, to_viewport_pixels(region, viewport), self.selection_color);
        }

        Ok(fb)
    }

    /// Heatmap window with the selection outline composited on top.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn snapshot(
        &self,
        grid: &DataGrid,
        viewport: &Viewport,
        region: Option<NormalizedRegion>,
    ) -> Result<Framebuffer> {
        let mut frame = self.render_window(grid, viewport)?;
        if region.is_some() {
            let overlay = self.render_selection(viewport, region)?;
            frame.composite(&overlay)?;
        }
        Ok(frame)
    }
}
