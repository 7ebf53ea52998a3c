//! Region extraction and export.
//!
//! A selected region is exported either as the JSON sub-grid it covers or as
//! a PNG snapshot of the rendered window, cropped to the region. Exporting
//! without a selection does nothing.

use crate::error::{Error, Result};
use crate::geometry::PixelRect;
use crate::grid::DataGrid;
use crate::output::PngEncoder;
use crate::render::HeatmapRenderer;
use crate::selection::NormalizedRegion;
use crate::viewport::Viewport;
use std::fmt;
use std::str::FromStr;

/// Output format chosen on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Sub-grid as a JSON 2D array.
    #[default]
    Json,
    /// Sub-image as PNG.
    Png,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Png => "png",
        }
    }

    /// MIME type of the exported bytes.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "png" => Ok(Self::Png),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Bytes ready to hand to an export sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name.
    pub filename: String,
    /// Format of `bytes`.
    pub format: ExportFormat,
    /// Encoded payload.
    pub bytes: Vec<u8>,
}

/// Copy the cells of `region` (inclusive on both ends) into a new grid.
///
/// # Errors
///
/// Returns [`Error::RegionOutOfBounds`] if the region reaches past the grid.
pub fn extract_subgrid(grid: &DataGrid, region: NormalizedRegion) -> Result<DataGrid> {
    let NormalizedRegion { xs, ys, xe, ye } = region;
    if xs > xe || ys > ye || xe >= grid.width() || ye >= grid.height() {
        return Err(Error::RegionOutOfBounds {
            xs,
            ys,
            xe,
            ye,
            width: grid.width(),
            height: grid.height(),
        });
    }

    let rows = (ys..=ye)
        .filter_map(|y| grid.row(y))
        .map(|row| row[xs..=xe].to_vec())
        .collect();
    DataGrid::from_rows(rows)
}

/// Translate a data-space region into window-relative pixels.
///
/// Each corner has the window origin subtracted; the result may extend past
/// the window when the selection does.
#[must_use]
pub fn to_viewport_pixels(region: NormalizedRegion, viewport: &Viewport) -> PixelRect {
    let x0 = viewport.x_min() as i64;
    let y0 = viewport.y_min() as i64;
    PixelRect::new(
        region.xs as i64 - x0,
        region.ys as i64 - y0,
        region.xe as i64 - x0,
        region.ye as i64 - y0,
    )
}

/// `heatmap_<source>_<xs>_<ys>_<xe>_<ye>.<ext>`
#[must_use]
pub fn export_filename(source: &str, region: NormalizedRegion, format: ExportFormat) -> String {
    format!(
        "heatmap_{source}_{}_{}_{}_{}.{}",
        region.xs,
        region.ys,
        region.xe,
        region.ye,
        format.extension()
    )
}

/// Everything an export reads, captured at the moment of the request.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Currently loaded grid.
    pub grid: &'a DataGrid,
    /// Current viewport over `grid`.
    pub viewport: &'a Viewport,
    /// Selected region, if any.
    pub region: Option<NormalizedRegion>,
    /// Name of the data source, used in the file name.
    pub source: &'a str,
}

/// Produces export artifacts from selections.
#[derive(Debug, Clone, Default)]
pub struct RegionExporter {
    renderer: HeatmapRenderer,
}

impl RegionExporter {
    /// Create an exporter that rasterizes PNG snapshots with `renderer`.
    #[must_use]
    pub fn new(renderer: HeatmapRenderer) -> Self {
        Self { renderer }
    }

    /// Export the selected region in `format`.
    ///
    /// Returns `Ok(None)` when nothing is selected, or, for PNG, when the
    /// selection lies entirely outside the visible window.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction, rendering or encoding fails.
    pub fn export(
        &self,
        request: &ExportRequest<'_>,
        format: ExportFormat,
    ) -> Result<Option<ExportArtifact>> {
        let Some(region) = request.region else {
            return Ok(None);
        };

        let subgrid = extract_subgrid(request.grid, region)?;
        let stats = subgrid.stats();

        let bytes = match format {
            ExportFormat::Json => Some(subgrid.to_json()?.into_bytes()),
            ExportFormat::Png => self.snapshot_png(request, region)?,
        };
        let Some(bytes) = bytes else {
            tracing::debug!(?region, "selection outside visible window, nothing to export");
            return Ok(None);
        };

        let filename = export_filename(request.source, region, format);
        tracing::info!(
            %filename,
            %format,
            width = subgrid.width(),
            height = subgrid.height(),
            min = stats.min,
            max = stats.max,
            mean = stats.mean,
            "exported region"
        );

        Ok(Some(ExportArtifact {
            filename,
            format,
            bytes,
        }))
    }

    /// Render the window, crop it to the visible part of `region`, encode PNG.
    fn snapshot_png(
        &self,
        request: &ExportRequest<'_>,
        region: NormalizedRegion,
    ) -> Result<Option<Vec<u8>>> {
        let frame = self.renderer.render_window(request.grid, request.viewport)?;
        let window = PixelRect::of_size(frame.width(), frame.height());
        let Some(visible) = to_viewport_pixels(region, request.viewport).intersect(&window) else {
            return Ok(None);
        };

        let cropped = frame.crop(
            visible.left as u32,
            visible.top as u32,
            visible.width() as u32,
            visible.height() as u32,
        )?;
        PngEncoder::to_bytes(&cropped).map(Some)
    }
}
