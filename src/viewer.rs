//! Interactive viewer session.
//!
//! [`HeatmapViewer`] owns the loaded grid, its viewport and the selection, and
//! turns control-surface commands and pointer input into state changes. It
//! never draws on its own: every mutation reports a [`Redraw`] and the host
//! calls [`HeatmapViewer::render`] when it is ready to paint.
//!
//! Loading is split in two so the fetch can run anywhere:
//!
//! ```rust,ignore
//! let ticket = viewer.begin_load("noise");
//! let result = fetch_somewhere(ticket.source());
//! viewer.complete_load(ticket, result)?;
//! ```
//!
//! Starting a load supersedes every earlier ticket; a superseded result is
//! dropped when it arrives.

use crate::config::ViewerConfig;
use crate::control::Command;
use crate::error::Result;
use crate::export::{to_viewport_pixels, ExportArtifact, ExportFormat, ExportRequest, RegionExporter};
use crate::framebuffer::Framebuffer;
use crate::grid::DataGrid;
use crate::render::HeatmapRenderer;
use crate::selection::{NormalizedRegion, Selection, SelectionRegion};
use crate::sink::{ExportSink, RenderSink};
use crate::source::GridSource;
use crate::viewport::{CanvasGeometry, Direction, Viewport};

/// Default zoom change per zoom-in/zoom-out.
pub const DEFAULT_ZOOM_STEP: f32 = 0.5;

/// What a host has to repaint after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Redraw {
    /// Nothing visible changed.
    #[default]
    None,
    /// Only the selection overlay changed.
    Selection,
    /// The heatmap window changed.
    Full,
}

impl Redraw {
    /// The larger of two repaint requests.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }

    /// Whether anything needs repainting.
    #[must_use]
    pub fn is_needed(self) -> bool {
        self != Self::None
    }
}

/// Handle for one in-flight load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    source: String,
}

impl LoadTicket {
    /// Name of the dataset being loaded.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Load generation this ticket belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// A grid together with the name it was loaded under and its viewport.
#[derive(Debug, Clone)]
pub struct LoadedGrid {
    source: String,
    grid: DataGrid,
    viewport: Viewport,
}

impl LoadedGrid {
    fn new(source: String, grid: DataGrid) -> Self {
        let viewport = Viewport::new(grid.width(), grid.height());
        Self {
            source,
            grid,
            viewport,
        }
    }

    /// Dataset name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The grid.
    #[must_use]
    pub fn grid(&self) -> &DataGrid {
        &self.grid
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

/// Heatmap viewer session.
#[derive(Debug, Clone)]
pub struct HeatmapViewer {
    loaded: Option<LoadedGrid>,
    selection: Selection,
    renderer: HeatmapRenderer,
    exporter: RegionExporter,
    zoom_step: f32,
    generation: u64,
    pending: Option<u64>,
}

impl Default for HeatmapViewer {
    fn default() -> Self {
        Self::new(HeatmapRenderer::default())
    }
}

impl HeatmapViewer {
    /// Empty viewer drawing with `renderer`.
    #[must_use]
    pub fn new(renderer: HeatmapRenderer) -> Self {
        Self {
            loaded: None,
            selection: Selection::new(),
            exporter: RegionExporter::new(renderer.clone()),
            renderer,
            zoom_step: DEFAULT_ZOOM_STEP,
            generation: 0,
            pending: None,
        }
    }

    /// Empty viewer set up from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or its palette
    /// cannot be loaded.
    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        let renderer =
            HeatmapRenderer::new(config.color_table()?).selection_color(config.selection_rgba()?);
        Ok(Self::new(renderer).with_zoom_step(config.zoom_step))
    }

    /// Set the zoom change per zoom-in/zoom-out.
    #[must_use]
    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.zoom_step = step;
        self
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Start loading `name`, superseding any load in flight.
    pub fn begin_load(&mut self, name: &str) -> LoadTicket {
        self.generation += 1;
        if let Some(previous) = self.pending.replace(self.generation) {
            tracing::debug!(superseded = previous, "load superseded");
        }
        tracing::info!(source = name, generation = self.generation, "loading grid");
        LoadTicket {
            generation: self.generation,
            source: name.to_string(),
        }
    }

    /// Finish the load `ticket` with `result`.
    ///
    /// A superseded ticket is ignored and yields [`Redraw::None`]. A
    /// successful load replaces the grid, resets the viewport to the full
    /// extent at zoom 1 and clears the selection. A failed load keeps the
    /// current grid.
    ///
    /// # Errors
    ///
    /// Returns the load error of the current ticket.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<DataGrid>) -> Result<Redraw> {
        if self.pending != Some(ticket.generation) {
            tracing::warn!(
                source = %ticket.source,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale load"
            );
            return Ok(Redraw::None);
        }
        self.pending = None;

        let grid = match result {
            Ok(grid) => grid,
            Err(e) => {
                tracing::warn!(source = %ticket.source, error = %e, "load failed");
                return Err(e);
            }
        };

        tracing::info!(
            source = %ticket.source,
            width = grid.width(),
            height = grid.height(),
            "grid loaded"
        );
        self.loaded = Some(LoadedGrid::new(ticket.source, grid));
        self.selection.clear();
        Ok(Redraw::Full)
    }

    /// Load `name` from `source` synchronously.
    ///
    /// # Errors
    ///
    /// Returns the source's error; the current grid is kept.
    pub fn load(&mut self, source: &dyn GridSource, name: &str) -> Result<Redraw> {
        let ticket = self.begin_load(name);
        let result = source.load(name);
        self.complete_load(ticket, result)
    }

    /// Whether a load has begun and not yet completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // ------------------------------------------------------------------------
    // Zoom and pan
    // ------------------------------------------------------------------------

    /// Set the zoom, clamped to `[1, 10]`.
    pub fn set_zoom(&mut self, zoom: f32) -> Redraw {
        let Some(loaded) = self.loaded.as_mut() else {
            return Redraw::None;
        };
        let before = loaded.viewport;
        loaded.viewport.set_zoom(zoom);
        if loaded.viewport == before {
            Redraw::None
        } else {
            Redraw::Full
        }
    }

    /// Increase the zoom by one step.
    pub fn zoom_in(&mut self) -> Redraw {
        self.set_zoom(self.zoom() + self.zoom_step)
    }

    /// Decrease the zoom by one step.
    pub fn zoom_out(&mut self) -> Redraw {
        self.set_zoom(self.zoom() - self.zoom_step)
    }

    /// Move the window one pan step.
    pub fn pan(&mut self, direction: Direction) -> Redraw {
        let Some(loaded) = self.loaded.as_mut() else {
            return Redraw::None;
        };
        let before = loaded.viewport;
        loaded.viewport.pan(direction);
        if loaded.viewport == before {
            Redraw::None
        } else {
            Redraw::Full
        }
    }

    /// Current zoom (1 when nothing is loaded).
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.loaded.as_ref().map_or(1.0, |l| l.viewport.zoom())
    }

    /// Status text such as `Zoom: 1.5x`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("Zoom: {:.1}x", self.zoom())
    }

    // ------------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------------

    fn pointer_to_cell(&self, x: f64, y: f64, canvas: CanvasGeometry) -> Option<(usize, usize)> {
        let viewport = &self.loaded.as_ref()?.viewport;
        Some(viewport.clamp_to_grid(viewport.canvas_to_data(x, y, canvas)))
    }

    /// Pointer pressed at canvas position `(x, y)`: start a new selection.
    pub fn pointer_down(&mut self, x: f64, y: f64, canvas: CanvasGeometry) -> Redraw {
        let Some((cx, cy)) = self.pointer_to_cell(x, y, canvas) else {
            return Redraw::None;
        };
        self.selection.start_drag(cx, cy);
        Redraw::Selection
    }

    /// Pointer moved to `(x, y)`: extend the selection while dragging.
    pub fn pointer_move(&mut self, x: f64, y: f64, canvas: CanvasGeometry) -> Redraw {
        if !self.selection.is_dragging() {
            return Redraw::None;
        }
        let Some((cx, cy)) = self.pointer_to_cell(x, y, canvas) else {
            return Redraw::None;
        };
        if self.selection.update_drag(cx, cy) {
            Redraw::Selection
        } else {
            Redraw::None
        }
    }

    /// Pointer released anywhere: end the drag, keeping the region.
    pub fn pointer_up(&mut self) -> Redraw {
        self.selection.end_drag();
        Redraw::None
    }

    /// Drop the selection, interrupting any drag.
    pub fn clear_selection(&mut self) -> Redraw {
        let had_region = self.selection.region().is_some();
        self.selection.clear();
        if had_region {
            Redraw::Selection
        } else {
            Redraw::None
        }
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    /// Export the selection, or `None` when there is nothing to export.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or encoding fails.
    pub fn export(&self, format: ExportFormat) -> Result<Option<ExportArtifact>> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Ok(None);
        };
        let request = ExportRequest {
            grid: &loaded.grid,
            viewport: &loaded.viewport,
            region: self.selection.normalized(),
            source: &loaded.source,
        };
        self.exporter.export(&request, format)
    }

    /// Export the selection into `sink`, returning the file name used.
    ///
    /// # Errors
    ///
    /// Returns an error if exporting or saving fails.
    pub fn export_to(&self, format: ExportFormat, sink: &mut dyn ExportSink) -> Result<Option<String>> {
        let Some(artifact) = self.export(format)? else {
            return Ok(None);
        };
        sink.save(&artifact.bytes, &artifact.filename)?;
        Ok(Some(artifact.filename))
    }

    /// Paint the current window and selection into `sink`.
    ///
    /// Returns `false` when nothing is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the sink fails.
    pub fn render(&self, sink: &mut dyn RenderSink) -> Result<bool> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Ok(false);
        };
        let frame = self.renderer.render_window(&loaded.grid, &loaded.viewport)?;
        let selection = self
            .selection
            .normalized()
            .map(|region| to_viewport_pixels(region, &loaded.viewport));
        sink.present(&frame, selection)?;
        Ok(true)
    }

    /// Window with the selection outline, as one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn snapshot(&self) -> Result<Option<Framebuffer>> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Ok(None);
        };
        self.renderer
            .snapshot(&loaded.grid, &loaded.viewport, self.selection.normalized())
            .map(Some)
    }

    // ------------------------------------------------------------------------
    // Control surface
    // ------------------------------------------------------------------------

    /// Run one control-surface command.
    ///
    /// `ChangeSource` loads from `source`; `Export` saves into `exports`.
    ///
    /// # Errors
    ///
    /// Returns load and export errors.
    pub fn apply(
        &mut self,
        command: &Command,
        source: &dyn GridSource,
        exports: &mut dyn ExportSink,
    ) -> Result<Redraw> {
        tracing::debug!(%command, "applying command");
        let redraw = match command {
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::Pan(direction) => self.pan(*direction),
            Command::ClearSelection => self.clear_selection(),
            Command::Export(format) => {
                self.export_to(*format, exports)?;
                Redraw::None
            }
            Command::ChangeSource(name) => self.load(source, name)?,
        };
        Ok(redraw)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Loaded grid, viewport and source name.
    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedGrid> {
        self.loaded.as_ref()
    }

    /// Loaded grid.
    #[must_use]
    pub fn grid(&self) -> Option<&DataGrid> {
        self.loaded.as_ref().map(LoadedGrid::grid)
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Option<&Viewport> {
        self.loaded.as_ref().map(LoadedGrid::viewport)
    }

    /// Name of the loaded dataset.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.loaded.as_ref().map(LoadedGrid::source)
    }

    /// Selection state.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected region as drawn.
    #[must_use]
    pub fn region(&self) -> Option<SelectionRegion> {
        self.selection.region()
    }

    /// Selected region with ordered corners.
    #[must_use]
    pub fn normalized_region(&self) -> Option<NormalizedRegion> {
        self.selection.normalized()
    }

    /// Renderer used for frames and PNG exports.
    #[must_use]
    pub fn renderer(&self) -> &HeatmapRenderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::selection::normalize;
    use crate::sink::{FramebufferSink, MemoryExportSink};
    use crate::source::MemorySource;

    fn ramp(width: usize, height: usize) -> DataGrid {
        let n = (width * height) as f32;
        let values = (0..width * height).map(|i| i as f32 / n).collect();
        DataGrid::from_values(values, width, height).unwrap()
    }

    fn loaded(width: usize, height: usize) -> HeatmapViewer {
        let mut viewer = HeatmapViewer::default();
        let ticket = viewer.begin_load("ramp");
        viewer.complete_load(ticket, Ok(ramp(width, height))).unwrap();
        viewer
    }

    fn canvas(width: usize, height: usize) -> CanvasGeometry {
        CanvasGeometry::new(width as f64, height as f64)
    }

    #[test]
    fn test_empty_viewer_is_inert() {
        let mut viewer = HeatmapViewer::default();
        assert_eq!(viewer.zoom_in(), Redraw::None);
        assert_eq!(viewer.pan(Direction::Right), Redraw::None);
        assert_eq!(viewer.pointer_down(1.0, 1.0, canvas(10, 10)), Redraw::None);
        assert_eq!(viewer.export(ExportFormat::Json).unwrap(), None);
        assert!(!viewer.render(&mut FramebufferSink::new()).unwrap());
        assert_eq!(viewer.snapshot().unwrap().map(|f| f.width()), None);
        assert_eq!(viewer.zoom_label(), "Zoom: 1.0x");
    }

    #[test]
    fn test_load_resets_viewport_and_selection() {
        let mut viewer = loaded(20, 10);
        viewer.zoom_in();
        viewer.pointer_down(1.0, 1.0, canvas(20, 10));
        assert!(viewer.region().is_some());

        let ticket = viewer.begin_load("other");
        assert!(viewer.is_loading());
        let redraw = viewer.complete_load(ticket, Ok(ramp(8, 8))).unwrap();

        assert_eq!(redraw, Redraw::Full);
        assert!(!viewer.is_loading());
        assert_eq!(viewer.source(), Some("other"));
        assert_eq!(viewer.region(), None);
        let vp = viewer.viewport().unwrap();
        assert!(vp.is_full_extent());
        assert!((vp.zoom() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_overlapping_loads_latest_wins() {
        let mut viewer = HeatmapViewer::default();
        let first = viewer.begin_load("first");
        let second = viewer.begin_load("second");

        // Second completes first, then the stale first arrives
        assert_eq!(viewer.complete_load(second, Ok(ramp(4, 4))).unwrap(), Redraw::Full);
        assert_eq!(viewer.complete_load(first, Ok(ramp(9, 9))).unwrap(), Redraw::None);

        assert_eq!(viewer.source(), Some("second"));
        assert_eq!(viewer.grid().map(DataGrid::width), Some(4));
    }

    #[test]
    fn test_overlapping_loads_in_order() {
        let mut viewer = HeatmapViewer::default();
        let first = viewer.begin_load("first");
        let second = viewer.begin_load("second");

        assert_eq!(viewer.complete_load(first, Ok(ramp(9, 9))).unwrap(), Redraw::None);
        assert!(viewer.is_loading());
        assert_eq!(viewer.grid(), None);
        viewer.complete_load(second, Ok(ramp(4, 4))).unwrap();
        assert_eq!(viewer.source(), Some("second"));
    }

    #[test]
    fn test_failed_load_keeps_grid() {
        let mut viewer = loaded(5, 5);
        viewer.pointer_down(0.0, 0.0, canvas(5, 5));

        let ticket = viewer.begin_load("broken");
        let result = viewer.complete_load(ticket, Err(Error::EmptyData));

        assert!(matches!(result, Err(Error::EmptyData)));
        assert_eq!(viewer.source(), Some("ramp"));
        assert!(viewer.region().is_some());
        assert!(!viewer.is_loading());
    }

    #[test]
    fn test_load_from_source() {
        let source = MemorySource::new().with_grid("logo", ramp(3, 2));
        let mut viewer = HeatmapViewer::default();
        assert_eq!(viewer.load(&source, "logo").unwrap(), Redraw::Full);
        assert!(matches!(viewer.load(&source, "nope"), Err(Error::UnknownSource(_))));
        assert_eq!(viewer.source(), Some("logo"));
    }

    #[test]
    fn test_zoom_steps_and_clamps() {
        let mut viewer = loaded(100, 100);
        assert_eq!(viewer.zoom_in(), Redraw::Full);
        assert_eq!(viewer.zoom_label(), "Zoom: 1.5x");

        assert_eq!(viewer.zoom_out(), Redraw::Full);
        assert_eq!(viewer.zoom_out(), Redraw::None);
        assert_eq!(viewer.zoom_label(), "Zoom: 1.0x");

        for _ in 0..30 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.zoom_label(), "Zoom: 10.0x");
        assert_eq!(viewer.zoom_in(), Redraw::None);
    }

    #[test]
    fn test_custom_zoom_step() {
        let mut viewer = loaded(100, 100).with_zoom_step(2.0);
        viewer.zoom_in();
        assert_eq!(viewer.zoom_label(), "Zoom: 3.0x");
    }

    #[test]
    fn test_pan_at_full_extent_is_noop() {
        let mut viewer = loaded(50, 50);
        for direction in Direction::ALL {
            assert_eq!(viewer.pan(direction), Redraw::None);
        }
        viewer.set_zoom(2.0);
        assert_eq!(viewer.pan(Direction::Right), Redraw::Full);
        assert_eq!(viewer.pan(Direction::Left), Redraw::Full);
        assert_eq!(viewer.pan(Direction::Left), Redraw::None);
    }

    #[test]
    fn test_drag_maps_through_viewport() {
        let mut viewer = loaded(100, 100);
        viewer.set_zoom(4.0);
        viewer.pan(Direction::Right);
        let vp = *viewer.viewport().unwrap();
        let geometry = canvas(100, 100);

        assert_eq!(viewer.pointer_down(0.0, 0.0, geometry), Redraw::Selection);
        assert_eq!(viewer.pointer_move(100.0, 100.0, geometry), Redraw::Selection);
        assert_eq!(viewer.pointer_move(100.0, 100.0, geometry), Redraw::None);
        assert_eq!(viewer.pointer_up(), Redraw::None);

        assert_eq!(
            viewer.normalized_region(),
            Some(normalize(vp.x_min(), vp.y_min(), vp.x_max(), vp.y_max()))
        );
    }

    #[test]
    fn test_pointer_clamps_to_grid() {
        let mut viewer = loaded(10, 10);
        let geometry = canvas(10, 10);
        viewer.pointer_down(-50.0, -50.0, geometry);
        viewer.pointer_move(500.0, 500.0, geometry);
        assert_eq!(viewer.normalized_region(), Some(normalize(0, 0, 9, 9)));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut viewer = loaded(10, 10);
        assert_eq!(viewer.pointer_move(3.0, 3.0, canvas(10, 10)), Redraw::None);
        assert_eq!(viewer.region(), None);
    }

    #[test]
    fn test_clear_interrupts_drag() {
        let mut viewer = loaded(10, 10);
        let geometry = canvas(10, 10);
        viewer.pointer_down(1.0, 1.0, geometry);
        assert_eq!(viewer.clear_selection(), Redraw::Selection);
        assert_eq!(viewer.pointer_move(5.0, 5.0, geometry), Redraw::None);
        assert_eq!(viewer.region(), None);
        assert_eq!(viewer.clear_selection(), Redraw::None);
    }

    #[test]
    fn test_zoom_keeps_selection() {
        let mut viewer = loaded(40, 40);
        let geometry = canvas(40, 40);
        viewer.pointer_down(2.0, 2.0, geometry);
        viewer.pointer_move(6.0, 6.0, geometry);
        viewer.pointer_up();
        viewer.zoom_in();
        assert_eq!(viewer.normalized_region(), Some(normalize(2, 2, 6, 6)));
    }

    #[test]
    fn test_render_reports_window_relative_selection() {
        let mut viewer = loaded(100, 100);
        viewer.set_zoom(2.0);
        viewer.pan(Direction::Right);
        let x_min = viewer.viewport().unwrap().x_min();
        let geometry = canvas(50, 50);
        viewer.pointer_down(10.0, 10.0, geometry);
        viewer.pointer_up();
        let region = viewer.normalized_region().unwrap();

        let mut sink = FramebufferSink::new();
        assert!(viewer.render(&mut sink).unwrap());

        assert_eq!(sink.frame().unwrap().width(), 50);
        let rect = sink.selection().unwrap();
        assert_eq!(rect.left, region.xs as i64 - x_min as i64);
        assert_eq!(rect.top, region.ys as i64);
    }

    #[test]
    fn test_export_dispatch() {
        let mut viewer = loaded(6, 6);
        let mut exports = MemoryExportSink::new();

        assert_eq!(viewer.export_to(ExportFormat::Json, &mut exports).unwrap(), None);
        assert!(exports.files().is_empty());

        // Canvas spanning x_max - x_min maps pixels to cells one to one
        let geometry = canvas(5, 5);
        viewer.pointer_down(4.0, 3.0, geometry);
        viewer.pointer_move(1.0, 1.0, geometry);
        viewer.pointer_up();

        let name = viewer.export_to(ExportFormat::Json, &mut exports).unwrap();
        assert_eq!(name.as_deref(), Some("heatmap_ramp_1_1_4_3.json"));
        let name = viewer.export_to(ExportFormat::Png, &mut exports).unwrap();
        assert_eq!(name.as_deref(), Some("heatmap_ramp_1_1_4_3.png"));
        assert_eq!(exports.files().len(), 2);
    }

    #[test]
    fn test_apply_commands() {
        let source = MemorySource::new()
            .with_grid("a", ramp(30, 30))
            .with_grid("b", ramp(10, 10));
        let mut exports = MemoryExportSink::new();
        let mut viewer = HeatmapViewer::default();

        let run = |viewer: &mut HeatmapViewer, exports: &mut MemoryExportSink, text: &str| {
            let command: Command = text.parse().unwrap();
            viewer.apply(&command, &source, exports)
        };

        assert_eq!(run(&mut viewer, &mut exports, "source a").unwrap(), Redraw::Full);
        assert_eq!(run(&mut viewer, &mut exports, "zoom-in").unwrap(), Redraw::Full);
        assert_eq!(run(&mut viewer, &mut exports, "move-down").unwrap(), Redraw::Full);
        assert_eq!(run(&mut viewer, &mut exports, "clear").unwrap(), Redraw::None);
        assert_eq!(run(&mut viewer, &mut exports, "export png").unwrap(), Redraw::None);
        assert!(exports.files().is_empty());
        assert_eq!(run(&mut viewer, &mut exports, "source b").unwrap(), Redraw::Full);
        assert_eq!(viewer.grid().map(DataGrid::width), Some(10));
        assert!(run(&mut viewer, &mut exports, "source c").is_err());
    }

    #[test]
    fn test_from_config() {
        let mut config = ViewerConfig::default();
        config.selection_color = "#00ff00".to_string();
        config.zoom_step = 1.0;
        let mut viewer = HeatmapViewer::from_config(&config).unwrap();
        let ticket = viewer.begin_load("x");
        viewer.complete_load(ticket, Ok(ramp(10, 10))).unwrap();
        viewer.zoom_in();
        assert_eq!(viewer.zoom_label(), "Zoom: 2.0x");

        config.zoom_step = -1.0;
        assert!(HeatmapViewer::from_config(&config).is_err());
    }

    #[test]
    fn test_redraw_merge() {
        assert_eq!(Redraw::None.merge(Redraw::Selection), Redraw::Selection);
        assert_eq!(Redraw::Full.merge(Redraw::Selection), Redraw::Full);
        assert!(!Redraw::None.is_needed());
    }
}
