//! WebAssembly bindings for trueno-heatmap.
//!
//! The browser host owns the canvas, the fetch and the download; this module
//! owns the viewer state.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmHeatmapViewer } from 'trueno-heatmap';
//!
//! await init();
//! const viewer = new WasmHeatmapViewer();
//!
//! const ticket = viewer.begin_load('noise');
//! const text = await (await fetch('sample-heatmaps/noise.json')).text();
//! if (viewer.complete_load(ticket, text) !== 0) {
//!     const rgba = viewer.frame_rgba();
//!     const image = new ImageData(new Uint8ClampedArray(rgba),
//!                                 viewer.frame_width(), viewer.frame_height());
//!     ctx.putImageData(image, 0, 0);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::color::Rgba;
use crate::colormap::ColorTable;
use crate::control::Command;
use crate::error::{Error, Result as HeatmapResult};
use crate::export::{ExportArtifact, ExportFormat};
use crate::grid::DataGrid;
use crate::render::HeatmapRenderer;
use crate::sink::{FramebufferSink, MemoryExportSink};
use crate::source::MemorySource;
use crate::viewer::{HeatmapViewer, LoadTicket, Redraw};
use crate::viewport::{CanvasGeometry, Direction};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `0` nothing, `1` selection overlay, `2` full repaint.
const fn redraw_code(redraw: Redraw) -> u8 {
    match redraw {
        Redraw::None => 0,
        Redraw::Selection => 1,
        Redraw::Full => 2,
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("trueno-heatmap initialized"));
}

// ============================================================================
// Export Result
// ============================================================================

/// An exported file for the host to download.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmExport {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl From<ExportArtifact> for WasmExport {
    fn from(artifact: ExportArtifact) -> Self {
        Self {
            mime_type: artifact.format.mime_type().to_string(),
            filename: artifact.filename,
            bytes: artifact.bytes,
        }
    }
}

#[wasm_bindgen]
impl WasmExport {
    /// Suggested download name.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// MIME type for the download blob.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// File contents.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

// ============================================================================
// Viewer
// ============================================================================

/// Browser-facing heatmap viewer.
#[wasm_bindgen]
pub struct WasmHeatmapViewer {
    viewer: HeatmapViewer,
    pending: Option<LoadTicket>,
    frame: FramebufferSink,
}

impl Default for WasmHeatmapViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmHeatmapViewer {
    /// Empty viewer with the viridis table and a red selection stroke.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            viewer: HeatmapViewer::default(),
            pending: None,
            frame: FramebufferSink::new(),
        }
    }

    /// Viewer with a custom color table (JSON array of `[r, g, b]` floats)
    /// and selection color (`#rrggbb`).
    #[wasm_bindgen]
    pub fn with_palette(palette_json: &str, selection_color: &str) -> Result<WasmHeatmapViewer, JsValue> {
        let table = ColorTable::from_json(palette_json).map_err(js_err)?;
        let color = Rgba::from_hex(selection_color).map_err(js_err)?;
        Ok(Self {
            viewer: HeatmapViewer::new(HeatmapRenderer::new(table).selection_color(color)),
            pending: None,
            frame: FramebufferSink::new(),
        })
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Start loading `name`; returns the ticket to pass to `complete_load`.
    #[wasm_bindgen]
    pub fn begin_load(&mut self, name: &str) -> u32 {
        let ticket = self.viewer.begin_load(name);
        let id = ticket.generation() as u32;
        self.pending = Some(ticket);
        id
    }

    /// Finish load `ticket` with the fetched JSON text.
    ///
    /// Returns the redraw code; a superseded ticket returns `0`.
    #[wasm_bindgen]
    pub fn complete_load(&mut self, ticket: u32, json: &str) -> Result<u8, JsValue> {
        self.finish_load(ticket, json)
            .map(redraw_code)
            .map_err(js_err)
    }

    /// Name of the loaded dataset.
    #[wasm_bindgen(getter)]
    pub fn source(&self) -> Option<String> {
        self.viewer.source().map(str::to_string)
    }

    // ------------------------------------------------------------------------
    // Control surface
    // ------------------------------------------------------------------------

    /// Run a text command such as `zoom-in` or `move-left`.
    ///
    /// `source` and `export` need the host and are rejected without touching
    /// the viewer; use `begin_load` and `export`.
    #[wasm_bindgen]
    pub fn command(&mut self, text: &str) -> Result<u8, JsValue> {
        self.run_command(text).map(redraw_code).map_err(js_err)
    }

    /// Zoom in one step.
    #[wasm_bindgen]
    pub fn zoom_in(&mut self) -> Result<u8, JsValue> {
        let redraw = self.viewer.zoom_in();
        self.repaint(redraw).map(redraw_code).map_err(js_err)
    }

    /// Zoom out one step.
    #[wasm_bindgen]
    pub fn zoom_out(&mut self) -> Result<u8, JsValue> {
        let redraw = self.viewer.zoom_out();
        self.repaint(redraw).map(redraw_code).map_err(js_err)
    }

    /// Pan toward `up`, `down`, `left` or `right`.
    #[wasm_bindgen]
    pub fn pan(&mut self, direction: &str) -> Result<u8, JsValue> {
        let direction: Direction = direction.parse().map_err(js_err)?;
        let redraw = self.viewer.pan(direction);
        self.repaint(redraw).map(redraw_code).map_err(js_err)
    }

    /// Drop the selection.
    #[wasm_bindgen]
    pub fn clear_selection(&mut self) -> Result<u8, JsValue> {
        let redraw = self.viewer.clear_selection();
        self.repaint(redraw).map(redraw_code).map_err(js_err)
    }

    /// Status text such as `Zoom: 1.5x`.
    #[wasm_bindgen]
    pub fn zoom_label(&self) -> String {
        self.viewer.zoom_label()
    }

    // ------------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------------

    /// Pointer pressed at `(x, y)` on a `width` x `height` canvas.
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<u8, JsValue> {
        let redraw = self
            .viewer
            .pointer_down(x, y, CanvasGeometry::new(width, height));
        self.repaint(redraw).map(redraw_code).map_err(js_err)
    }

    /// Pointer moved to `(x, y)` on a `width` x `height` canvas.
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<u8, JsValue> {
        let redraw = self
            .viewer
            .pointer_move(x, y, CanvasGeometry::new(width, height));
        self.repaint(redraw).map(redraw_code).map_err(js_err)
    }

    /// Pointer released anywhere on the page.
    #[wasm_bindgen]
    pub fn pointer_up(&mut self) -> u8 {
        redraw_code(self.viewer.pointer_up())
    }

    // ------------------------------------------------------------------------
    // Frame output
    // ------------------------------------------------------------------------

    /// Width of the last rendered frame.
    #[wasm_bindgen]
    pub fn frame_width(&self) -> u32 {
        self.frame.frame().map_or(0, |f| f.width())
    }

    /// Height of the last rendered frame.
    #[wasm_bindgen]
    pub fn frame_height(&self) -> u32 {
        self.frame.frame().map_or(0, |f| f.height())
    }

    /// Heatmap pixels of the last frame as packed RGBA8.
    #[wasm_bindgen]
    pub fn frame_rgba(&self) -> Vec<u8> {
        self.frame
            .frame()
            .map(|f| f.to_compact_pixels())
            .unwrap_or_default()
    }

    /// Selection rectangle `[left, top, right, bottom]` in frame pixels,
    /// empty when nothing is selected.
    #[wasm_bindgen]
    pub fn selection_rect(&self) -> Vec<i32> {
        self.frame.selection().map_or_else(Vec::new, |r| {
            vec![r.left as i32, r.top as i32, r.right as i32, r.bottom as i32]
        })
    }

    /// Heatmap with the selection outline drawn in, as packed RGBA8.
    #[wasm_bindgen]
    pub fn snapshot_rgba(&self) -> Result<Vec<u8>, JsValue> {
        let snapshot = self.viewer.snapshot().map_err(js_err)?;
        Ok(snapshot.map(|f| f.to_compact_pixels()).unwrap_or_default())
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    /// Export the selection as `json` or `png`; `undefined` without one.
    #[wasm_bindgen]
    pub fn export(&self, format: &str) -> Result<Option<WasmExport>, JsValue> {
        self.export_selection(format).map_err(js_err)
    }
}

impl WasmHeatmapViewer {
    fn finish_load(&mut self, ticket: u32, json: &str) -> HeatmapResult<Redraw> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|t| t.generation() as u32 == ticket);
        if !current {
            return Ok(Redraw::None);
        }
        let Some(ticket) = self.pending.take() else {
            return Ok(Redraw::None);
        };
        let redraw = self.viewer.complete_load(ticket, DataGrid::from_json(json))?;
        self.repaint(redraw)
    }

    fn run_command(&mut self, text: &str) -> HeatmapResult<Redraw> {
        let command: Command = text.parse()?;
        if matches!(command, Command::ChangeSource(_) | Command::Export(_)) {
            return Err(Error::UnknownCommand(text.trim().to_string()));
        }
        let redraw = self
            .viewer
            .apply(&command, &MemorySource::new(), &mut MemoryExportSink::new())?;
        self.repaint(redraw)
    }

    fn export_selection(&self, format: &str) -> HeatmapResult<Option<WasmExport>> {
        let format: ExportFormat = format.parse()?;
        Ok(self.viewer.export(format)?.map(WasmExport::from))
    }

    fn repaint(&mut self, redraw: Redraw) -> HeatmapResult<Redraw> {
        if redraw.is_needed() {
            self.viewer.render(&mut self.frame)?;
        }
        Ok(redraw)
    }
}

// ============================================================================
// Tests
// ============================================================================
