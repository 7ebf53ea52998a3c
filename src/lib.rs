//! # Trueno-Heatmap
//!
//! Interactive heatmap viewer engine: bounded zoom, pan, rectangular region
//! selection and export of the selected region.
//!
//! A rectangular grid of normalized scalars (0–1) is shown through a
//! [`viewport::Viewport`] window, colored through a 100-entry viridis
//! [`colormap::ColorTable`]. Pointer drags select a region in data
//! coordinates, and the region is exported either as the JSON sub-grid or as
//! a PNG snapshot of the rendered window.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trueno_heatmap::prelude::*;
//!
//! let source = DirectorySource::new("sample-heatmaps");
//! let mut viewer = HeatmapViewer::default();
//! viewer.load(&source, "noise")?;
//!
//! let canvas = CanvasGeometry::new(500.0, 500.0);
//! viewer.pointer_down(10.0, 10.0, canvas);
//! viewer.pointer_move(200.0, 120.0, canvas);
//! viewer.pointer_up();
//!
//! let mut exports = DirectoryExportSink::new("exports");
//! viewer.export_to(ExportFormat::Png, &mut exports)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `wasm`: WebAssembly bindings for browser hosts

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Viridis color table and value-to-color lookup.
pub mod colormap;

/// Rectangular data grids.
pub mod grid;

/// Visible window, zoom, pan and canvas-to-data mapping.
pub mod viewport;

/// Drag-driven region selection.
pub mod selection;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Pixel-space rectangles.
pub mod geometry;

/// Heatmap and selection rasterization.
pub mod render;

/// Output encoders (PNG).
pub mod output;

/// Sub-grid and sub-image export.
pub mod export;

// ============================================================================
// Session Modules
// ============================================================================

/// Grid sources.
pub mod source;

/// Render and export sinks.
pub mod sink;

/// Control-surface commands.
pub mod control;

/// Viewer session.
pub mod viewer;

/// YAML configuration.
pub mod config;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-heatmap operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trueno_heatmap::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::color::{Rgb, Rgba};
    pub use crate::colormap::ColorTable;
    pub use crate::config::ViewerConfig;
    pub use crate::control::Command;
    pub use crate::error::{Error, Result};
    pub use crate::export::{ExportArtifact, ExportFormat};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::PixelRect;
    pub use crate::grid::DataGrid;
    pub use crate::render::HeatmapRenderer;
    pub use crate::selection::{NormalizedRegion, Selection, SelectionRegion};
    pub use crate::sink::{
        DirectoryExportSink, ExportSink, FramebufferSink, MemoryExportSink, RenderSink,
    };
    pub use crate::source::{DirectorySource, GridSource, MemorySource};
    pub use crate::viewer::{HeatmapViewer, LoadTicket, Redraw};
    pub use crate::viewport::{CanvasGeometry, Direction, Viewport};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
