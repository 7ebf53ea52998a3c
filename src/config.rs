//! Viewer configuration.
//!
//! Loaded from YAML; every field has a default, so an empty file (or no file)
//! yields a working configuration.
//!
//! ```yaml
//! data_dir: sample-heatmaps
//! default_source: noise
//! export_dir: exports
//! zoom_step: 0.5
//! selection_color: "#ff0000"
//! log_level: info
//! ```

use crate::color::Rgba;
use crate::colormap::ColorTable;
use crate::error::{Error, Result};
use crate::viewport::{MAX_ZOOM, MIN_ZOOM};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Levels accepted by `log_level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings for a viewer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Directory holding `<name>.json` grids.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Dataset loaded at startup.
    #[serde(default = "default_source")]
    pub default_source: String,
    /// Directory exports are written into.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Zoom change per zoom-in/zoom-out command.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    /// Selection outline color as `#rrggbb`.
    #[serde(default = "default_selection_color")]
    pub selection_color: String,
    /// Optional JSON color table replacing the built-in viridis table.
    #[serde(default)]
    pub palette: Option<PathBuf>,
    /// Default log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("sample-heatmaps")
}

fn default_source() -> String {
    "noise".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_zoom_step() -> f32 {
    0.5
}

fn default_selection_color() -> String {
    "#ff0000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_source: default_source(),
            export_dir: default_export_dir(),
            zoom_step: default_zoom_step(),
            selection_color: default_selection_color(),
            palette: None,
            log_level: default_log_level(),
        }
    }
}

impl ViewerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Standard config file location, `<config dir>/trueno-heatmap/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trueno-heatmap").join("config.yaml"))
    }

    /// Checks values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: String| Error::ConfigInvalid {
            key: key.to_string(),
            message,
        };

        let max_step = MAX_ZOOM - MIN_ZOOM;
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 || self.zoom_step > max_step {
            return Err(invalid(
                "zoom_step",
                format!("must be in (0, {max_step}], got {}", self.zoom_step),
            ));
        }
        if self.default_source.trim().is_empty() {
            return Err(invalid("default_source", "must not be empty".to_string()));
        }
        Rgba::from_hex(&self.selection_color)
            .map_err(|e| invalid("selection_color", e.to_string()))?;
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(invalid(
                "log_level",
                format!("expected one of {}, got {}", LOG_LEVELS.join("|"), self.log_level),
            ));
        }
        Ok(())
    }

    /// Parsed selection outline color.
    ///
    /// # Errors
    ///
    /// Returns an error if `selection_color` is not `#rrggbb`.
    pub fn selection_rgba(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.selection_color)
    }

    /// Color table named by `palette`, or viridis.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette file cannot be read or is invalid.
    pub fn color_table(&self) -> Result<ColorTable> {
        match &self.palette {
            Some(path) => ColorTable::load(path),
            None => Ok(ColorTable::viridis()),
        }
    }
}
