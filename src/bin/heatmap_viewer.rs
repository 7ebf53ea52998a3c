//! heatmap-viewer - headless driver for the heatmap viewer engine.
//!
//! Reads one command per line from stdin and prints one status line per
//! command to stdout. Logs go to stderr.
//!
//! ```text
//! source noise
//! zoom-in
//! pointer down 10 10
//! pointer move 40 30
//! pointer up
//! export png
//! snapshot frame.png
//! ```
//!
//! Pointer coordinates are relative to a canvas the size of the grid.
//! An optional first argument names the config file; otherwise
//! `<config dir>/trueno-heatmap/config.yaml` is used when present.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing_subscriber::{fmt, EnvFilter};
use trueno_heatmap::output::PngEncoder;
use trueno_heatmap::prelude::*;

struct Session {
    viewer: HeatmapViewer,
    source: DirectorySource,
    exports: DirectoryExportSink,
}

impl Session {
    fn canvas(&self) -> CanvasGeometry {
        self.viewer.grid().map_or(CanvasGeometry::new(0.0, 0.0), |g| {
            CanvasGeometry::new(g.width() as f64, g.height() as f64)
        })
    }

    fn pointer(&mut self, args: &[&str]) -> Result<Redraw> {
        let coord = |i: usize| -> Result<f64> {
            args.get(i)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::UnknownCommand(format!("pointer {}", args.join(" "))))
        };
        let canvas = self.canvas();
        match args.first().copied() {
            Some("down") => Ok(self.viewer.pointer_down(coord(1)?, coord(2)?, canvas)),
            Some("move") => Ok(self.viewer.pointer_move(coord(1)?, coord(2)?, canvas)),
            Some("up") => Ok(self.viewer.pointer_up()),
            _ => Err(Error::UnknownCommand(format!("pointer {}", args.join(" ")))),
        }
    }

    fn snapshot(&self, path: &str) -> Result<String> {
        match self.viewer.snapshot()? {
            Some(frame) => {
                PngEncoder::write_to_file(&frame, path)?;
                Ok(format!("wrote {path}"))
            }
            None => Ok("nothing loaded".to_string()),
        }
    }

    fn handle(&mut self, line: &str) -> Result<String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["pointer", rest @ ..] => self.pointer(rest).map(|r| format!("{r:?}")),
            ["snapshot", path] => self.snapshot(path),
            ["zoom"] => Ok(self.viewer.zoom_label()),
            ["export", format] => {
                let format: ExportFormat = format.parse()?;
                Ok(match self.viewer.export_to(format, &mut self.exports)? {
                    Some(name) => format!("exported {name}"),
                    None => "no selection".to_string(),
                })
            }
            _ => {
                let command: Command = line.parse()?;
                let redraw = self
                    .viewer
                    .apply(&command, &self.source, &mut self.exports)?;
                Ok(format!("{redraw:?} {}", self.viewer.zoom_label()))
            }
        }
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(ViewerConfig::default_path)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = config_path().map_or_else(ViewerConfig::default, ViewerConfig::load_or_default);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let mut session = Session {
        viewer: HeatmapViewer::from_config(&config)?,
        source: DirectorySource::new(&config.data_dir),
        exports: DirectoryExportSink::new(&config.export_dir),
    };

    if let Err(e) = session.viewer.load(&session.source, &config.default_source) {
        tracing::warn!(source = %config.default_source, error = %e, "default source not loaded");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match session.handle(line) {
            Ok(status) => writeln!(stdout, "{status}")?,
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    }

    Ok(())
}
