//! Destinations for rendered frames and exported files.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::PixelRect;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives a rendered heatmap window and the selection rectangle.
///
/// `selection` is window-relative, in pixels, and may extend past the frame.
pub trait RenderSink {
    /// Present one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be shown.
    fn present(&mut self, frame: &Framebuffer, selection: Option<PixelRect>) -> Result<()>;
}

/// Receives exported bytes under a suggested file name.
pub trait ExportSink {
    /// Store `bytes` as `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be stored.
    fn save(&mut self, bytes: &[u8], filename: &str) -> Result<()>;
}

/// Keeps the most recent frame in memory.
#[derive(Debug, Clone, Default)]
pub struct FramebufferSink {
    frame: Option<Framebuffer>,
    selection: Option<PixelRect>,
    frames: usize,
}

impl FramebufferSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last presented heatmap frame.
    #[must_use]
    pub fn frame(&self) -> Option<&Framebuffer> {
        self.frame.as_ref()
    }

    /// Last presented selection rectangle.
    #[must_use]
    pub fn selection(&self) -> Option<PixelRect> {
        self.selection
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frames_presented(&self) -> usize {
        self.frames
    }
}

impl RenderSink for FramebufferSink {
    fn present(&mut self, frame: &Framebuffer, selection: Option<PixelRect>) -> Result<()> {
        self.frame = Some(frame.clone());
        self.selection = selection;
        self.frames += 1;
        Ok(())
    }
}

/// Writes exported files into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectoryExportSink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for DirectoryExportSink {
    fn save(&mut self, bytes: &[u8], filename: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Only the final component is honored
        let name = Path::new(filename)
            .file_name()
            .map_or_else(|| PathBuf::from("export"), PathBuf::from);
        let path = self.dir.join(name);
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "export saved");
        self.written.push(path);
        Ok(())
    }
}

/// Export sink that keeps files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryExportSink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemoryExportSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved `(filename, bytes)` pairs, oldest first.
    #[must_use]
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }
}

impl ExportSink for MemoryExportSink {
    fn save(&mut self, bytes: &[u8], filename: &str) -> Result<()> {
        self.files.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}
