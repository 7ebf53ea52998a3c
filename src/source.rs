//! Where grids come from.
//!
//! A source resolves a dataset name to a [`DataGrid`]. Names are plain
//! identifiers such as `noise_5x5`; they are never interpreted as paths.

use crate::error::{Error, Result};
use crate::grid::DataGrid;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves dataset names to grids.
pub trait GridSource {
    /// Load the grid called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSource`] if the name is not served, or a
    /// parse error if the payload is not a rectangular numeric array.
    fn load(&self, name: &str) -> Result<DataGrid>;

    /// Names this source can serve, if it can enumerate them.
    fn names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Whether `name` is usable as a dataset name.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\'])
        && !name.contains(std::path::MAIN_SEPARATOR)
}

/// Serves `<root>/<name>.json` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the grid called `name` would be read from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSource`] if `name` is not a plain name.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_name(name) {
            return Err(Error::UnknownSource(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

impl GridSource for DirectorySource {
    fn load(&self, name: &str) -> Result<DataGrid> {
        let path = self.path_for(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::UnknownSource(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let grid = DataGrid::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            "read grid"
        );
        Ok(grid)
    }

    fn names(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

/// Serves grids held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    grids: BTreeMap<String, DataGrid>,
}

impl MemorySource {
    /// Empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the grid called `name`.
    #[must_use]
    pub fn with_grid(mut self, name: impl Into<String>, grid: DataGrid) -> Self {
        self.insert(name, grid);
        self
    }

    /// Add or replace the grid called `name`.
    pub fn insert(&mut self, name: impl Into<String>, grid: DataGrid) {
        self.grids.insert(name.into(), grid);
    }
}

impl GridSource for MemorySource {
    fn load(&self, name: &str) -> Result<DataGrid> {
        self.grids
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownSource(name.to_string()))
    }

    fn names(&self) -> Vec<String> {
        self.grids.keys().cloned().collect()
    }
}
