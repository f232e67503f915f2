//! Destination path resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::FileName;

/// Tracks which destination paths are taken in the download directory.
///
/// A path is taken if it exists on disk or was handed out earlier in the
/// run. Resolution is serial, so no two tasks ever share a destination.
///
/// Names handed out in the run are compared case-insensitively, since
/// `A.png` and `a.png` are the same file on Windows and macOS.
#[derive(Debug)]
pub struct FilenameRegistry {
    dir: PathBuf,
    reserved: HashSet<String>,
}

impl FilenameRegistry {
    /// Create a registry for files written into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            reserved: HashSet::new(),
        }
    }

    /// Pick a free destination for `raw_name` and reserve it.
    ///
    /// Collisions get `_1`, `_2`, ... before the extension, in first-seen
    /// order.
    pub fn resolve(&mut self, raw_name: &str, artist_name: Option<&str>) -> PathBuf {
        let name = FileName::new(raw_name, artist_name);

        let mut candidate = name.render();
        let mut counter = 1;
        while self.is_taken(&candidate) {
            candidate = name.numbered(counter);
            counter += 1;
        }

        self.reserved.insert(candidate.to_lowercase());
        self.dir.join(candidate)
    }

    /// Number of paths handed out so far.
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    fn is_taken(&self, file_name: &str) -> bool {
        self.reserved.contains(&file_name.to_lowercase()) || self.dir.join(file_name).exists()
    }
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
