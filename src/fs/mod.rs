//! Filesystem module.
//!
//! Provides:
//! - Filename sanitizing
//! - Collision-free destination paths

pub mod naming;
pub mod paths;

pub use naming::{sanitize_component, split_file_name, FileName};
pub use paths::{ensure_dir, FilenameRegistry};
