//! Configuration module for the kemono-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Download mode selection
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, CreatorConfig, NetworkConfig, OptionsConfig, CONFIG_FILE_NAME};
pub use modes::DownloadMode;
pub use validation::{validate_config, validate_download_directory};
