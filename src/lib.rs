//! Kemono Downloader - fetch a creator's posts and download their attachments
//!
//! This library walks a creator's paginated post listing on a kemono-style
//! archive and downloads the attached files into a single directory.
//!
//! # Features
//!
//! - Creator URL parsing for the supported platforms
//! - Two-pass or single-pass post listing with progress bars
//! - Media-only or download-everything attachment filtering
//! - Collision-free, sanitized file names prefixed with the artist name
//! - Bounded concurrent downloads with per-file and aggregate progress
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use kemono_downloader::{
//!     api::parse_creator_url,
//!     download::{api_for_creator, process_creator, RunOptions},
//!     output::create_multi_progress,
//!     Config, DownloadMode,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let creator = parse_creator_url("https://kemono.su/patreon/user/12345")?;
//!     let api = api_for_creator(&config, &creator)?;
//!     let options = RunOptions::from_config(&config, DownloadMode::Media, PathBuf::from("out"));
//!
//!     let stats = process_creator(&api, &creator, &options, &create_multi_progress(true)).await?;
//!     println!("{} files downloaded", stats.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{parse_creator_url, CreatorRef, KemonoApi, Platform};
pub use config::{Config, DownloadMode};
pub use download::{process_creator, DownloadManager, DownloadStats, DownloadTask, ProgressState};
pub use error::{Error, Result};
pub use media::MediaType;
