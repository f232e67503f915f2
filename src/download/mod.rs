//! Download module for content downloading.
//!
//! This module provides:
//! - Post listing and profile retrieval
//! - Attachment selection and destination planning
//! - Bounded concurrent file downloading
//! - Progress and statistics tracking
//! - The per-creator pipeline tying these together

pub mod manager;
pub mod media;
pub mod pipeline;
pub mod posts;
pub mod state;
pub mod task;

pub use manager::{DownloadManager, DownloadReport, TaskOutcome, DEFAULT_WORKERS};
pub use media::download_attachment;
pub use pipeline::{api_for_creator, process_creator, RunOptions};
pub use posts::{count_pages, fetch_all_posts, fetch_display_name, fetch_posts};
pub use state::{DownloadStats, ProgressState};
pub use task::{plan_tasks, DownloadTask, TaskPlan};
