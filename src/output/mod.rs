//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
};
pub use progress::{
    create_counter_spinner, create_download_bar, create_item_bar, create_multi_progress,
    create_spinner, create_unsized_download_bar, DownloadProgress, ProgressLogWriter,
};
pub use stats::print_creator_stats;
