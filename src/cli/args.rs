//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DownloadMode};

/// Kemono creator downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "kemono-downloader",
    version,
    about = "Download attachments from kemono creator pages",
    long_about = "A CLI tool to download the images, videos and files attached to a creator's posts.\n\n\
                  Anything not given as an argument or in the config file is asked for interactively."
)]
pub struct Args {
    /// Creator page URL, e.g. https://kemono.su/patreon/user/12345.
    pub url: Option<String>,

    /// Directory to write the files into.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Download every attachment, archives and thumbnails included.
    #[arg(long, conflicts_with = "media_only")]
    pub all: bool,

    /// Download only images, videos and animations.
    #[arg(long)]
    pub media_only: bool,

    /// Number of concurrent downloads.
    #[arg(short, long, env = "KEMONO_WORKERS")]
    pub workers: Option<usize>,

    /// API origin to use instead of the creator URL's host.
    #[arg(long, env = "KEMONO_BASE_URL")]
    pub base_url: Option<String>,

    /// Fetch the listing once, without counting pages first.
    #[arg(long)]
    pub single_pass: bool,

    /// Don't prefix file names with the creator's name.
    #[arg(long)]
    pub no_artist_prefix: bool,

    /// Timeout in seconds for API requests.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hide per-file progress.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(url) = self.url {
            config.targeted_creator.url = Some(url);
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if self.all {
            config.options.download_mode = Some(DownloadMode::All);
        } else if self.media_only {
            config.options.download_mode = Some(DownloadMode::Media);
        }

        if let Some(workers) = self.workers {
            config.options.workers = workers;
        }

        if let Some(base_url) = self.base_url {
            config.network.base_url = Some(base_url);
        }

        if let Some(timeout) = self.timeout {
            config.network.request_timeout_seconds = timeout;
        }

        // Boolean flags (only override if set to non-default)
        if self.single_pass {
            config.options.count_pages = false;
        }

        if self.no_artist_prefix {
            config.options.prefix_artist_name = false;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}
