//! Download state tracking.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::media::MediaType;

/// Aggregate progress shared by all download workers.
///
/// `completed` counts settled tasks, successful or not. It only grows and is
/// capped at `total`.
#[derive(Debug)]
pub struct ProgressState {
    total: u64,
    completed: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl ProgressState {
    /// Create a tracker for `total` tasks.
    pub fn new(total: u64) -> Self {
        Self {
            total,
            completed: AtomicU64::new(0),
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn succeeded(&self) -> u64 {
        self.succeeded.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }

    /// Whether every task has settled.
    pub fn is_done(&self) -> bool {
        self.completed() >= self.total
    }

    /// Record a finished download. Returns the new completed count.
    pub fn record_success(&self) -> u64 {
        self.settle(&self.succeeded)
    }

    /// Record a failed download. Returns the new completed count.
    pub fn record_failure(&self) -> u64 {
        self.settle(&self.failed)
    }

    fn settle(&self, outcome: &AtomicU64) -> u64 {
        let total = self.total;
        match self
            .completed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |done| {
                (done < total).then_some(done + 1)
            }) {
            Ok(previous) => {
                outcome.fetch_add(1, Ordering::SeqCst);
                previous + 1
            }
            Err(done) => {
                tracing::warn!("Progress already complete ({}/{}), ignoring update", done, total);
                done
            }
        }
    }
}

/// Per-run statistics.
#[derive(Debug, Default)]
pub struct DownloadStats {
    // Creator info
    pub creator: Option<String>,
    pub display_name: Option<String>,

    // Listing
    pub posts: u64,
    pub attachments: u64,
    pub skipped: u64,

    // Downloads
    pub pic_count: u64,
    pub vid_count: u64,
    pub audio_count: u64,
    pub other_count: u64,
    pub failed_count: u64,
    pub bytes_downloaded: u64,
}

impl DownloadStats {
    /// Create statistics for a creator.
    pub fn new(creator: String) -> Self {
        Self {
            creator: Some(creator),
            ..Default::default()
        }
    }

    /// Count a file written to `path`.
    pub fn record_download(&mut self, path: &Path, bytes: u64) {
        match MediaType::from_path(path) {
            MediaType::Image => self.pic_count += 1,
            MediaType::Video => self.vid_count += 1,
            MediaType::Audio => self.audio_count += 1,
            MediaType::Unknown => self.other_count += 1,
        }
        self.bytes_downloaded += bytes;
    }

    /// Count a failed download.
    pub fn record_failure(&mut self) {
        self.failed_count += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.audio_count + self.other_count
    }
}
