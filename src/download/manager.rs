//! Bounded concurrent download execution.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indicatif::MultiProgress;

use crate::api::KemonoApi;
use crate::download::media::download_attachment;
use crate::download::state::ProgressState;
use crate::download::task::DownloadTask;
use crate::error::Result;
use crate::output::{create_multi_progress, DownloadProgress};

/// Default number of concurrent downloads.
pub const DEFAULT_WORKERS: usize = 10;

/// How one task ended.
#[derive(Debug)]
pub struct TaskOutcome {
    pub task: DownloadTask,
    /// Bytes written, or why the download failed.
    pub result: Result<u64>,
}

/// Outcome of a whole batch.
#[derive(Debug)]
pub struct DownloadReport {
    /// One entry per task, in completion order.
    pub outcomes: Vec<TaskOutcome>,
    pub progress: Arc<ProgressState>,
}

impl DownloadReport {
    /// Tasks that finished successfully.
    pub fn succeeded(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    /// Tasks that failed.
    pub fn failed(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Runs download tasks through a fixed-size worker pool.
pub struct DownloadManager {
    api: KemonoApi,
    workers: usize,
    multi: MultiProgress,
    show_downloads: bool,
}

impl DownloadManager {
    /// Create a manager running at most `workers` downloads at once.
    pub fn new(api: KemonoApi, workers: usize) -> Self {
        Self {
            api,
            workers: workers.max(1),
            multi: create_multi_progress(false),
            show_downloads: false,
        }
    }

    /// Draw bars into `multi`; per-file bars only with `show_downloads`.
    pub fn with_progress(mut self, multi: MultiProgress, show_downloads: bool) -> Self {
        self.multi = multi;
        self.show_downloads = show_downloads;
        self
    }

    /// Download every task, best effort.
    ///
    /// A failing task is logged and counted; it never stops the others.
    /// Returns once every task has settled.
    pub async fn download_all(&self, tasks: Vec<DownloadTask>) -> DownloadReport {
        let state = Arc::new(ProgressState::new(tasks.len() as u64));
        let progress = DownloadProgress::new(&self.multi, state.total(), self.show_downloads);

        tracing::info!(
            "Downloading {} file(s) with {} worker(s)",
            state.total(),
            self.workers
        );

        let joined: Vec<_> = stream::iter(tasks)
            .map(|task| {
                let api = self.api.clone();
                let state = state.clone();
                let progress = progress.clone();

                tokio::spawn(async move {
                    let result = download_attachment(&api, &task, &progress).await;
                    match &result {
                        Ok(_) => {
                            state.record_success();
                        }
                        Err(e) => {
                            tracing::error!("Failed to download {}: {}", task.file_name, e);
                            state.record_failure();
                        }
                    }
                    progress.inc_total();
                    TaskOutcome { task, result }
                })
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        let mut outcomes = Vec::with_capacity(joined.len());
        for result in joined {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("Download task join error: {}", e);
                    state.record_failure();
                    progress.inc_total();
                }
            }
        }

        progress.finish();

        tracing::info!(
            "{} of {} download(s) finished, {} failed",
            state.succeeded(),
            state.total(),
            state.failed()
        );

        DownloadReport {
            outcomes,
            progress: state,
        }
    }
}
