//! Turning post attachments into download tasks.

use std::path::PathBuf;

use url::Url;

use crate::api::{KemonoApi, Post};
use crate::config::DownloadMode;
use crate::fs::FilenameRegistry;
use crate::media::should_download;

/// One file to fetch, with its destination already reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Absolute URL of the attachment.
    pub source_url: Url,
    /// Attachment name as listed by the API.
    pub file_name: String,
    /// Collision-free destination path.
    pub destination: PathBuf,
}

/// Result of the planning phase.
#[derive(Debug, Default)]
pub struct TaskPlan {
    pub tasks: Vec<DownloadTask>,
    /// Attachments seen across all posts.
    pub attachments: u64,
    /// Attachments rejected by the filter or unusable.
    pub skipped: u64,
}

/// Filter the attachments of `posts` and resolve a destination for each.
///
/// Runs serially so the registry hands out every path at most once.
pub fn plan_tasks(
    api: &KemonoApi,
    posts: &[Post],
    mode: DownloadMode,
    registry: &mut FilenameRegistry,
    artist_name: Option<&str>,
) -> TaskPlan {
    let mut plan = TaskPlan::default();

    for post in posts {
        for attachment in &post.attachments {
            plan.attachments += 1;

            if !should_download(&attachment.name, mode) {
                tracing::debug!("Skipping {} (post {})", attachment.name, post.id);
                plan.skipped += 1;
                continue;
            }

            if attachment.path.is_empty() {
                tracing::warn!("Attachment {} in post {} has no path", attachment.name, post.id);
                plan.skipped += 1;
                continue;
            }

            let source_url = match api.resolve_attachment_url(&attachment.path) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        "Invalid path for {} in post {}: {}",
                        attachment.name,
                        post.id,
                        e
                    );
                    plan.skipped += 1;
                    continue;
                }
            };

            let destination = registry.resolve(&attachment.name, artist_name);
            plan.tasks.push(DownloadTask {
                source_url,
                file_name: attachment.name.clone(),
                destination,
            });
        }
    }

    plan
}
