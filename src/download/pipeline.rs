//! End-to-end processing of one creator.

use std::path::PathBuf;

use indicatif::MultiProgress;
use url::Url;

use crate::api::{CreatorRef, KemonoApi};
use crate::config::{Config, DownloadMode};
use crate::download::manager::DownloadManager;
use crate::download::posts::{fetch_display_name, fetch_posts};
use crate::download::state::DownloadStats;
use crate::download::task::plan_tasks;
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, FilenameRegistry};

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: DownloadMode,
    pub download_directory: PathBuf,
    pub workers: usize,
    pub count_pages: bool,
    pub prefix_artist_name: bool,
    pub show_downloads: bool,
}

impl RunOptions {
    /// Take the remaining settings from the configuration.
    pub fn from_config(config: &Config, mode: DownloadMode, download_directory: PathBuf) -> Self {
        Self {
            mode,
            download_directory,
            workers: config.options.workers,
            count_pages: config.options.count_pages,
            prefix_artist_name: config.options.prefix_artist_name,
            show_downloads: config.options.show_downloads,
        }
    }
}

/// Build the API client for a creator.
///
/// The configured base URL wins over the origin of the creator URL.
pub fn api_for_creator(config: &Config, creator: &CreatorRef) -> Result<KemonoApi> {
    let base_url = match &config.network.base_url {
        Some(base_url) => Url::parse(base_url)?,
        None => creator.origin.clone(),
    };

    KemonoApi::new(
        base_url,
        &config.network.user_agent,
        config.request_timeout(),
        config.read_timeout(),
    )
}

/// Fetch a creator's posts and download the selected attachments.
///
/// Fails only when no post could be retrieved; individual download errors
/// end up in the returned statistics.
pub async fn process_creator(
    api: &KemonoApi,
    creator: &CreatorRef,
    options: &RunOptions,
    multi: &MultiProgress,
) -> Result<DownloadStats> {
    tracing::info!("Loading pages for {}...", creator);

    let (posts, display_name) = tokio::join!(
        fetch_posts(api, creator, options.count_pages, multi),
        fetch_display_name(api, creator)
    );

    if posts.is_empty() {
        return Err(Error::NoPosts(creator.to_string()));
    }

    let mut stats = DownloadStats::new(creator.to_string());
    stats.display_name = display_name;
    stats.posts = posts.len() as u64;

    ensure_dir(&options.download_directory)?;

    let artist_name = if options.prefix_artist_name {
        stats.display_name.as_deref()
    } else {
        None
    };

    let mut registry = FilenameRegistry::new(&options.download_directory);
    let plan = plan_tasks(api, &posts, options.mode, &mut registry, artist_name);
    stats.attachments = plan.attachments;
    stats.skipped = plan.skipped;

    tracing::info!(
        "{} of {} attachment(s) selected ({} mode)",
        plan.tasks.len(),
        plan.attachments,
        options.mode
    );

    let manager = DownloadManager::new(api.clone(), options.workers)
        .with_progress(multi.clone(), options.show_downloads);
    let report = manager.download_all(plan.tasks).await;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(bytes) => stats.record_download(&outcome.task.destination, *bytes),
            Err(_) => stats.record_failure(),
        }
    }
    // Tasks lost to a join error have no outcome entry
    let lost = report.progress.failed() - report.failed().count() as u64;
    stats.failed_count += lost;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_creator_url;
    use crate::output::create_multi_progress;
    use mockito::{Matcher, Server, ServerGuard};
    use std::fs;
    use tempfile::TempDir;

    fn options(dir: &TempDir, mode: DownloadMode) -> RunOptions {
        let mut config = Config::default();
        config.options.workers = 4;
        RunOptions::from_config(&config, mode, dir.path().to_path_buf())
    }

    fn setup(server: &ServerGuard) -> (KemonoApi, CreatorRef) {
        let creator = parse_creator_url(&format!("{}/patreon/user/55", server.url())).unwrap();
        let api = api_for_creator(&Config::default(), &creator).unwrap();
        (api, creator)
    }

    #[tokio::test]
    async fn test_media_only_run_with_artist_name() {
        let mut server = Server::new_async().await;
        let page_zero = server
            .mock("GET", "/api/v1/patreon/user/55")
            .match_query(Matcher::UrlEncoded("o".into(), "0".into()))
            .with_status(200)
            .with_body(
                r#"[{"id": "1", "attachments": [
                    {"name": "a.png", "path": "/data/a.png"},
                    {"name": "b.zip", "path": "/data/b.zip"}
                ]}]"#,
            )
            .expect(2)
            .create_async()
            .await;
        let page_one = server
            .mock("GET", "/api/v1/patreon/user/55")
            .match_query(Matcher::UrlEncoded("o".into(), "50".into()))
            .with_status(200)
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;
        let _profile = server
            .mock("GET", "/api/v1/patreon/user/55/profile")
            .with_status(200)
            .with_body(r#"{"id": "55", "name": "ArtistName"}"#)
            .create_async()
            .await;
        let image = server
            .mock("GET", "/data/a.png")
            .with_status(200)
            .with_body("png bytes")
            .expect(1)
            .create_async()
            .await;
        let archive = server
            .mock("GET", "/data/b.zip")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let (api, creator) = setup(&server);
        let stats = process_creator(
            &api,
            &creator,
            &options(&dir, DownloadMode::Media),
            &create_multi_progress(false),
        )
        .await
        .unwrap();

        assert_eq!(stats.display_name.as_deref(), Some("ArtistName"));
        assert_eq!(stats.posts, 1);
        assert_eq!(stats.attachments, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.pic_count, 1);
        assert_eq!(stats.failed_count, 0);

        let files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files, vec!["[ArtistName] - a.png".to_string()]);
        assert_eq!(
            fs::read_to_string(dir.path().join("[ArtistName] - a.png")).unwrap(),
            "png bytes"
        );

        page_zero.assert_async().await;
        page_one.assert_async().await;
        image.assert_async().await;
        archive.assert_async().await;
    }

    #[tokio::test]
    async fn test_all_mode_without_profile() {
        let mut server = Server::new_async().await;
        let _page_zero = server
            .mock("GET", "/api/v1/patreon/user/55")
            .match_query(Matcher::UrlEncoded("o".into(), "0".into()))
            .with_status(200)
            .with_body(
                r#"[
                    {"id": "1", "attachments": [{"name": "a.png", "path": "/data/a.png"}]},
                    {"id": "2", "attachments": [
                        {"name": "a.png", "path": "/data/a.png"},
                        {"name": "b.zip", "path": "/data/b.zip"}
                    ]}
                ]"#,
            )
            .create_async()
            .await;
        let _page_one = server
            .mock("GET", "/api/v1/patreon/user/55")
            .match_query(Matcher::UrlEncoded("o".into(), "50".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let _profile = server
            .mock("GET", "/api/v1/patreon/user/55/profile")
            .with_status(500)
            .create_async()
            .await;
        let _image = server
            .mock("GET", "/data/a.png")
            .with_status(200)
            .with_body("png")
            .create_async()
            .await;
        let _archive = server
            .mock("GET", "/data/b.zip")
            .with_status(200)
            .with_body("zip")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let (api, creator) = setup(&server);
        let stats = process_creator(
            &api,
            &creator,
            &options(&dir, DownloadMode::All),
            &create_multi_progress(false),
        )
        .await
        .unwrap();

        assert!(stats.display_name.is_none());
        assert_eq!(stats.total_downloaded(), 3);
        assert!(dir.path().join("a.png").exists());
        assert!(dir.path().join("a_1.png").exists());
        assert!(dir.path().join("b.zip").exists());
    }

    #[tokio::test]
    async fn test_no_posts_is_an_error() {
        let mut server = Server::new_async().await;
        let _listing = server
            .mock("GET", "/api/v1/patreon/user/55")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;
        let _profile = server
            .mock("GET", "/api/v1/patreon/user/55/profile")
            .with_status(404)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let (api, creator) = setup(&server);
        let err = process_creator(
            &api,
            &creator,
            &options(&dir, DownloadMode::Media),
            &create_multi_progress(false),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::NoPosts(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_api_for_creator_prefers_configured_base() {
        let creator = parse_creator_url("https://kemono.su/pixiv/user/3").unwrap();

        let api = api_for_creator(&Config::default(), &creator).unwrap();
        assert_eq!(api.base_url().as_str(), "https://kemono.su/");

        let mut config = Config::default();
        config.network.base_url = Some("https://kemono.cr".to_string());
        let api = api_for_creator(&config, &creator).unwrap();
        assert_eq!(api.base_url().as_str(), "https://kemono.cr/");
    }
}
