//! Post listing and profile retrieval.

use indicatif::{MultiProgress, ProgressBar};

use crate::api::{CreatorRef, KemonoApi, Post, PAGE_SIZE};
use crate::output::{create_counter_spinner, create_item_bar, create_spinner};

/// Walk the listing page by page until an empty page comes back.
///
/// `on_page` sees every non-empty page. A failed request ends the walk
/// early; it is logged, never retried. Returns the number of pages seen.
async fn walk_pages<F>(api: &KemonoApi, creator: &CreatorRef, mut on_page: F) -> usize
where
    F: FnMut(Vec<Post>),
{
    let mut offset = 0;
    let mut pages = 0;

    loop {
        match api.get_posts(creator, offset).await {
            Ok(page) if page.is_empty() => break,
            Ok(page) => {
                pages += 1;
                offset += PAGE_SIZE;
                on_page(page);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch data from {} API at offset {}: {}",
                    creator.platform,
                    offset,
                    e
                );
                break;
            }
        }
    }

    pages
}

/// Count the non-empty pages of a creator's listing, discarding the posts.
pub async fn count_pages(api: &KemonoApi, creator: &CreatorRef) -> usize {
    let pages = walk_pages(api, creator, |_| {}).await;
    tracing::debug!("{} has {} page(s) of posts", creator, pages);
    pages
}

/// Fetch every post of a creator, advancing `progress` once per page.
///
/// Returns whatever was collected before the first failure.
pub async fn fetch_all_posts(
    api: &KemonoApi,
    creator: &CreatorRef,
    progress: &ProgressBar,
) -> Vec<Post> {
    let mut posts = Vec::new();

    let pages = walk_pages(api, creator, |page| {
        posts.extend(page);
        progress.inc(1);
    })
    .await;

    tracing::info!("Loaded {} post(s) from {} page(s)", posts.len(), pages);
    posts
}

/// Fetch all posts with a page progress bar.
///
/// With `count_first` the listing is walked twice: once to size the bar,
/// once for the data. Otherwise a single pass drives a counting spinner.
pub async fn fetch_posts(
    api: &KemonoApi,
    creator: &CreatorRef,
    count_first: bool,
    multi: &MultiProgress,
) -> Vec<Post> {
    let bar = if count_first {
        let spinner = multi.add(create_spinner("Counting pages..."));
        let total = count_pages(api, creator).await;
        spinner.finish_and_clear();
        multi.add(create_item_bar(total as u64, "Loading pages"))
    } else {
        multi.add(create_counter_spinner("Loading pages"))
    };

    let posts = fetch_all_posts(api, creator, &bar).await;
    bar.finish_and_clear();
    posts
}

/// Look up the creator's display name.
///
/// Any failure is logged and yields `None`.
pub async fn fetch_display_name(api: &KemonoApi, creator: &CreatorRef) -> Option<String> {
    match api.get_profile(creator).await {
        Ok(profile) => {
            let name = profile.name.filter(|n| !n.trim().is_empty());
            if name.is_none() {
                tracing::debug!("Profile of {} has no name", creator);
            }
            name
        }
        Err(e) => {
            tracing::warn!("Could not fetch profile of {}: {}", creator, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_creator_url;
    use crate::output::create_multi_progress;
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use std::time::Duration;
    use url::Url;

    const LISTING: &str = "/api/v1/fanbox/user/7";

    fn setup(server: &ServerGuard) -> (KemonoApi, CreatorRef) {
        let api = KemonoApi::new(
            Url::parse(&server.url()).unwrap(),
            "test-agent",
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
        .unwrap();
        let creator = parse_creator_url(&format!("{}/fanbox/user/7", server.url())).unwrap();
        (api, creator)
    }

    fn page_body(ids: &[&str]) -> String {
        let posts: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id": "{}", "attachments": []}}"#, id))
            .collect();
        format!("[{}]", posts.join(","))
    }

    async fn mock_page(server: &mut ServerGuard, offset: usize, body: String, hits: usize) -> Mock {
        server
            .mock("GET", LISTING)
            .match_query(Matcher::UrlEncoded("o".into(), offset.to_string()))
            .with_status(200)
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_fetch_stops_at_first_empty_page() {
        let mut server = Server::new_async().await;
        let first = mock_page(&mut server, 0, page_body(&["1", "2"]), 1).await;
        let second = mock_page(&mut server, 50, page_body(&["3"]), 1).await;
        let empty = mock_page(&mut server, 100, "[]".to_string(), 1).await;
        let beyond = mock_page(&mut server, 150, page_body(&["9"]), 0).await;

        let (api, creator) = setup(&server);
        let bar = ProgressBar::hidden();
        let posts = fetch_all_posts(&api, &creator, &bar).await;

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(bar.position(), 2);

        first.assert_async().await;
        second.assert_async().await;
        empty.assert_async().await;
        beyond.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_keeps_pages_before_a_failure() {
        let mut server = Server::new_async().await;
        let _first = mock_page(&mut server, 0, page_body(&["1"]), 1).await;
        let failing = server
            .mock("GET", LISTING)
            .match_query(Matcher::UrlEncoded("o".into(), "50".into()))
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let (api, creator) = setup(&server);
        let posts = fetch_all_posts(&api, &creator, &ProgressBar::hidden()).await;

        assert_eq!(posts.len(), 1);
        failing.assert_async().await;
    }

    #[tokio::test]
    async fn test_count_pages() {
        let mut server = Server::new_async().await;
        let _a = mock_page(&mut server, 0, page_body(&["1"]), 1).await;
        let _b = mock_page(&mut server, 50, page_body(&["2"]), 1).await;
        let _c = mock_page(&mut server, 100, "[]".to_string(), 1).await;

        let (api, creator) = setup(&server);
        assert_eq!(count_pages(&api, &creator).await, 2);
    }

    #[tokio::test]
    async fn test_two_pass_fetch_walks_listing_twice() {
        let mut server = Server::new_async().await;
        let first = mock_page(&mut server, 0, page_body(&["1"]), 2).await;
        let empty = mock_page(&mut server, 50, "[]".to_string(), 2).await;

        let (api, creator) = setup(&server);
        let multi = create_multi_progress(false);
        let posts = fetch_posts(&api, &creator, true, &multi).await;

        assert_eq!(posts.len(), 1);
        first.assert_async().await;
        empty.assert_async().await;
    }

    #[tokio::test]
    async fn test_single_pass_fetch() {
        let mut server = Server::new_async().await;
        let first = mock_page(&mut server, 0, page_body(&["1"]), 1).await;
        let empty = mock_page(&mut server, 50, "[]".to_string(), 1).await;

        let (api, creator) = setup(&server);
        let multi = create_multi_progress(false);
        let posts = fetch_posts(&api, &creator, false, &multi).await;

        assert_eq!(posts.len(), 1);
        first.assert_async().await;
        empty.assert_async().await;
    }

    #[tokio::test]
    async fn test_display_name() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/v1/fanbox/user/7/profile")
            .with_status(200)
            .with_body(r#"{"id": "7", "name": "Artist Name"}"#)
            .create_async()
            .await;

        let (api, creator) = setup(&server);
        assert_eq!(
            fetch_display_name(&api, &creator).await.as_deref(),
            Some("Artist Name")
        );
    }

    #[tokio::test]
    async fn test_display_name_absent_on_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/v1/fanbox/user/7/profile")
            .with_status(404)
            .create_async()
            .await;

        let (api, creator) = setup(&server);
        assert!(fetch_display_name(&api, &creator).await.is_none());
    }
}
