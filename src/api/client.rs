//! Kemono API HTTP client.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use url::Url;

use crate::api::creator::CreatorRef;
use crate::api::types::*;
use crate::error::{Error, Result};

/// Number of posts the listing endpoint returns per page.
pub const PAGE_SIZE: usize = 50;

/// Longest response excerpt kept in parse errors.
const ERROR_EXCERPT_CHARS: usize = 500;

/// Kemono API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct KemonoApi {
    client: Client,
    base_url: Url,
    request_timeout: Duration,
}

impl KemonoApi {
    /// Create a client rooted at `base_url`.
    ///
    /// `request_timeout` bounds each listing, profile and probe request as a
    /// whole. File downloads are only bounded by the connect timeout and the
    /// `read_timeout` between body chunks.
    pub fn new(
        base_url: Url,
        user_agent: &str,
        request_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(request_timeout)
            .read_timeout(read_timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            request_timeout,
        })
    }

    /// Origin all API paths and relative attachment paths resolve against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Make a JSON GET request, failing on anything but 200.
    async fn get(&self, url: Url) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status != StatusCode::OK {
            return Err(Error::ApiStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Get one page of a creator's posts, starting at `offset`.
    ///
    /// An empty vector means the listing is exhausted.
    pub async fn get_posts(&self, creator: &CreatorRef, offset: usize) -> Result<Vec<Post>> {
        let mut url = self.endpoint(&creator.listing_path())?;
        url.query_pairs_mut().append_pair("o", &offset.to_string());

        let response = self.get(url).await?;
        let text = response.text().await?;
        tracing::debug!("Posts response at offset {}: {} bytes", offset, text.len());

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse posts at offset {}: {} - Response: {}",
                offset,
                e,
                excerpt(&text)
            ))
        })
    }

    /// Get the creator's profile.
    pub async fn get_profile(&self, creator: &CreatorRef) -> Result<Profile> {
        let url = self.endpoint(&creator.profile_path())?;

        let response = self.get(url).await?;
        let text = response.text().await?;
        tracing::debug!("Profile response: {}", excerpt(&text));

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse profile: {} - Response: {}",
                e,
                excerpt(&text)
            ))
        })
    }

    /// Turn an attachment path into an absolute URL.
    pub fn resolve_attachment_url(&self, path: &str) -> Result<Url> {
        match Url::parse(path) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(self.base_url.join(path)?),
            Err(e) => Err(e.into()),
        }
    }

    /// Ask for the size of a file without downloading it.
    ///
    /// Returns `None` when the server does not say.
    pub async fn probe_content_length(&self, url: &Url) -> Option<u64> {
        let response = match self
            .client
            .head(url.clone())
            .timeout(self.request_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Size probe failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Size probe for {} returned {}", url, response.status());
            return None;
        }

        response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }

    /// Start downloading a file; the body is streamed by the caller.
    pub async fn download_file(&self, url: &Url) -> Result<Response> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(ERROR_EXCERPT_CHARS).collect()
}
