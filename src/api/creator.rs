//! Creator page URL parsing.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

/// Creator-hosting services the archive mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Fanbox,
    Patreon,
    Pixiv,
    Discord,
    Fantia,
    Afdian,
    Boosty,
    Gumroad,
    Subscribestar,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Platform; 9] = [
        Platform::Fanbox,
        Platform::Patreon,
        Platform::Pixiv,
        Platform::Discord,
        Platform::Fantia,
        Platform::Afdian,
        Platform::Boosty,
        Platform::Gumroad,
        Platform::Subscribestar,
    ];

    /// Identifier used in page URLs and API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Fanbox => "fanbox",
            Platform::Patreon => "patreon",
            Platform::Pixiv => "pixiv",
            Platform::Discord => "discord",
            Platform::Fantia => "fantia",
            Platform::Afdian => "afdian",
            Platform::Boosty => "boosty",
            Platform::Gumroad => "gumroad",
            Platform::Subscribestar => "subscribestar",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unsupported platform: {}", s))
    }
}

/// A creator resolved from a page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorRef {
    pub platform: Platform,
    pub user_id: String,
    /// Scheme, host and port of the page URL.
    pub origin: Url,
}

impl CreatorRef {
    /// Path of the paginated post listing.
    pub fn listing_path(&self) -> String {
        format!("/api/v1/{}/user/{}", self.platform, self.user_id)
    }

    /// Path of the profile endpoint.
    pub fn profile_path(&self) -> String {
        format!("{}/profile", self.listing_path())
    }
}

impl fmt::Display for CreatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.user_id)
    }
}

/// Extract platform and user id from a creator page URL.
///
/// The first path segment names the platform, the last one is the user id:
/// `https://kemono.su/patreon/user/12345`.
pub fn parse_creator_url(input: &str) -> Result<CreatorRef> {
    let input = input.trim();
    let parsed = Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{}: {}", input, e)))?;

    if parsed.host_str().is_none() {
        return Err(Error::InvalidUrl(format!("{}: missing host", input)));
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let platform = segments
        .first()
        .ok_or_else(|| Error::InvalidUrl(format!("{}: missing platform", input)))?
        .parse::<Platform>()
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", input, e)))?;

    if segments.len() < 2 {
        return Err(Error::InvalidUrl(format!("{}: missing user id", input)));
    }
    let user_id = segments[segments.len() - 1].to_string();

    let mut origin = parsed.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);

    Ok(CreatorRef {
        platform,
        user_id,
        origin,
    })
}
