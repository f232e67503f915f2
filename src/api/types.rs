//! API response type definitions.

use serde::{Deserialize, Deserializer};

/// A post from the creator listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// File attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    /// Absolute URL or a path relative to the API origin.
    #[serde(default)]
    pub path: String,
}

/// Creator profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
}

/// Post ids are strings on most services but plain numbers on a few.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
