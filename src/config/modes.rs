//! Download mode definitions.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which attachments of a post get downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Only images, videos and animations (default).
    #[default]
    Media,
    /// Every attachment, archives and thumbnails included.
    All,
}

impl DownloadMode {
    /// Whether the filter should let every attachment through.
    pub fn is_all(&self) -> bool {
        matches!(self, DownloadMode::All)
    }

    /// Map the interactive menu answer ("1" everything, "2" media only).
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(DownloadMode::All),
            "2" => Some(DownloadMode::Media),
            _ => None,
        }
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::Media => write!(f, "media"),
            DownloadMode::All => write!(f, "all"),
        }
    }
}

impl FromStr for DownloadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "media" => Ok(DownloadMode::Media),
            "all" => Ok(DownloadMode::All),
            _ => Err(format!("Unknown download mode: {}", s)),
        }
    }
}
