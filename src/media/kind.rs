//! Media kind classification for download statistics.

use std::path::Path;

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Unknown,
}

impl MediaType {
    /// Classify a file by the MIME type guessed from its extension.
    pub fn from_path(path: &Path) -> Self {
        let Some(mime) = mime_guess::from_path(path).first() else {
            return MediaType::Unknown;
        };

        let top = mime.type_();
        if top == mime_guess::mime::IMAGE {
            MediaType::Image
        } else if top == mime_guess::mime::VIDEO {
            MediaType::Video
        } else if top == mime_guess::mime::AUDIO {
            MediaType::Audio
        } else {
            MediaType::Unknown
        }
    }
}
