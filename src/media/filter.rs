//! Attachment selection.

use crate::config::DownloadMode;

/// Extensions accepted in media-only mode: images, videos and animations.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    // Images
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", "heif", "heic",
    // Videos
    "mp4", "webm", "avi", "mov", "mkv", "flv", "wmv", "mpeg", "mpg", "ogv", "3gp",
    // Animated
    "apng", "gifv", "m4v",
];

/// Decide whether an attachment should be downloaded.
///
/// In media-only mode archives and thumbnails are skipped and everything
/// else must carry a known media extension.
pub fn should_download(file_name: &str, mode: DownloadMode) -> bool {
    if mode.is_all() {
        return true;
    }

    let lower = file_name.to_lowercase();
    if lower.ends_with(".zip") || file_name.contains("_thumb") {
        return false;
    }

    is_media_file(&lower)
}

/// Check the extension against [`MEDIA_EXTENSIONS`], ignoring case.
pub fn is_media_file(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_lowercase();
            MEDIA_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
