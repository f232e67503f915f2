//! Media module for attachment filtering and classification.

pub mod filter;
pub mod kind;

pub use filter::{is_media_file, should_download, MEDIA_EXTENSIONS};
pub use kind::MediaType;
