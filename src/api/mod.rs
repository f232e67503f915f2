//! Kemono API module.
//!
//! This module provides:
//! - Creator URL parsing and the supported platform set
//! - HTTP client for the listing, profile and file endpoints
//! - API response types

pub mod client;
pub mod creator;
pub mod types;

pub use client::{KemonoApi, PAGE_SIZE};
pub use creator::{parse_creator_url, CreatorRef, Platform};
pub use types::*;
