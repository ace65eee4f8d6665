//! Crowdin API v2 client.
//!
//! Implements [`locsync_core::traits::TranslationService`] over HTTP.
//! Docs: <https://developer.crowdin.com/api/v2/>

mod client;
pub(crate) mod types;


pub use client::{base_url_for, CrowdinClient, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
