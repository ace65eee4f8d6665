//! # locsync-core
//!
//! Core types, traits, configuration, and error handling for locsync.

pub mod config;
pub mod error;
pub mod job;
pub mod locale;
pub mod traits;
