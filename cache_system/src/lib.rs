//! Cache system for HTTP response caching
//!
//! This crate provides the client-wide, time-bounded response cache that sits
//! beneath the slice stores, keyed by request URL and serialized parameters.

pub mod errors;
pub mod manager;
pub mod prelude;

// Re-export centralized config
pub use config::CacheConfig;

pub use errors::CacheError;
pub use manager::{CacheManager, CacheStats, SharedClock};
