//! HTTP client wrapper for the education statistics API
//!
//! One configured request pipeline shared by every endpoint module:
//!
//! - bearer token header sourced from a [`TokenStorage`] at request time
//! - client-wide GET response cache ([`cache_system::CacheManager`]) keyed by URL and parameters
//! - a single refresh-and-retry on `401 Unauthorized`, with logout on a second failure

pub mod client;
pub mod errors;
pub mod prelude;
pub mod storage;

pub use client::{ApiClient, RequestOptions, ACCESS_TOKEN_KEY};
pub use errors::{ApiError, StorageError};
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
