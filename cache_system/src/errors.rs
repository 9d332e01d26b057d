//! Error types for the response cache

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// A cached payload could not be decoded into the requested type
    #[error("Cached payload does not match the requested type: {0}")]
    Decode(#[from] serde_json::Error),

    /// An enabled cache needs a non-zero expiry window
    #[error("Invalid TTL value: {0}")]
    InvalidTtl(u64),
}
