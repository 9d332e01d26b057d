//! Error types for the edstats crate
//!
//! Lower-level errors are wrapped transparently so the message stored on a
//! failed slice key is the one produced where the failure happened.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdstatsError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache_system::CacheError),

    #[error(transparent)]
    Api(#[from] api_client::ApiError),

    #[error(transparent)]
    Slice(#[from] slice_store::SliceError),

    #[error("Parameter error: {0}")]
    Params(#[from] type_mapping::TypeMappingError),
}
