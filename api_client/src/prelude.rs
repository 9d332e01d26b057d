//! Convenience re-exports for common api-client usage

pub use crate::client::{ApiClient, RequestOptions, ACCESS_TOKEN_KEY};
pub use crate::errors::{ApiError, StorageError};
pub use crate::storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};

pub use cache_system::CacheManager;
pub use config::ApiConfig;
pub use type_mapping::{ParamMap, ParamValue};
