//! Convenience re-exports for common cache-system usage

pub use crate::errors::CacheError;
pub use crate::manager::{CacheManager, CacheStats, SharedClock};

// Re-export centralized config
pub use config::CacheConfig;
