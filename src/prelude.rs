//! Convenience re-exports for common edstats usage
//!
//! ```rust
//! use edstats::prelude::*;
//! ```

// Core session components
pub use crate::core::Dashboard;
pub use crate::errors::EdstatsError;
pub use crate::queries::{
    AssessmentQuery, DistrictYearQuery, LocationQuery, OutcomeQuery, SchoolYearQuery, ToParams,
    YearQuery,
};
pub use crate::slices::Slice;

// Re-export centralized config
pub use config::{ApiConfig, AppConfig, AuthConfig, CacheConfig, SessionConfig};

pub use api_client::prelude::*;
pub use cache_system::prelude::*;
pub use signal_system::prelude::*;
pub use slice_store::prelude::*;

// Common external dependencies
pub use anyhow;
pub use tokio;
