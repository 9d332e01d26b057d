//! # edstats
//!
//! Typed client for the New Hampshire education statistics API.
//!
//! Data flows through two independent caching tiers: each domain slice keeps
//! the last result per canonical query key with its own loading state, and the
//! shared API client keeps a short-lived response cache keyed by URL and
//! parameters beneath it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edstats::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dashboard = Dashboard::new(AppConfig {
//!         api: ApiConfig::new("https://edstats.example.org/api/v1/".to_string()),
//!         cache: CacheConfig::default(),
//!         auth: AuthConfig::default(),
//!         session: SessionConfig::new(2023, 2023, "Grade 12".to_string()),
//!     })?;
//!
//!     let query = DistrictYearQuery::new(5, 2023);
//!     dashboard.staff().fetch_district_staff_data(&query, false).await?;
//!
//!     for total in dashboard.staff().select_district_staff_totals(&query).iter() {
//!         println!("{}: {}", total.name, total.total);
//!     }
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod endpoints;
pub mod errors;
pub mod prelude;
pub mod queries;
pub mod selectors;
pub mod slices;

// Re-export the main public types for convenience
pub use core::Dashboard;
pub use errors::EdstatsError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, SessionConfig};

// Re-export internal crates used in the public API
pub use api_client;
pub use cache_system;
pub use signal_system;
pub use slice_store;
pub use type_mapping;
