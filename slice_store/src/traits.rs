//! Trait definitions
//!
//! Common surface of keyed and catalog stores, used to inspect or reset a
//! whole slice without knowing its row types.

use crate::LoadingState;

pub trait Store: Send + Sync {
    /// Store name, e.g. `staff.district_staff`
    fn name(&self) -> &str;

    /// Incremented on every state change
    fn revision(&self) -> u64;

    /// True while any fetch of this store is in flight
    fn is_loading(&self) -> bool;

    /// Number of cached result sets
    fn cached_sets(&self) -> usize;

    /// Drop all cached data and loading state
    fn clear(&self);

    fn overall_state(&self) -> LoadingState;
}
