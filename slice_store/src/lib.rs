//! Slice Store - parameter-keyed client state for edstats
//!
//! This crate provides the building blocks every domain slice is made of:
//! canonical query keys, keyed result stores with per-key loading state,
//! once-per-session catalog stores and single-slot memos for selectors.

pub mod catalog_store;
pub mod errors;
pub mod keyed_store;
pub mod loading;
pub mod memo;
pub mod prelude;
pub mod query_key;
pub mod traits;

pub use catalog_store::CatalogStore;
pub use errors::SliceError;
pub use keyed_store::KeyedStore;
pub use loading::LoadingState;
pub use memo::Memo;
pub use query_key::{QueryKey, EMPTY_QUERY_KEY};
pub use traits::Store;

pub(crate) fn read_lock<T>(lock: &std::sync::RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub(crate) fn write_lock<T>(lock: &std::sync::RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
