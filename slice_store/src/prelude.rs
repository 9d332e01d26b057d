//! Convenience re-exports for common slice-store usage

pub use crate::catalog_store::CatalogStore;
pub use crate::errors::SliceError;
pub use crate::keyed_store::KeyedStore;
pub use crate::loading::LoadingState;
pub use crate::memo::Memo;
pub use crate::query_key::{QueryKey, EMPTY_QUERY_KEY};
pub use crate::traits::Store;

pub use signal_system::{SignalManager, StoreEvent, StoreEventKind};
pub use type_mapping::{ParamMap, ParamValue};
