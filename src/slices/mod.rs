//! Domain slices
//!
//! Each slice exclusively owns the keyed result stores and reference catalogs
//! of one resource area, plus the memos behind its selectors. Fetches check
//! the slice cache first and only fall through to the endpoint module when the
//! key has no entry or a refresh is forced.

/// Generates `fetch_*`, `select_*` and `*_status` for one keyed store
macro_rules! keyed_fetch {
    (
        $(#[$meta:meta])*
        $fetch:ident, $select:ident, $status:ident
            => $store:ident: $query:ty => $row:ty, $endpoint:path
    ) => {
        $(#[$meta])*
        pub async fn $fetch(
            &self,
            query: &$query,
            force_refresh: bool,
        ) -> Result<std::sync::Arc<Vec<$row>>, slice_store::SliceError> {
            self.$store
                .fetch(query, force_refresh, || $endpoint(&self.client, query))
                .await
        }

        pub fn $select(&self, query: &$query) -> std::sync::Arc<Vec<$row>> {
            self.$store.select(query)
        }

        pub fn $status(&self, query: &$query) -> slice_store::LoadingState {
            self.$store.status(query)
        }
    };
}

/// Generates `ensure_*_loaded`, the items accessor and `*_status` for one catalog
macro_rules! catalog_loader {
    (
        $(#[$meta:meta])*
        $ensure:ident, $items:ident, $status:ident => $store:ident: $row:ty, $endpoint:path
    ) => {
        $(#[$meta])*
        pub async fn $ensure(
            &self,
            force: bool,
        ) -> Result<std::sync::Arc<Vec<$row>>, slice_store::SliceError> {
            self.$store
                .ensure_loaded(force, || $endpoint(&self.client))
                .await
        }

        pub fn $items(&self) -> std::sync::Arc<Vec<$row>> {
            self.$store.items()
        }

        pub fn $status(&self) -> slice_store::LoadingState {
            self.$store.status()
        }
    };
}

pub mod assessments;
pub mod class_size;
pub mod finance;
pub mod location;
pub mod measurement;
pub mod outcomes;
pub mod safety;
pub mod staff;

pub use assessments::AssessmentsSlice;
pub use class_size::ClassSizeSlice;
pub use finance::FinanceSlice;
pub use location::LocationSlice;
pub use measurement::MeasurementSlice;
pub use outcomes::OutcomesSlice;
pub use safety::SafetySlice;
pub use staff::StaffSlice;

use serde::Serialize;
use slice_store::{LoadingState, QueryKey, Store};

/// Common surface of every slice
pub trait Slice: Send + Sync {
    fn name(&self) -> &'static str;

    fn stores(&self) -> Vec<&dyn Store>;

    /// True while any store of the slice has a fetch in flight
    fn is_loading(&self) -> bool {
        self.stores().iter().any(|store| store.is_loading())
    }

    /// Drop every cached result set and catalog of the slice
    fn clear(&self) {
        for store in self.stores() {
            store.clear();
        }
        crate::debug_log!("cleared slice {}", self.name());
    }

    fn overall_state(&self) -> LoadingState {
        let states: Vec<LoadingState> = self.stores().iter().map(|s| s.overall_state()).collect();
        [
            LoadingState::Loading,
            LoadingState::Failed,
            LoadingState::Succeeded,
        ]
        .into_iter()
        .find(|wanted| states.contains(wanted))
        .unwrap_or_default()
    }
}

/// Memo key for one or more queries
pub(crate) fn memo_key<P: Serialize + ?Sized>(query: &P) -> String {
    QueryKey::from_params(query)
        .map(|key| key.to_string())
        .unwrap_or_default()
}
