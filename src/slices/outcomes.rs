//! Graduation outcomes slice

use super::{memo_key, Slice};
use crate::endpoints::outcomes::{self, GraduationOutcome};
use crate::queries::OutcomeQuery;
use crate::selectors::outcomes::{graduation_series, SeriesPoint};
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{KeyedStore, Memo, Store};
use std::sync::Arc;

pub struct OutcomesSlice {
    client: Arc<ApiClient>,
    district: KeyedStore<GraduationOutcome>,
    school: KeyedStore<GraduationOutcome>,
    state: KeyedStore<GraduationOutcome>,
    district_series: Memo<Vec<SeriesPoint>>,
    state_series: Memo<Vec<SeriesPoint>>,
}

impl OutcomesSlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            district: KeyedStore::new("outcomes.district_graduation", signals.clone()),
            school: KeyedStore::new("outcomes.school_graduation", signals.clone()),
            state: KeyedStore::new("outcomes.state_graduation", signals),
            district_series: Memo::new(),
            state_series: Memo::new(),
        }
    }

    keyed_fetch! {
        fetch_district_graduation, select_district_graduation, district_graduation_status
            => district: OutcomeQuery => GraduationOutcome, outcomes::get_district_graduation
    }

    keyed_fetch! {
        fetch_school_graduation, select_school_graduation, school_graduation_status
            => school: OutcomeQuery => GraduationOutcome, outcomes::get_school_graduation
    }

    keyed_fetch! {
        fetch_state_graduation, select_state_graduation, state_graduation_status
            => state: OutcomeQuery => GraduationOutcome, outcomes::get_state_graduation
    }

    pub fn select_district_graduation_series(&self, query: &OutcomeQuery) -> Arc<Vec<SeriesPoint>> {
        self.district_series
            .get_or_compute(&memo_key(query), &[self.district.revision()], || {
                graduation_series(&self.district.select(query))
            })
    }

    pub fn select_state_graduation_series(&self, query: &OutcomeQuery) -> Arc<Vec<SeriesPoint>> {
        self.state_series
            .get_or_compute(&memo_key(query), &[self.state.revision()], || {
                graduation_series(&self.state.select(query))
            })
    }
}

impl Slice for OutcomesSlice {
    fn name(&self) -> &'static str {
        "outcomes"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![&self.district, &self.school, &self.state]
    }
}
