use super::{memo_key, Slice};
use crate::endpoints::class_size::{self, ClassSize};
use crate::queries::{DistrictYearQuery, SchoolYearQuery, YearQuery};
use crate::selectors::class_size::{compare_class_sizes, overall_average, ClassSizeComparison};
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{KeyedStore, Memo, Store};
use std::sync::Arc;

pub struct ClassSizeSlice {
    client: Arc<ApiClient>,
    district: KeyedStore<ClassSize>,
    school: KeyedStore<ClassSize>,
    state: KeyedStore<ClassSize>,
    district_average: Memo<Option<f64>>,
    district_comparison: Memo<Vec<ClassSizeComparison>>,
}

impl ClassSizeSlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            district: KeyedStore::new("class_size.district", signals.clone()),
            school: KeyedStore::new("class_size.school", signals.clone()),
            state: KeyedStore::new("class_size.state", signals),
            district_average: Memo::new(),
            district_comparison: Memo::new(),
        }
    }

    keyed_fetch! {
        fetch_district_class_size, select_district_class_size, district_class_size_status
            => district: DistrictYearQuery => ClassSize, class_size::get_district_class_size
    }

    keyed_fetch! {
        fetch_school_class_size, select_school_class_size, school_class_size_status
            => school: SchoolYearQuery => ClassSize, class_size::get_school_class_size
    }

    keyed_fetch! {
        fetch_state_class_size, select_state_class_size, state_class_size_status
            => state: YearQuery => ClassSize, class_size::get_state_class_size
    }

    pub fn select_district_average(&self, query: &DistrictYearQuery) -> Option<f64> {
        *self
            .district_average
            .get_or_compute(&memo_key(query), &[self.district.revision()], || {
                overall_average(&self.district.select(query))
            })
    }

    /// District grade averages next to the state averages of the same year
    pub fn select_district_comparison(&self, query: &DistrictYearQuery) -> Arc<Vec<ClassSizeComparison>> {
        let state_query = YearQuery { year: query.year };
        self.district_comparison.get_or_compute(
            &memo_key(query),
            &[self.district.revision(), self.state.revision()],
            || compare_class_sizes(&self.district.select(query), &self.state.select(&state_query)),
        )
    }
}

impl Slice for ClassSizeSlice {
    fn name(&self) -> &'static str {
        "class_size"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![&self.district, &self.school, &self.state]
    }
}
