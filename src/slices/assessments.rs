//! Assessment slice

use super::{memo_key, Slice};
use crate::endpoints::assessments::{self, AssessmentResult, AssessmentSubject};
use crate::errors::EdstatsError;
use crate::queries::AssessmentQuery;
use crate::selectors::assessments::{compare_proficiency, ProficiencyComparison};
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{CatalogStore, KeyedStore, Memo, Store};
use std::sync::Arc;

pub struct AssessmentsSlice {
    client: Arc<ApiClient>,
    subjects: CatalogStore<AssessmentSubject>,
    district: KeyedStore<AssessmentResult>,
    school: KeyedStore<AssessmentResult>,
    state: KeyedStore<AssessmentResult>,
    district_comparison: Memo<Vec<ProficiencyComparison>>,
}

impl AssessmentsSlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            subjects: CatalogStore::new("assessments.subjects", signals.clone()),
            district: KeyedStore::new("assessments.district", signals.clone()),
            school: KeyedStore::new("assessments.school", signals.clone()),
            state: KeyedStore::new("assessments.state", signals),
            district_comparison: Memo::new(),
        }
    }

    catalog_loader! {
        ensure_subjects_loaded, subjects, subjects_status
            => subjects: AssessmentSubject, assessments::get_subjects
    }

    keyed_fetch! {
        fetch_district_assessments, select_district_assessments, district_assessments_status
            => district: AssessmentQuery => AssessmentResult, assessments::get_district_assessments
    }

    keyed_fetch! {
        fetch_school_assessments, select_school_assessments, school_assessments_status
            => school: AssessmentQuery => AssessmentResult, assessments::get_school_assessments
    }

    keyed_fetch! {
        fetch_state_assessments, select_state_assessments, state_assessments_status
            => state: AssessmentQuery => AssessmentResult, assessments::get_state_assessments
    }

    /// Fetch district results and their state counterpart concurrently
    pub async fn fetch_district_comparison(
        &self,
        query: &AssessmentQuery,
        force_refresh: bool,
    ) -> Result<Arc<Vec<ProficiencyComparison>>, EdstatsError> {
        let state_query = query.state_counterpart();
        let (district, state) = futures::join!(
            self.fetch_district_assessments(query, force_refresh),
            self.fetch_state_assessments(&state_query, force_refresh)
        );
        district?;
        state?;
        Ok(self.select_district_comparison(query))
    }

    /// District proficiency next to the state figures for the same filters
    pub fn select_district_comparison(&self, query: &AssessmentQuery) -> Arc<Vec<ProficiencyComparison>> {
        let state_query = query.state_counterpart();
        self.district_comparison.get_or_compute(
            &memo_key(query),
            &[self.district.revision(), self.state.revision()],
            || compare_proficiency(&self.district.select(query), &self.state.select(&state_query)),
        )
    }
}

impl Slice for AssessmentsSlice {
    fn name(&self) -> &'static str {
        "assessments"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![&self.subjects, &self.district, &self.school, &self.state]
    }
}
