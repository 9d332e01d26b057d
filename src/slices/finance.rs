//! Finance slice
//!
//! Reports reference both type catalogs, so fetching a report first makes
//! sure the entry and fund types are loaded.

use super::{memo_key, Slice};
use crate::endpoints::finance::{self, EntryType, FinanceEntry, FundType, PerPupilExpenditure};
use crate::errors::EdstatsError;
use crate::queries::{DistrictYearQuery, YearQuery};
use crate::selectors::finance::{totals_by_entry_type, EntryTotal};
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{CatalogStore, KeyedStore, LoadingState, Memo, SliceError, Store};
use std::sync::Arc;

pub struct FinanceSlice {
    client: Arc<ApiClient>,
    entry_types: CatalogStore<EntryType>,
    fund_types: CatalogStore<FundType>,
    reports: KeyedStore<FinanceEntry>,
    per_pupil: KeyedStore<PerPupilExpenditure>,
    state_per_pupil: KeyedStore<PerPupilExpenditure>,
    entry_totals: Memo<Vec<EntryTotal>>,
}

impl FinanceSlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            entry_types: CatalogStore::new("finance.entry_types", signals.clone()),
            fund_types: CatalogStore::new("finance.fund_types", signals.clone()),
            reports: KeyedStore::new("finance.reports", signals.clone()),
            per_pupil: KeyedStore::new("finance.per_pupil", signals.clone()),
            state_per_pupil: KeyedStore::new("finance.state_per_pupil", signals),
            entry_totals: Memo::new(),
        }
    }

    catalog_loader! {
        ensure_entry_types_loaded, entry_types, entry_types_status
            => entry_types: EntryType, finance::get_entry_types
    }

    catalog_loader! {
        ensure_fund_types_loaded, fund_types, fund_types_status
            => fund_types: FundType, finance::get_fund_types
    }

    /// Load both type catalogs concurrently. Both loads run to completion
    /// before the first error is returned.
    pub async fn ensure_types_loaded(&self, force: bool) -> Result<(), SliceError> {
        let (entry_types, fund_types) = futures::join!(
            self.ensure_entry_types_loaded(force),
            self.ensure_fund_types_loaded(force)
        );
        entry_types?;
        fund_types?;
        Ok(())
    }

    /// Finance report for one district and year.
    ///
    /// The key is marked loading before the type catalogs are ensured; a
    /// catalog failure fails the report fetch.
    pub async fn fetch_finance_report(
        &self,
        query: &DistrictYearQuery,
        force_refresh: bool,
    ) -> Result<Arc<Vec<FinanceEntry>>, SliceError> {
        self.reports
            .fetch(query, force_refresh, || async move {
                self.ensure_types_loaded(false).await?;
                Ok::<_, EdstatsError>(finance::get_finance_report(&self.client, query).await?)
            })
            .await
    }

    pub fn select_finance_report(&self, query: &DistrictYearQuery) -> Arc<Vec<FinanceEntry>> {
        self.reports.select(query)
    }

    pub fn finance_report_status(&self, query: &DistrictYearQuery) -> LoadingState {
        self.reports.status(query)
    }

    pub fn finance_report_error(&self, query: &DistrictYearQuery) -> Option<String> {
        self.reports.error(query)
    }

    keyed_fetch! {
        /// Per-pupil expenditure of every district
        fetch_per_pupil_expenditure, select_per_pupil_expenditure, per_pupil_expenditure_status
            => per_pupil: YearQuery => PerPupilExpenditure, finance::get_per_pupil_expenditure
    }

    keyed_fetch! {
        fetch_state_per_pupil_expenditure, select_state_per_pupil_expenditure, state_per_pupil_expenditure_status
            => state_per_pupil: YearQuery => PerPupilExpenditure, finance::get_state_per_pupil_expenditure
    }

    /// Report totals per entry type
    pub fn select_entry_totals(&self, query: &DistrictYearQuery) -> Arc<Vec<EntryTotal>> {
        self.entry_totals.get_or_compute(
            &memo_key(query),
            &[self.reports.revision(), self.entry_types.revision()],
            || totals_by_entry_type(&self.reports.select(query), &self.entry_types.items()),
        )
    }

    pub fn per_pupil_revision(&self) -> u64 {
        self.per_pupil.revision()
    }

    /// Number of times the entry totals were recomputed
    pub fn entry_totals_computations(&self) -> u64 {
        self.entry_totals.computations()
    }
}

impl Slice for FinanceSlice {
    fn name(&self) -> &'static str {
        "finance"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![
            &self.entry_types,
            &self.fund_types,
            &self.reports,
            &self.per_pupil,
            &self.state_per_pupil,
        ]
    }
}
