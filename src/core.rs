//! Core Dashboard functionality
//!
//! [`Dashboard`] is the session: it owns the configuration, the shared API
//! client, the signal manager and every domain slice. Dropping it drops both
//! caching tiers.

use api_client::{ApiClient, FileTokenStorage, MemoryTokenStorage, TokenStorage};
use cache_system::CacheManager;
use config::{AppConfig, SessionConfig};
use signal_system::SignalManager;
use slice_store::{LoadingState, Memo};
use std::sync::Arc;

use crate::errors::EdstatsError;
use crate::queries::{AssessmentQuery, DistrictYearQuery, LocationQuery, OutcomeQuery, YearQuery};
use crate::selectors::finance::{rank_per_pupil, RankedDistrict};
use crate::slices::{
    AssessmentsSlice, ClassSizeSlice, FinanceSlice, LocationSlice, MeasurementSlice,
    OutcomesSlice, SafetySlice, Slice, StaffSlice,
};

pub struct Dashboard {
    config: AppConfig,
    client: Arc<ApiClient>,
    signals: Arc<SignalManager>,
    location: LocationSlice,
    finance: FinanceSlice,
    assessments: AssessmentsSlice,
    measurement: MeasurementSlice,
    safety: SafetySlice,
    staff: StaffSlice,
    outcomes: OutcomesSlice,
    class_size: ClassSizeSlice,
    per_pupil_ranking: Memo<Vec<RankedDistrict>>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("base_url", &self.config.api.base_url)
            .field("session", &self.config.session)
            .field("callbacks", &self.signals.callback_count())
            .finish()
    }
}

impl Dashboard {
    /// Build a session from configuration: response cache, token storage and client
    pub fn new(config: AppConfig) -> Result<Self, EdstatsError> {
        config.validate()?;

        let cache = CacheManager::new(config.cache.clone())?;
        let storage: Arc<dyn TokenStorage> = match &config.auth.token_path {
            Some(path) => Arc::new(FileTokenStorage::new(path)),
            None => Arc::new(MemoryTokenStorage::new()),
        };
        let client = ApiClient::new(&config.api, cache, storage)?;

        Ok(Self::with_client(config, client))
    }

    /// Build a session from the TOML file or environment
    pub fn load() -> Result<Self, EdstatsError> {
        let config = match AppConfig::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(error = %err, "no config file, reading environment");
                AppConfig::from_env()?
            }
        };
        Self::new(config)
    }

    /// Build a session around an already configured client
    pub fn with_client(config: AppConfig, client: ApiClient) -> Self {
        let client = Arc::new(client);
        let signals = Arc::new(SignalManager::new());
        let shared = Some(signals.clone());

        client.on_logout(|| tracing::warn!("session logged out after failed token refresh"));

        Self {
            location: LocationSlice::new(client.clone(), shared.clone()),
            finance: FinanceSlice::new(client.clone(), shared.clone()),
            assessments: AssessmentsSlice::new(client.clone(), shared.clone()),
            measurement: MeasurementSlice::new(client.clone(), shared.clone()),
            safety: SafetySlice::new(client.clone(), shared.clone()),
            staff: StaffSlice::new(client.clone(), shared.clone()),
            outcomes: OutcomesSlice::new(client.clone(), shared.clone()),
            class_size: ClassSizeSlice::new(client.clone(), shared),
            per_pupil_ranking: Memo::new(),
            config,
            client,
            signals,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionConfig {
        &self.config.session
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn signals(&self) -> &Arc<SignalManager> {
        &self.signals
    }

    pub fn location(&self) -> &LocationSlice {
        &self.location
    }

    pub fn finance(&self) -> &FinanceSlice {
        &self.finance
    }

    pub fn assessments(&self) -> &AssessmentsSlice {
        &self.assessments
    }

    pub fn measurement(&self) -> &MeasurementSlice {
        &self.measurement
    }

    pub fn safety(&self) -> &SafetySlice {
        &self.safety
    }

    pub fn staff(&self) -> &StaffSlice {
        &self.staff
    }

    pub fn outcomes(&self) -> &OutcomesSlice {
        &self.outcomes
    }

    pub fn class_size(&self) -> &ClassSizeSlice {
        &self.class_size
    }

    pub fn slices(&self) -> Vec<&dyn Slice> {
        vec![
            &self.location,
            &self.finance,
            &self.assessments,
            &self.measurement,
            &self.safety,
            &self.staff,
            &self.outcomes,
            &self.class_size,
        ]
    }

    pub fn is_loading(&self) -> bool {
        self.slices().iter().any(|slice| slice.is_loading())
    }

    /// Loading state per slice name
    pub fn overview(&self) -> Vec<(&'static str, LoadingState)> {
        self.slices()
            .iter()
            .map(|slice| (slice.name(), slice.overall_state()))
            .collect()
    }

    /// Drop every slice cache and the HTTP response cache
    pub async fn reset(&self) {
        for slice in self.slices() {
            slice.clear();
        }
        self.client.cache().clear().await;
        tracing::info!("dashboard caches reset");
    }

    /// District query for the configured fiscal year
    pub fn fiscal_year_query(&self, district_id: i64) -> DistrictYearQuery {
        DistrictYearQuery::new(district_id, self.config.session.fiscal_year)
    }

    /// District assessment query for the configured assessment year
    pub fn assessment_query(&self, district_id: i64) -> AssessmentQuery {
        AssessmentQuery::district(district_id, self.config.session.assessment_year)
    }

    /// Graduation query for the configured graduation grade label
    pub fn graduation_query(&self, district_id: Option<i64>, year: Option<i32>) -> OutcomeQuery {
        OutcomeQuery {
            district_id,
            school_id: None,
            year,
            grade: Some(self.config.session.graduation_grade.clone()),
        }
    }

    /// Fetch the district listing and per-pupil figures, then rank them
    pub async fn fetch_per_pupil_ranking(
        &self,
        query: &YearQuery,
        force_refresh: bool,
    ) -> Result<Arc<Vec<RankedDistrict>>, EdstatsError> {
        let all_districts = LocationQuery::default();
        let (districts, spending) = futures::join!(
            self.location.fetch_districts(&all_districts, false),
            self.finance.fetch_per_pupil_expenditure(query, force_refresh)
        );
        districts?;
        spending?;
        Ok(self.select_per_pupil_ranking(query))
    }

    pub fn select_per_pupil_ranking(&self, query: &YearQuery) -> Arc<Vec<RankedDistrict>> {
        let key = crate::slices::memo_key(query);
        self.per_pupil_ranking.get_or_compute(
            &key,
            &[self.finance.per_pupil_revision(), self.location.revision()],
            || {
                rank_per_pupil(
                    &self.finance.select_per_pupil_expenditure(query),
                    &self.location.select_districts(&LocationQuery::default()),
                )
            },
        )
    }
}
