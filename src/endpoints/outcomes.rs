use super::get_rows;
use crate::queries::OutcomeQuery;
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationOutcome {
    pub year: i32,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub cohort_size: Option<i64>,
    #[serde(default)]
    pub graduates: Option<i64>,
    #[serde(default)]
    pub graduation_rate: Option<f64>,
    #[serde(default)]
    pub dropout_rate: Option<f64>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_district_graduation(
    client: &ApiClient,
    query: &OutcomeQuery,
) -> Result<Vec<GraduationOutcome>, ApiError> {
    get_rows(client, "outcomes/district/graduation/", query).await
}

pub async fn get_school_graduation(
    client: &ApiClient,
    query: &OutcomeQuery,
) -> Result<Vec<GraduationOutcome>, ApiError> {
    get_rows(client, "outcomes/school/graduation/", query).await
}

pub async fn get_state_graduation(
    client: &ApiClient,
    query: &OutcomeQuery,
) -> Result<Vec<GraduationOutcome>, ApiError> {
    get_rows(client, "outcomes/state/graduation/", query).await
}
