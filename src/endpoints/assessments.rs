use super::{get_rows, NamedItem};
use crate::queries::AssessmentQuery;
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type AssessmentSubject = NamedItem;

/// One assessment result row. Percentages are 0-100 and may be suppressed
/// (`None`) for small groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub year: i32,
    pub subject: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subgroup: Option<String>,
    #[serde(default)]
    pub total_fay_students: Option<i64>,
    #[serde(default)]
    pub level_1_percentage: Option<f64>,
    #[serde(default)]
    pub level_2_percentage: Option<f64>,
    #[serde(default)]
    pub level_3_percentage: Option<f64>,
    #[serde(default)]
    pub level_4_percentage: Option<f64>,
    #[serde(default)]
    pub above_proficient_percentage: Option<f64>,
    #[serde(default)]
    pub participate_percentage: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_subjects(client: &ApiClient) -> Result<Vec<AssessmentSubject>, ApiError> {
    get_rows(client, "assessments/subjects/", &()).await
}

pub async fn get_district_assessments(
    client: &ApiClient,
    query: &AssessmentQuery,
) -> Result<Vec<AssessmentResult>, ApiError> {
    get_rows(client, "assessments/district/", query).await
}

pub async fn get_school_assessments(
    client: &ApiClient,
    query: &AssessmentQuery,
) -> Result<Vec<AssessmentResult>, ApiError> {
    get_rows(client, "assessments/school/", query).await
}

pub async fn get_state_assessments(
    client: &ApiClient,
    query: &AssessmentQuery,
) -> Result<Vec<AssessmentResult>, ApiError> {
    get_rows(client, "assessments/state/", query).await
}
