use super::get_rows;
use crate::queries::{DistrictYearQuery, SchoolYearQuery, YearQuery};
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Average class size for one grade band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSize {
    pub grade: String,
    pub average_class_size: f64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_district_class_size(
    client: &ApiClient,
    query: &DistrictYearQuery,
) -> Result<Vec<ClassSize>, ApiError> {
    get_rows(client, "class-size/district/", query).await
}

pub async fn get_school_class_size(
    client: &ApiClient,
    query: &SchoolYearQuery,
) -> Result<Vec<ClassSize>, ApiError> {
    get_rows(client, "class-size/school/", query).await
}

pub async fn get_state_class_size(client: &ApiClient, query: &YearQuery) -> Result<Vec<ClassSize>, ApiError> {
    get_rows(client, "class-size/state/", query).await
}
