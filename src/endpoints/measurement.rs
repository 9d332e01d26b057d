use super::get_rows;
use crate::queries::{DistrictYearQuery, SchoolYearQuery};
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub measurement_type_id: i64,
    pub value: f64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_measurement_types(client: &ApiClient) -> Result<Vec<MeasurementType>, ApiError> {
    get_rows(client, "measurement/types/", &()).await
}

pub async fn get_school_measurements(
    client: &ApiClient,
    query: &SchoolYearQuery,
) -> Result<Vec<Measurement>, ApiError> {
    get_rows(client, "measurement/school/", query).await
}

pub async fn get_district_measurements(
    client: &ApiClient,
    query: &DistrictYearQuery,
) -> Result<Vec<Measurement>, ApiError> {
    get_rows(client, "measurement/district/", query).await
}
