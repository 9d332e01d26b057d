//! School safety and discipline data

use super::{get_rows, NamedItem};
use crate::queries::{DistrictYearQuery, SchoolYearQuery, YearQuery};
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type DisciplineIncidentType = NamedItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyRecord {
    pub safety_type_id: i64,
    pub count: i64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineIncident {
    pub incident_type_id: i64,
    pub count: i64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_safety_types(client: &ApiClient) -> Result<Vec<SafetyType>, ApiError> {
    get_rows(client, "safety/types/", &()).await
}

pub async fn get_discipline_incident_types(
    client: &ApiClient,
) -> Result<Vec<DisciplineIncidentType>, ApiError> {
    get_rows(client, "safety/discipline-incident-types/", &()).await
}

pub async fn get_school_safety(
    client: &ApiClient,
    query: &SchoolYearQuery,
) -> Result<Vec<SafetyRecord>, ApiError> {
    get_rows(client, "safety/school/", query).await
}

pub async fn get_district_safety(
    client: &ApiClient,
    query: &DistrictYearQuery,
) -> Result<Vec<SafetyRecord>, ApiError> {
    get_rows(client, "safety/district/", query).await
}

pub async fn get_state_safety(client: &ApiClient, query: &YearQuery) -> Result<Vec<SafetyRecord>, ApiError> {
    get_rows(client, "safety/state/", query).await
}

pub async fn get_district_discipline_incidents(
    client: &ApiClient,
    query: &DistrictYearQuery,
) -> Result<Vec<DisciplineIncident>, ApiError> {
    get_rows(client, "safety/district/discipline-incidents/", query).await
}
