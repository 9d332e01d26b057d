use super::get_rows;
use crate::queries::LocationQuery;
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sau: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub sau: Option<i64>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Town {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_districts(client: &ApiClient, query: &LocationQuery) -> Result<Vec<District>, ApiError> {
    get_rows(client, "location/districts/", query).await
}

pub async fn get_schools(client: &ApiClient, query: &LocationQuery) -> Result<Vec<School>, ApiError> {
    get_rows(client, "location/schools/", query).await
}

pub async fn get_towns(client: &ApiClient, query: &LocationQuery) -> Result<Vec<Town>, ApiError> {
    get_rows(client, "location/towns/", query).await
}
