//! Staffing levels and teacher education

use super::{get_rows, NamedItem};
use crate::queries::{DistrictYearQuery, SchoolYearQuery, YearQuery};
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type TeacherEducationType = NamedItem;

/// Full-time equivalent count for one staff type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub staff_type_id: i64,
    pub value: f64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherEducation {
    pub education_type_id: i64,
    pub value: f64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_staff_types(client: &ApiClient) -> Result<Vec<StaffType>, ApiError> {
    get_rows(client, "staff/types/", &()).await
}

pub async fn get_teacher_education_types(
    client: &ApiClient,
) -> Result<Vec<TeacherEducationType>, ApiError> {
    get_rows(client, "staff/teacher-education-types/", &()).await
}

pub async fn get_district_staff(
    client: &ApiClient,
    query: &DistrictYearQuery,
) -> Result<Vec<StaffRecord>, ApiError> {
    get_rows(client, "staff/district/", query).await
}

pub async fn get_school_staff(
    client: &ApiClient,
    query: &SchoolYearQuery,
) -> Result<Vec<StaffRecord>, ApiError> {
    get_rows(client, "staff/school/", query).await
}

pub async fn get_state_staff(client: &ApiClient, query: &YearQuery) -> Result<Vec<StaffRecord>, ApiError> {
    get_rows(client, "staff/state/", query).await
}

pub async fn get_district_teacher_education(
    client: &ApiClient,
    query: &DistrictYearQuery,
) -> Result<Vec<TeacherEducation>, ApiError> {
    get_rows(client, "staff/district/teacher-education/", query).await
}

pub async fn get_state_teacher_education(
    client: &ApiClient,
    query: &YearQuery,
) -> Result<Vec<TeacherEducation>, ApiError> {
    get_rows(client, "staff/state/teacher-education/", query).await
}
