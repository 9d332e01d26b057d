//! Finance reports and per-pupil expenditure

use super::{get_rows, NamedItem};
use crate::queries::{DistrictYearQuery, YearQuery};
use api_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Line item classification of a finance report (revenue/expenditure/...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type FundType = NamedItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub entry_type_id: i64,
    #[serde(default)]
    pub fund_type_id: Option<i64>,
    pub value: f64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// District rows carry `district_id`; state rows leave it empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerPupilExpenditure {
    #[serde(default)]
    pub district_id: Option<i64>,
    pub year: i32,
    pub amount: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub async fn get_entry_types(client: &ApiClient) -> Result<Vec<EntryType>, ApiError> {
    get_rows(client, "finance/entry-types/", &()).await
}

pub async fn get_fund_types(client: &ApiClient) -> Result<Vec<FundType>, ApiError> {
    get_rows(client, "finance/fund-types/", &()).await
}

pub async fn get_finance_report(
    client: &ApiClient,
    query: &DistrictYearQuery,
) -> Result<Vec<FinanceEntry>, ApiError> {
    get_rows(client, "finance/report/", query).await
}

pub async fn get_per_pupil_expenditure(
    client: &ApiClient,
    query: &YearQuery,
) -> Result<Vec<PerPupilExpenditure>, ApiError> {
    get_rows(client, "finance/per-pupil-expenditure/", query).await
}

pub async fn get_state_per_pupil_expenditure(
    client: &ApiClient,
    query: &YearQuery,
) -> Result<Vec<PerPupilExpenditure>, ApiError> {
    get_rows(client, "finance/state-per-pupil-expenditure/", query).await
}
