//! Endpoint modules, one per backend resource area
//!
//! Every function builds request parameters from a typed query and issues a
//! GET through [`ApiClient`]. Paths are relative to the versioned base URL.

pub mod assessments;
pub mod class_size;
pub mod finance;
pub mod location;
pub mod measurement;
pub mod outcomes;
pub mod safety;
pub mod staff;

use crate::queries::ToParams;
use api_client::{ApiClient, ApiError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic catalog entry (id + display name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub(crate) async fn get_rows<T, Q>(client: &ApiClient, path: &str, query: &Q) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    Q: ToParams + ?Sized,
{
    let params = query.to_params();
    crate::trace_log!("GET {} with {}", path, params.to_json());
    client.get_json(path, &params).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_item_keeps_unknown_fields() {
        let item: NamedItem = serde_json::from_value(json!({
            "id": 3,
            "name": "General Fund",
            "code": "GF"
        }))
        .unwrap();

        assert_eq!(item.name, "General Fund");
        assert_eq!(item.description, None);
        assert_eq!(item.extra.get("code"), Some(&json!("GF")));
    }
}
