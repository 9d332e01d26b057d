//! Canonical query keys
//!
//! A [`QueryKey`] is the sole identity used for cache and loading-state lookups.
//! Absent parameters are dropped, the rest are sorted by name and rendered as
//! `name=value` pairs joined with `&`. Names and text values are
//! form-urlencoded; lists and objects render as sorted JSON. An empty
//! parameter set maps to [`EMPTY_QUERY_KEY`] so it never collides with "no key".

use crate::errors::SliceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use type_mapping::{serialize_to_params, ParamMap, ParamValue};
use url::form_urlencoded::byte_serialize;

/// Key used for a parameterless fetch
pub const EMPTY_QUERY_KEY: &str = "__all__";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(String);

impl QueryKey {
    /// Canonicalize a serializable query struct
    pub fn from_params<P: Serialize + ?Sized>(params: &P) -> Result<Self, SliceError> {
        let map = serialize_to_params(params)?;
        Ok(Self::from_param_map(&map))
    }

    /// Canonicalize an already built parameter map
    pub fn from_param_map(params: &ParamMap) -> Self {
        if params.is_empty() {
            return Self(EMPTY_QUERY_KEY.to_string());
        }

        let joined = params
            .iter()
            .map(|(name, value)| format!("{}={}", encode(name), render_value(value)))
            .collect::<Vec<_>>()
            .join("&");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty_params(&self) -> bool {
        self.0 == EMPTY_QUERY_KEY
    }
}

fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

// Escaped text can never start with `[` or `{`, so it stays apart from nested values
fn render_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Text(text) => encode(text),
        other => other.render(),
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QueryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct DistrictYear {
        district_id: Option<i64>,
        year: Option<i32>,
    }

    #[derive(Serialize)]
    struct YearDistrict {
        year: Option<i32>,
        district_id: Option<i64>,
        grade: Option<String>,
    }

    #[test]
    fn test_property_order_does_not_matter() {
        let a = QueryKey::from_params(&DistrictYear {
            district_id: Some(5),
            year: Some(2023),
        })
        .unwrap();
        let b = QueryKey::from_params(&YearDistrict {
            year: Some(2023),
            district_id: Some(5),
            grade: None,
        })
        .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "district_id=5&year=2023");
    }

    #[test]
    fn test_absent_values_are_dropped() {
        let with_absent = QueryKey::from_params(&json!({
            "year": 2023,
            "district_id": null,
            "school_id": null
        }))
        .unwrap();
        let without = QueryKey::from_params(&json!({ "year": 2023 })).unwrap();
        assert_eq!(with_absent, without);
    }

    #[test]
    fn test_empty_params_use_sentinel() {
        let empty = QueryKey::from_params(&json!({})).unwrap();
        let all_absent = QueryKey::from_params(&DistrictYear {
            district_id: None,
            year: None,
        })
        .unwrap();
        let unit = QueryKey::from_params(&()).unwrap();

        for key in [empty, all_absent, unit] {
            assert_eq!(key.as_str(), EMPTY_QUERY_KEY);
            assert!(!key.as_str().is_empty());
            assert!(key.is_empty_params());
        }
    }

    #[test]
    fn test_nested_values_do_not_collide() {
        let a = QueryKey::from_params(&json!({ "filter": { "grade": 3 } })).unwrap();
        let b = QueryKey::from_params(&json!({ "filter": { "grade": 4 } })).unwrap();
        let c = QueryKey::from_params(&json!({ "filter": [3] })).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), r#"filter={"grade":3}"#);
    }

    #[test]
    fn test_text_is_distinct_from_nested_value() {
        let text = QueryKey::from_params(&json!({ "filter": "[3]" })).unwrap();
        let list = QueryKey::from_params(&json!({ "filter": [3] })).unwrap();

        assert_ne!(text, list);
        assert_eq!(list.as_str(), "filter=[3]");
        assert_eq!(text.as_str(), "filter=%5B3%5D");
    }

    #[test]
    fn test_separators_in_text_cannot_forge_pairs() {
        let forged = QueryKey::from_params(&json!({ "subgroup": "x&year=2020" })).unwrap();
        let real = QueryKey::from_params(&json!({ "subgroup": "x", "year": 2020 })).unwrap();

        assert_ne!(forged, real);
        assert_eq!(real.as_str(), "subgroup=x&year=2020");
        assert_eq!(forged.as_str(), "subgroup=x%26year%3D2020");
    }

    #[test]
    fn test_plain_text_values_are_unchanged() {
        let key = QueryKey::from_params(&json!({ "subject": "Math", "grade": "3" })).unwrap();
        assert_eq!(key.as_str(), "grade=3&subject=Math");
    }

    #[test]
    fn test_from_param_map_matches_from_params() {
        let mut map = ParamMap::new();
        map.insert("year", ParamValue::Integer(2023))
            .insert("district_id", 5);
        let via_struct = QueryKey::from_params(&DistrictYear {
            district_id: Some(5),
            year: Some(2023),
        })
        .unwrap();
        assert_eq!(QueryKey::from_param_map(&map), via_struct);
    }

    #[test]
    fn test_scalar_params_rejected() {
        assert!(matches!(
            QueryKey::from_params(&42),
            Err(SliceError::Params(_))
        ));
    }
}
