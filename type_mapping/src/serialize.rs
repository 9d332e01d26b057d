//! Serialization utilities
//!
//! This module converts typed query structs into [`ParamMap`]s.

use crate::types::{ParamMap, ParamValue};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypeMappingError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Query parameters must serialize to an object, got {0}")]
    NotAnObject(&'static str),
}

/// Convert a serializable query struct into a parameter map.
///
/// Fields that serialize to `null` (i.e. `None`) are dropped, matching the
/// "absent parameter" semantics of the API. A unit value yields an empty map.
pub fn serialize_to_params<T: Serialize + ?Sized>(data: &T) -> Result<ParamMap, TypeMappingError> {
    match serde_json::to_value(data)? {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key, ParamValue::from(value)))
            .collect()),
        serde_json::Value::Null => Ok(ParamMap::new()),
        serde_json::Value::Bool(_) => Err(TypeMappingError::NotAnObject("boolean")),
        serde_json::Value::Number(_) => Err(TypeMappingError::NotAnObject("number")),
        serde_json::Value::String(_) => Err(TypeMappingError::NotAnObject("string")),
        serde_json::Value::Array(_) => Err(TypeMappingError::NotAnObject("array")),
    }
}
