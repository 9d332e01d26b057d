//! Unified mapping between Rust query types and API request parameters
//! This crate provides the parameter model shared by the HTTP client and the slice stores

pub mod serialize;
pub mod types;

pub use serialize::{serialize_to_params, TypeMappingError};
pub use types::{ParamMap, ParamValue};
