use thiserror::Error;
use type_mapping::TypeMappingError;

#[derive(Error, Debug, Clone)]
pub enum SliceError {
    /// The endpoint call failed. `message` is the plain error text kept by the store.
    #[error("{store} fetch failed for {key}: {message}")]
    Fetch {
        store: String,
        key: String,
        message: String,
    },

    #[error("Invalid query parameters: {0}")]
    Params(String),
}

impl SliceError {
    /// The plain message recorded for the failed operation
    pub fn message(&self) -> &str {
        match self {
            SliceError::Fetch { message, .. } => message,
            SliceError::Params(message) => message,
        }
    }
}

impl From<TypeMappingError> for SliceError {
    fn from(err: TypeMappingError) -> Self {
        SliceError::Params(err.to_string())
    }
}
