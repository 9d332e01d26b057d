use serde::{Deserialize, Serialize};

/// Fetch lifecycle of one store entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl LoadingState {
    pub fn is_loading(self) -> bool {
        self == LoadingState::Loading
    }
}
