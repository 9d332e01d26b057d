//! Store event types and definitions
//!
//! This module defines the structure of the lifecycle events
//! that flow through the signal system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened to a store entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEventKind {
    /// A fetch was dispatched and the entry is now loading
    Pending,
    /// A fetch resolved and the entry was overwritten
    Fulfilled { rows: usize },
    /// A fetch failed; cached data, if any, is untouched
    Rejected { message: String },
    /// A dispatch was served from the store without a network call
    CacheHit { rows: usize },
}

/// Store lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    pub id: Uuid,
    /// Store name, e.g. `staff.district_staff`
    pub store: String,
    /// Canonical query key; `None` for catalog stores
    pub key: Option<String>,
    pub kind: StoreEventKind,
    /// Event timestamp (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl StoreEvent {
    pub fn new(store: impl Into<String>, kind: StoreEventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: store.into(),
            key: None,
            kind,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.kind, StoreEventKind::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = StoreEvent::new("staff.district_staff", StoreEventKind::Fulfilled { rows: 3 })
            .with_key("district_id=5&year=2023");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["kind"]["type"], "fulfilled");
        assert_eq!(value["kind"]["rows"], 3);
        assert_eq!(value["key"], "district_id=5&year=2023");
        assert!(event.is_terminal());
    }
}
