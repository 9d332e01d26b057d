//! Convenience re-exports for common signal-system usage

pub use crate::event::{StoreEvent, StoreEventKind};
pub use crate::manager::SignalManager;
pub use crate::types::{EventCallback, SubscriptionId};
