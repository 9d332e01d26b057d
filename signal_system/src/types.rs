use crate::event::StoreEvent;
use std::sync::Arc;

/// Synchronous event callback
pub type EventCallback = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Handle returned by [`crate::SignalManager::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
