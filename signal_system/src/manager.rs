//! Fan-out of store events to subscribers
//!
//! Subscribers either see every event or only those of stores whose name
//! starts with a given prefix (`"staff."` for the whole staff slice).

use crate::event::StoreEvent;
use crate::types::{EventCallback, SubscriptionId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

struct Subscription {
    id: SubscriptionId,
    store_prefix: Option<String>,
    callback: EventCallback,
}

impl Subscription {
    fn wants(&self, event: &StoreEvent) -> bool {
        match &self.store_prefix {
            Some(prefix) => event.store.starts_with(prefix.as_str()),
            None => true,
        }
    }
}

pub struct SignalManager {
    subscriptions: RwLock<Vec<Subscription>>,
    next_id: AtomicU64,
    emitted: AtomicU64,
}

impl std::fmt::Debug for SignalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalManager")
            .field("subscriptions", &self.callback_count())
            .field("emitted", &self.emitted())
            .finish()
    }
}

impl SignalManager {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            emitted: AtomicU64::new(0),
        }
    }

    /// Receive every event
    pub fn add_callback<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(callback))
    }

    /// Receive events of stores whose name starts with `store_prefix`
    pub fn subscribe<F>(&self, store_prefix: impl Into<String>, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.register(Some(store_prefix.into()), Arc::new(callback))
    }

    fn register(&self, store_prefix: Option<String>, callback: EventCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut subscriptions) = self.subscriptions.write() {
            subscriptions.push(Subscription {
                id,
                store_prefix,
                callback,
            });
        }
        id
    }

    /// Returns false when the subscription was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.subscriptions.write() {
            Ok(mut subscriptions) => {
                let before = subscriptions.len();
                subscriptions.retain(|s| s.id != id);
                subscriptions.len() != before
            }
            Err(_) => false,
        }
    }

    pub fn emit(&self, event: StoreEvent) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(store = %event.store, key = ?event.key, kind = ?event.kind, "store event");
        // Callbacks run unlocked so they may subscribe or unsubscribe
        let callbacks: Vec<EventCallback> = match self.subscriptions.read() {
            Ok(subscriptions) => subscriptions
                .iter()
                .filter(|s| s.wants(&event))
                .map(|s| s.callback.clone())
                .collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback(&event);
        }
    }

    pub fn clear_callbacks(&self) {
        if let Ok(mut subscriptions) = self.subscriptions.write() {
            subscriptions.clear();
        }
    }

    pub fn callback_count(&self) -> usize {
        self.subscriptions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Total number of events emitted, delivered or not
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }
}

impl Default for SignalManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::StoreEventKind;
    use std::sync::Mutex;

    #[test]
    fn test_emit_reaches_every_callback() {
        let manager = SignalManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = seen.clone();
            manager.add_callback(move |event| {
                seen.lock().unwrap().push(event.kind.clone());
            });
        }

        manager.emit(StoreEvent::new("finance.entry_types", StoreEventKind::Pending));
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(manager.callback_count(), 2);

        manager.clear_callbacks();
        manager.emit(StoreEvent::new("finance.entry_types", StoreEventKind::Pending));
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(manager.emitted(), 2);
    }

    #[test]
    fn test_prefix_subscription_and_unsubscribe() {
        let manager = SignalManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = manager.subscribe("staff.", move |event| {
            sink.lock().unwrap().push(event.store.clone());
        });

        manager.emit(StoreEvent::new("staff.district_staff", StoreEventKind::Pending));
        manager.emit(StoreEvent::new("finance.reports", StoreEventKind::Pending));
        assert_eq!(*seen.lock().unwrap(), vec!["staff.district_staff".to_string()]);

        assert!(manager.unsubscribe(id));
        assert!(!manager.unsubscribe(id));
        manager.emit(StoreEvent::new("staff.school_staff", StoreEventKind::Pending));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_callback_may_unsubscribe_itself() {
        let manager = Arc::new(SignalManager::new());
        let calls = Arc::new(Mutex::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let (handle, counter, slot) = (manager.clone(), calls.clone(), own_id.clone());
        let id = manager.subscribe("finance.", move |_| {
            *counter.lock().unwrap() += 1;
            if let Some(id) = *slot.lock().unwrap() {
                handle.unsubscribe(id);
            }
            handle.add_callback(|_| {});
        });
        *own_id.lock().unwrap() = Some(id);

        manager.emit(StoreEvent::new("finance.reports", StoreEventKind::Pending));
        manager.emit(StoreEvent::new("finance.reports", StoreEventKind::Pending));

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(manager.callback_count(), 1);
    }
}
