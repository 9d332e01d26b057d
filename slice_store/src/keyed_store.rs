//! Parameter-keyed result store
//!
//! Holds the most recent result array per [`QueryKey`] together with a
//! parallel loading-state map and the last error message per key.
//!
//! Entries are overwritten on every successful fetch and never evicted during
//! the session. Concurrent fetches for the same uncached key are not coalesced:
//! both reach the network and the last one to resolve wins.

use crate::errors::SliceError;
use crate::loading::LoadingState;
use crate::query_key::QueryKey;
use crate::traits::Store;
use crate::{read_lock, write_lock};
use serde::Serialize;
use signal_system::{SignalManager, StoreEvent, StoreEventKind};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::{Arc, RwLock};

struct KeyedState<T> {
    entries: HashMap<QueryKey, Arc<Vec<T>>>,
    status: HashMap<QueryKey, LoadingState>,
    errors: HashMap<QueryKey, String>,
    revision: u64,
}

impl<T> Default for KeyedState<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            status: HashMap::new(),
            errors: HashMap::new(),
            revision: 0,
        }
    }
}

pub struct KeyedStore<T> {
    name: String,
    state: RwLock<KeyedState<T>>,
    signals: Option<Arc<SignalManager>>,
}

impl<T> Debug for KeyedStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = read_lock(&self.state);
        f.debug_struct("KeyedStore")
            .field("name", &self.name)
            .field("entries", &state.entries.len())
            .field("revision", &state.revision)
            .field("has_signals", &self.signals.is_some())
            .finish()
    }
}

impl<T> KeyedStore<T> {
    pub fn new(name: impl Into<String>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(KeyedState::default()),
            signals,
        }
    }

    /// Return cached rows for `params`, or fetch them.
    ///
    /// When an entry exists and `force_refresh` is false the fetcher is not
    /// called and the stored array is returned unchanged. Otherwise the key
    /// is marked loading before the fetcher runs; success overwrites the
    /// entry, failure records the message and leaves any cached rows in place.
    pub async fn fetch<P, F, Fut, E>(
        &self,
        params: &P,
        force_refresh: bool,
        fetcher: F,
    ) -> Result<Arc<Vec<T>>, SliceError>
    where
        P: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
        E: Display,
    {
        let key = QueryKey::from_params(params)?;

        if !force_refresh {
            if let Some(cached) = self.serve_cached(&key) {
                return Ok(cached);
            }
        }

        self.mark_pending(&key);

        match fetcher().await {
            Ok(rows) => Ok(self.fulfill(&key, rows)),
            Err(err) => {
                let message = err.to_string();
                self.reject(&key, message.clone());
                Err(SliceError::Fetch {
                    store: self.name.clone(),
                    key: key.to_string(),
                    message,
                })
            }
        }
    }

    fn serve_cached(&self, key: &QueryKey) -> Option<Arc<Vec<T>>> {
        let cached = {
            let mut state = write_lock(&self.state);
            let cached = state.entries.get(key).cloned()?;
            if state.status.get(key) != Some(&LoadingState::Succeeded) {
                state.status.insert(key.clone(), LoadingState::Succeeded);
                state.revision += 1;
            }
            cached
        };

        tracing::debug!(store = %self.name, key = %key, "serving cached result set");
        self.emit(key, StoreEventKind::CacheHit { rows: cached.len() });
        Some(cached)
    }

    fn mark_pending(&self, key: &QueryKey) {
        {
            let mut state = write_lock(&self.state);
            state.status.insert(key.clone(), LoadingState::Loading);
            state.errors.remove(key);
            state.revision += 1;
        }
        self.emit(key, StoreEventKind::Pending);
    }

    fn fulfill(&self, key: &QueryKey, rows: Vec<T>) -> Arc<Vec<T>> {
        let rows = Arc::new(rows);
        {
            let mut state = write_lock(&self.state);
            state.entries.insert(key.clone(), rows.clone());
            state.status.insert(key.clone(), LoadingState::Succeeded);
            state.errors.remove(key);
            state.revision += 1;
        }
        self.emit(key, StoreEventKind::Fulfilled { rows: rows.len() });
        rows
    }

    fn reject(&self, key: &QueryKey, message: String) {
        tracing::warn!(store = %self.name, key = %key, error = %message, "fetch failed");
        {
            let mut state = write_lock(&self.state);
            state.status.insert(key.clone(), LoadingState::Failed);
            state.errors.insert(key.clone(), message.clone());
            state.revision += 1;
        }
        self.emit(key, StoreEventKind::Rejected { message });
    }

    fn emit(&self, key: &QueryKey, kind: StoreEventKind) {
        if let Some(signals) = &self.signals {
            signals.emit(StoreEvent::new(self.name.clone(), kind).with_key(key.as_str()));
        }
    }

    fn key_for<P: Serialize + ?Sized>(params: &P) -> Option<QueryKey> {
        QueryKey::from_params(params).ok()
    }

    /// Cached rows for `params`; an empty array when nothing is cached
    pub fn select<P: Serialize + ?Sized>(&self, params: &P) -> Arc<Vec<T>> {
        Self::key_for(params)
            .and_then(|key| self.get(&key))
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }

    /// Cached rows for an exact key
    pub fn get(&self, key: &QueryKey) -> Option<Arc<Vec<T>>> {
        read_lock(&self.state).entries.get(key).cloned()
    }

    pub fn contains<P: Serialize + ?Sized>(&self, params: &P) -> bool {
        Self::key_for(params)
            .map(|key| read_lock(&self.state).entries.contains_key(&key))
            .unwrap_or(false)
    }

    /// Loading state for `params`; `Idle` for keys never dispatched
    pub fn status<P: Serialize + ?Sized>(&self, params: &P) -> LoadingState {
        Self::key_for(params)
            .map(|key| self.status_of(&key))
            .unwrap_or_default()
    }

    pub fn status_of(&self, key: &QueryKey) -> LoadingState {
        read_lock(&self.state)
            .status
            .get(key)
            .copied()
            .unwrap_or_default()
    }

    /// Last error message for `params`, cleared by the next dispatch
    pub fn error<P: Serialize + ?Sized>(&self, params: &P) -> Option<String> {
        Self::key_for(params).and_then(|key| read_lock(&self.state).errors.get(&key).cloned())
    }

    /// Keys with cached rows, sorted
    pub fn keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = read_lock(&self.state).entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        read_lock(&self.state).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Send + Sync> Store for KeyedStore<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn revision(&self) -> u64 {
        read_lock(&self.state).revision
    }

    fn is_loading(&self) -> bool {
        read_lock(&self.state)
            .status
            .values()
            .any(|status| status.is_loading())
    }

    fn cached_sets(&self) -> usize {
        self.len()
    }

    fn clear(&self) {
        let mut state = write_lock(&self.state);
        let revision = state.revision + 1;
        *state = KeyedState::default();
        state.revision = revision;
    }

    fn overall_state(&self) -> LoadingState {
        let state = read_lock(&self.state);
        let has = |wanted: LoadingState| state.status.values().any(|s| *s == wanted);
        if has(LoadingState::Loading) {
            LoadingState::Loading
        } else if has(LoadingState::Failed) {
            LoadingState::Failed
        } else if has(LoadingState::Succeeded) {
            LoadingState::Succeeded
        } else {
            LoadingState::Idle
        }
    }
}
