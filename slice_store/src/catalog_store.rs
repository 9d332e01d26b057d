//! Once-per-session reference catalogs
//!
//! Small unparameterized lists (entry types, staff types, ...) guarded by a
//! single shared loading flag instead of a keyed map.

use crate::errors::SliceError;
use crate::loading::LoadingState;
use crate::traits::Store;
use crate::{read_lock, write_lock};
use signal_system::{SignalManager, StoreEvent, StoreEventKind};
use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::{Arc, RwLock};

struct CatalogState<T> {
    items: Arc<Vec<T>>,
    status: LoadingState,
    error: Option<String>,
    revision: u64,
}

pub struct CatalogStore<T> {
    name: String,
    state: RwLock<CatalogState<T>>,
    signals: Option<Arc<SignalManager>>,
}

impl<T> Debug for CatalogStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = read_lock(&self.state);
        f.debug_struct("CatalogStore")
            .field("name", &self.name)
            .field("items", &state.items.len())
            .field("status", &state.status)
            .finish()
    }
}

impl<T> CatalogStore<T> {
    pub fn new(name: impl Into<String>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(CatalogState {
                items: Arc::new(Vec::new()),
                status: LoadingState::Idle,
                error: None,
                revision: 0,
            }),
            signals,
        }
    }

    /// Load the catalog unless it is already loaded or loading.
    ///
    /// Returns the current items without calling `fetcher` when the shared
    /// flag reads `loading` or the list is non-empty, unless `force` is set.
    /// A fetch already in flight is not awaited.
    pub async fn ensure_loaded<F, Fut, E>(
        &self,
        force: bool,
        fetcher: F,
    ) -> Result<Arc<Vec<T>>, SliceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
        E: Display,
    {
        {
            let mut state = write_lock(&self.state);
            let skip = state.status.is_loading() || !state.items.is_empty();
            if skip && !force {
                return Ok(state.items.clone());
            }
            state.status = LoadingState::Loading;
            state.error = None;
            state.revision += 1;
        }
        self.emit(StoreEventKind::Pending);

        match fetcher().await {
            Ok(items) => {
                let items = Arc::new(items);
                {
                    let mut state = write_lock(&self.state);
                    state.items = items.clone();
                    state.status = LoadingState::Succeeded;
                    state.revision += 1;
                }
                self.emit(StoreEventKind::Fulfilled { rows: items.len() });
                Ok(items)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(store = %self.name, error = %message, "catalog fetch failed");
                {
                    let mut state = write_lock(&self.state);
                    state.status = LoadingState::Failed;
                    state.error = Some(message.clone());
                    state.revision += 1;
                }
                self.emit(StoreEventKind::Rejected {
                    message: message.clone(),
                });
                Err(SliceError::Fetch {
                    store: self.name.clone(),
                    key: "catalog".to_string(),
                    message,
                })
            }
        }
    }

    fn emit(&self, kind: StoreEventKind) {
        if let Some(signals) = &self.signals {
            signals.emit(StoreEvent::new(self.name.clone(), kind));
        }
    }

    pub fn items(&self) -> Arc<Vec<T>> {
        read_lock(&self.state).items.clone()
    }

    pub fn status(&self) -> LoadingState {
        read_lock(&self.state).status
    }

    pub fn error(&self) -> Option<String> {
        read_lock(&self.state).error.clone()
    }

    pub fn is_loaded(&self) -> bool {
        !read_lock(&self.state).items.is_empty()
    }

    /// First item matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Option<T>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        read_lock(&self.state).items.iter().find(|item| predicate(item)).cloned()
    }
}

impl<T: Send + Sync> Store for CatalogStore<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn revision(&self) -> u64 {
        read_lock(&self.state).revision
    }

    fn is_loading(&self) -> bool {
        self.status().is_loading()
    }

    fn cached_sets(&self) -> usize {
        usize::from(self.is_loaded())
    }

    fn clear(&self) {
        let mut state = write_lock(&self.state);
        state.items = Arc::new(Vec::new());
        state.status = LoadingState::Idle;
        state.error = None;
        state.revision += 1;
    }

    fn overall_state(&self) -> LoadingState {
        self.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_loaded_catalog_is_not_refetched() {
        let store = CatalogStore::<&str>::new("staff.staff_types", None);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            store
                .ensure_loaded(false, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok::<_, String>(vec!["Teacher", "Administrator"]) }
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.status(), LoadingState::Succeeded);
        assert_eq!(store.items().len(), 2);
    }

    #[tokio::test]
    async fn test_force_reloads() {
        let store = CatalogStore::<u8>::new("finance.entry_types", None);
        store
            .ensure_loaded(false, || async { Ok::<_, String>(vec![1]) })
            .await
            .unwrap();
        let items = store
            .ensure_loaded(true, || async { Ok::<_, String>(vec![1, 2]) })
            .await
            .unwrap();
        assert_eq!(*items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_in_flight_load_is_not_repeated() {
        let store = CatalogStore::<u8>::new("finance.fund_types", None);
        let (tx, rx) = tokio::sync::oneshot::channel::<Vec<u8>>();
        let calls = AtomicUsize::new(0);

        let first = store.ensure_loaded(false, || async move {
            rx.await.map_err(|e| e.to_string())
        });
        let second = async {
            tokio::task::yield_now().await;
            let items = store
                .ensure_loaded(false, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok::<_, String>(vec![9]) }
                })
                .await;
            tx.send(vec![4, 5]).unwrap();
            items
        };

        let (first, second) = futures::join!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(second.unwrap().is_empty());
        assert_eq!(*first.unwrap(), vec![4, 5]);
        assert_eq!(*store.items(), vec![4, 5]);
    }

    #[tokio::test]
    async fn test_empty_result_allows_retry() {
        let store = CatalogStore::<u8>::new("safety.safety_types", None);
        store
            .ensure_loaded(false, || async { Ok::<_, String>(vec![]) })
            .await
            .unwrap();
        assert_eq!(store.status(), LoadingState::Succeeded);
        assert!(!store.is_loaded());

        store
            .ensure_loaded(false, || async { Ok::<_, String>(vec![3]) })
            .await
            .unwrap();
        assert!(store.is_loaded());
    }

    #[tokio::test]
    async fn test_failure_recorded() {
        let store = CatalogStore::<u8>::new("safety.safety_types", None);
        let err = store
            .ensure_loaded(false, || async { Err::<Vec<u8>, _>("boom") })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "boom");
        assert_eq!(store.status(), LoadingState::Failed);
        assert_eq!(store.error().as_deref(), Some("boom"));
        assert_eq!(store.cached_sets(), 0);
    }
}
