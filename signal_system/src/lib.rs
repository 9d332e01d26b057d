//! Signal system for store lifecycle events
//!
//! This crate provides the notification path from the slice stores to their
//! consumers: every pending, fulfilled, rejected or cache-served fetch is
//! published as a [`StoreEvent`].

pub mod event;
pub mod manager;
pub mod prelude;
pub mod types;

pub use event::{StoreEvent, StoreEventKind};
pub use manager::SignalManager;
pub use types::{EventCallback, SubscriptionId};
