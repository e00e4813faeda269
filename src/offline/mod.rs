//! # Offline Mutation Queue
//!
//! This module implements the offline-first core of the application: a
//! durable local queue of pending writes and the coordinator that decides
//! between immediate execution and queueing, then replays the queue when
//! connectivity returns.
//!
//! ## Architecture
//!
//! - [`queue::MutationQueueStore`] - SQLite-backed pending-work set, keyed by
//!   client-generated id
//! - [`mutation`] - the typed mutation payload and queue item records
//! - [`sync::SyncCoordinator`] - immediate-vs-queued decision, drain passes,
//!   and sync state reporting
//! - [`connectivity`] - the online/offline signal and auto-sync wiring
//!
//! Every item in the store represents a write that has NOT been confirmed
//! against the backend. Successful replay deletes the item; failed replay
//! leaves it for the next drain pass. The store is a pending-work set, not a
//! write-ahead log.

pub mod connectivity;
pub mod mutation;
pub mod queue;
pub mod sync;

pub use connectivity::{ConnectivityProbe, NetworkMonitor};
pub use mutation::{ColumnData, MutationPayload, QueueItem, QueueOutcome, BACKEND_OP_KIND};
pub use queue::MutationQueueStore;
pub use sync::{spawn_auto_sync, SyncCoordinator, SyncState};
