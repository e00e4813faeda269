//! # Sync Coordinator
//!
//! Decides immediate-vs-queued execution for each logical mutation and
//! drives replay of the queue. One owned object holds all sync state: the
//! queue store, the backend writer, the connectivity probe, the current
//! [`SyncState`] behind a watch channel, and the in-flight drain guard.
//!
//! ## State machine
//!
//! `Idle -> Syncing` when a drain pass starts; `Syncing -> Idle` when the
//! pass completes, regardless of how many individual items failed;
//! `Syncing -> Error` only when the surrounding infrastructure faults
//! (listing or removing against the local store). At most one drain pass is
//! in flight at a time; the guard is process-local and advisory, not a
//! cross-process lock.
//!
//! Items are drained strictly sequentially in the store's FIFO order. There
//! is no per-item timeout, no backoff, and no dead-letter path: an item that
//! permanently fails is retried on every future drain pass. That poison-item
//! risk is accepted for this single-user, low-stakes queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::backend::BackendWriter;
use crate::offline::connectivity::{ConnectivityProbe, NetworkMonitor};
use crate::offline::mutation::{QueueItem, QueueOutcome};
use crate::offline::queue::MutationQueueStore;

/// Process-wide sync status exposed to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No drain pass running
    Idle,
    /// A drain pass is replaying the queue
    Syncing,
    /// The last drain pass hit a store-level fault
    Error,
}

/// Orchestrates queueing, immediate execution, and queue replay
pub struct SyncCoordinator {
    store: Arc<MutationQueueStore>,
    writer: Arc<dyn BackendWriter>,
    connectivity: Arc<dyn ConnectivityProbe>,
    state: watch::Sender<SyncState>,
    draining: AtomicBool,
}

impl SyncCoordinator {
    /// Create a coordinator over the given store, writer, and probe
    pub fn new(
        store: Arc<MutationQueueStore>,
        writer: Arc<dyn BackendWriter>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        let (state, _) = watch::channel(SyncState::Idle);
        Self {
            store,
            writer,
            connectivity,
            state,
            draining: AtomicBool::new(false),
        }
    }

    /// Current sync state
    pub fn sync_state(&self) -> SyncState {
        *self.state.borrow()
    }

    /// Subscribe to sync state changes
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Submit a logical mutation
    ///
    /// Online: attempt immediately; on success nothing is persisted and the
    /// outcome is `{ok: true, queued: false}`. On failure, or while offline,
    /// the item is persisted for later replay and the outcome is
    /// `{ok: true, queued: true}`. If even the enqueue hits a storage fault
    /// the mutation is lost for this call; that is logged and reported as
    /// `{ok: false, queued: true}`.
    pub async fn queue_mutation(&self, payload: crate::offline::MutationPayload) -> QueueOutcome {
        self.queue_item(QueueItem::new(&payload)).await
    }

    /// Submit a pre-built queue item (raw kinds included)
    pub async fn queue_item(&self, item: QueueItem) -> QueueOutcome {
        if self.connectivity.is_online() && self.try_run(&item).await {
            return QueueOutcome {
                ok: true,
                queued: false,
            };
        }

        match self.store.add(&item).await {
            Ok(()) => QueueOutcome {
                ok: true,
                queued: true,
            },
            Err(err) => {
                tracing::error!(id = %item.id, error = %err, "failed to queue mutation");
                QueueOutcome {
                    ok: false,
                    queued: true,
                }
            }
        }
    }

    /// Replay every currently queued item
    ///
    /// Returns `true` when a full drain pass ran to completion. No-ops
    /// (returning `false` with no state change) while offline or while
    /// another pass is in flight. Individual item failures leave the item
    /// queued and do not affect the return value or the sync state.
    pub async fn sync_queue(&self) -> bool {
        if !self.connectivity.is_online() {
            return false;
        }
        if self.draining.swap(true, Ordering::SeqCst) {
            return false;
        }

        self.state.send_replace(SyncState::Syncing);

        let result = match self.drain().await {
            Ok(remaining) => {
                tracing::debug!(remaining, "drain pass complete");
                self.state.send_replace(SyncState::Idle);
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "drain pass aborted by store fault");
                self.state.send_replace(SyncState::Error);
                false
            }
        };

        self.draining.store(false, Ordering::SeqCst);
        result
    }

    /// One pass over the current queue; returns the count left queued
    async fn drain(&self) -> Result<usize, sqlx::Error> {
        let items = self.store.list().await?;
        tracing::info!(pending = items.len(), "replaying mutation queue");

        let mut remaining = 0;
        for item in items {
            if self.try_run(&item).await {
                self.store.remove(&item.id).await?;
            } else {
                remaining += 1;
            }
        }
        Ok(remaining)
    }

    /// Execute one item against the backend
    ///
    /// Shared by the immediate-attempt path and replay. All backend-level
    /// errors are converted to a boolean so both callers decide queueing
    /// behaviour uniformly. Unrecognized kinds and undecodable payloads are
    /// reported handled after logging, so they are dropped rather than
    /// retried forever.
    async fn try_run(&self, item: &QueueItem) -> bool {
        let Some(payload) = item.decode() else {
            tracing::warn!(id = %item.id, kind = %item.kind, "dropping unrecognized mutation");
            return true;
        };

        match self.writer.apply(payload).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(id = %item.id, error = %err, "mutation failed, leaving queued");
                false
            }
        }
    }
}

impl std::fmt::Debug for SyncCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncCoordinator")
            .field("state", &self.sync_state())
            .field("draining", &self.draining.load(Ordering::SeqCst))
            .finish()
    }
}

/// Wire connectivity events to queue replay
///
/// Runs a one-shot startup drain if the monitor already reports online, then
/// drains on every offline-to-online transition. Connectivity transitions and
/// startup are the only triggers; there is no periodic retry.
pub fn spawn_auto_sync(
    coordinator: Arc<SyncCoordinator>,
    monitor: &NetworkMonitor,
) -> JoinHandle<()> {
    let mut status = monitor.subscribe();
    tokio::spawn(async move {
        let mut was_online = *status.borrow_and_update();
        if was_online {
            coordinator.sync_queue().await;
        }

        while status.changed().await.is_ok() {
            let online = *status.borrow_and_update();
            if online && !was_online {
                tracing::info!("connectivity regained, draining mutation queue");
                coordinator.sync_queue().await;
            }
            was_online = online;
        }
    })
}
