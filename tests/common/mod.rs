//! Common test utilities
//!
//! Provides a scripted backend writer and a coordinator harness over a
//! scratch queue database.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::json;

use card_companion::backend::BackendWriter;
use card_companion::error::BackendError;
use card_companion::offline::{
    ColumnData, MutationPayload, MutationQueueStore, NetworkMonitor, SyncCoordinator,
};

/// Backend writer double: records applied payloads, fails scripted tables
#[derive(Default)]
pub struct MockWriter {
    applied: Mutex<Vec<MutationPayload>>,
    failing_tables: Mutex<HashSet<String>>,
    delay: Option<Duration>,
}

impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that sleeps before answering, to widen race windows
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Make every mutation against `table` fail from now on
    pub fn fail_table(&self, table: &str) {
        self.failing_tables
            .lock()
            .unwrap()
            .insert(table.to_string());
    }

    /// Let mutations against `table` succeed again
    pub fn recover_table(&self, table: &str) {
        self.failing_tables.lock().unwrap().remove(table);
    }

    pub fn applied(&self) -> Vec<MutationPayload> {
        self.applied.lock().unwrap().clone()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.lock().unwrap().len()
    }
}

impl BackendWriter for MockWriter {
    fn apply(&self, payload: MutationPayload) -> BoxFuture<'_, Result<(), BackendError>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self
                .failing_tables
                .lock()
                .unwrap()
                .contains(payload.table())
            {
                return Err(BackendError::network("simulated outage"));
            }
            self.applied.lock().unwrap().push(payload);
            Ok(())
        })
    }
}

/// Coordinator wired to a scratch store and scripted collaborators
pub struct Harness {
    // Keeps the scratch database directory alive for the test's duration
    _dir: tempfile::TempDir,
    pub store: Arc<MutationQueueStore>,
    pub writer: Arc<MockWriter>,
    pub monitor: Arc<NetworkMonitor>,
    pub coordinator: Arc<SyncCoordinator>,
}

pub async fn harness(online: bool) -> Harness {
    harness_with_writer(online, MockWriter::new()).await
}

pub async fn harness_with_writer(online: bool, writer: MockWriter) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(
        MutationQueueStore::open(dir.path().join("queue.db"))
            .await
            .unwrap(),
    );
    let writer = Arc::new(writer);
    let monitor = Arc::new(NetworkMonitor::new(online));
    let coordinator = Arc::new(SyncCoordinator::new(
        store.clone(),
        writer.clone(),
        monitor.clone(),
    ));
    Harness {
        _dir: dir,
        store,
        writer,
        monitor,
        coordinator,
    }
}

/// An insert payload for `table` with a single title column
pub fn insert_payload(table: &str, title: &str) -> MutationPayload {
    let mut data = ColumnData::new();
    data.insert("title".to_string(), json!(title));
    MutationPayload::insert(table, data)
}
