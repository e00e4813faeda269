//! Card Companion - Core Library
//!
//! Offline-first core for a single-user personal finance and task-tracking
//! application: credit cards and their billing cycles, bank balances,
//! categorized expenses, money lent to others, and a todo list.
//!
//! # Overview
//!
//! All durable state lives in a remote table-oriented store. This library is
//! the non-UI core that sits between the presentation layer and that store:
//!
//! - **`offline`** - the heart of the library: a durable mutation queue and
//!   the sync coordinator that keeps the app usable while disconnected.
//!   Writes attempted online apply immediately; failed or offline writes are
//!   persisted locally and replayed when connectivity returns.
//! - **`backend`** - the narrow boundary to the external collaborators: a
//!   PostgREST-style table client and an opaque auth session slot.
//! - **`models`** - typed records for the tracked collections.
//! - **`services`** - form validation and CRUD orchestration; every write
//!   flows through the coordinator so offline behaviour is uniform.
//! - **`config`** / **`error`** - configuration and error types.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use card_companion::backend::{SessionStore, TableClient};
//! use card_companion::config::AppConfig;
//! use card_companion::offline::{
//!     spawn_auto_sync, MutationQueueStore, NetworkMonitor, SyncCoordinator,
//! };
//!
//! # async fn example() -> Result<(), card_companion::error::Error> {
//! let config = AppConfig::from_env()?;
//! let session = Arc::new(SessionStore::new());
//! let client = TableClient::new(config.clone(), session.clone());
//!
//! let store = Arc::new(MutationQueueStore::open_with_config(&config).await?);
//! let monitor = Arc::new(NetworkMonitor::default());
//! let coordinator = Arc::new(SyncCoordinator::new(
//!     store,
//!     Arc::new(client),
//!     monitor.clone(),
//! ));
//!
//! // Drain at startup and on every reconnect.
//! spawn_auto_sync(coordinator.clone(), &monitor);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Single coordinator, strictly sequential drain passes guarded by an
//! advisory in-flight flag. The queue store is safe for interleaved calls at
//! the storage layer but offers no cross-call transactional guarantee; the
//! design assumes a single writer process.

/// Configuration types
pub mod config;

/// Error types
pub mod error;

/// Domain records for the tracked collections
pub mod models;

/// Remote table store and auth boundary
pub mod backend;

/// Offline mutation queue and sync coordinator
pub mod offline;

/// Form validation and CRUD orchestration
pub mod services;
