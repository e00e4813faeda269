//! # Backend Boundary
//!
//! The narrow contracts this library holds against its external
//! collaborators: the remote table-oriented store and the opaque auth
//! provider. The sync coordinator depends only on [`BackendWriter`]; it does
//! not know collection schemas and passes column data through opaquely.

pub mod client;
pub mod session;

use futures_util::future::BoxFuture;

use crate::error::BackendError;
use crate::offline::mutation::MutationPayload;

pub use client::TableClient;
pub use session::{Session, SessionStore};

/// The backend mutation capability
///
/// Given a structured payload, perform the corresponding insert, update, or
/// delete against a named collection and report success or failure.
pub trait BackendWriter: Send + Sync {
    /// Apply one mutation against the backend
    fn apply(&self, payload: MutationPayload) -> BoxFuture<'_, Result<(), BackendError>>;
}
