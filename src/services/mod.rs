//! # CRUD Orchestration
//!
//! Form validation and mutation building over the sync coordinator. Reads go
//! straight to the table client; every write flows through
//! [`SyncCoordinator::queue_mutation`](crate::offline::SyncCoordinator::queue_mutation)
//! so offline behaviour is uniform across the app: online writes apply
//! immediately, offline or failed writes are queued and replayed later.

pub mod finance;
pub mod todos;

pub use finance::{
    BankDraft, CardDraft, ExpenseDraft, FinanceService, LendingDraft,
};
pub use todos::{TodoDraft, TodoService};

use crate::offline::mutation::ColumnData;

/// Convert a JSON object literal into column data
///
/// Callers only pass object values; anything else yields an empty map.
pub(crate) fn columns(value: serde_json::Value) -> ColumnData {
    match value {
        serde_json::Value::Object(map) => map,
        _ => ColumnData::new(),
    }
}
