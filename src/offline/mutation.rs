//! Queued mutation records
//!
//! A mutation is described by a tagged [`MutationPayload`]: the operation
//! kind, the target collection, the column data for inserts and updates, and
//! the identifier match for updates and deletes. Requiring the match at
//! construction time removes the unqualified update/delete path that the
//! backend would otherwise have to reject.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Kind discriminator for structured backend operations
///
/// Items carrying any other kind are logged and dropped during a drain pass
/// rather than retried forever; unknown mutation kinds must not wedge the
/// queue.
pub const BACKEND_OP_KIND: &str = "backend-op";

/// Column data for an insert or update
pub type ColumnData = Map<String, Value>;

/// A structured description of one write against the table store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MutationPayload {
    /// Insert `data` as a new row of `table`
    Insert { table: String, data: ColumnData },
    /// Update the row of `table` whose identifier column equals `id`
    Update {
        table: String,
        id: String,
        data: ColumnData,
    },
    /// Delete the row of `table` whose identifier column equals `id`
    Delete { table: String, id: String },
}

impl MutationPayload {
    /// Build an insert payload
    pub fn insert(table: impl Into<String>, data: ColumnData) -> Self {
        Self::Insert {
            table: table.into(),
            data,
        }
    }

    /// Build an update payload matched on the identifier column
    pub fn update(table: impl Into<String>, id: impl Into<String>, data: ColumnData) -> Self {
        Self::Update {
            table: table.into(),
            id: id.into(),
            data,
        }
    }

    /// Build a delete payload matched on the identifier column
    pub fn delete(table: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Delete {
            table: table.into(),
            id: id.into(),
        }
    }

    /// Target collection name
    pub fn table(&self) -> &str {
        match self {
            Self::Insert { table, .. } | Self::Update { table, .. } | Self::Delete { table, .. } => {
                table
            }
        }
    }
}

/// A pending mutation awaiting confirmation against the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueItem {
    /// Client-generated id, used as the store key and for idempotent removal
    pub id: String,
    /// Discriminator for how to interpret `payload`
    pub kind: String,
    /// Raw payload; decoded on replay so legacy or unknown items still list
    pub payload: Value,
    /// Enqueue timestamp (RFC 3339), assigned by the store when empty
    pub created_at: String,
}

impl QueueItem {
    /// Create a queue item for a structured backend operation
    pub fn new(payload: &MutationPayload) -> Self {
        let payload = serde_json::to_value(payload).expect("mutation payload serializes");
        Self {
            id: Uuid::new_v4().to_string(),
            kind: BACKEND_OP_KIND.to_string(),
            payload,
            created_at: String::new(),
        }
    }

    /// Create a queue item with an arbitrary kind and raw payload
    pub fn raw(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.into(),
            payload,
            created_at: String::new(),
        }
    }

    /// Decode the payload as a structured backend operation
    ///
    /// Returns `None` for unrecognized kinds and undecodable payloads; the
    /// coordinator treats those as vacuously handled.
    pub fn decode(&self) -> Option<MutationPayload> {
        if self.kind != BACKEND_OP_KIND {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }
}

/// Outcome of submitting a mutation through the coordinator
///
/// `queued: true` means "will retry later, no action needed"; `ok: false`
/// additionally signals that even the enqueue path hit a fault and the
/// mutation may not be durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueOutcome {
    pub ok: bool,
    pub queued: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(pairs: &[(&str, Value)]) -> ColumnData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = MutationPayload::update("todos", "t1", data(&[("is_completed", json!(true))]));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["op"], "update");
        assert_eq!(value["table"], "todos");
        assert_eq!(value["id"], "t1");
        assert_eq!(value["data"]["is_completed"], true);
    }

    #[test]
    fn test_queue_item_roundtrip() {
        let payload = MutationPayload::insert("todos", data(&[("title", json!("Buy milk"))]));
        let item = QueueItem::new(&payload);
        assert_eq!(item.kind, BACKEND_OP_KIND);
        assert!(item.created_at.is_empty());
        assert_eq!(item.decode(), Some(payload));
    }

    #[test]
    fn test_unknown_kind_does_not_decode() {
        let item = QueueItem::raw("create_todo", json!({"title": "legacy"}));
        assert_eq!(item.decode(), None);
    }

    #[test]
    fn test_malformed_payload_does_not_decode() {
        let item = QueueItem::raw(BACKEND_OP_KIND, json!({"op": "upsert", "table": "todos"}));
        assert_eq!(item.decode(), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let payload = MutationPayload::delete("todos", "t1");
        let a = QueueItem::new(&payload);
        let b = QueueItem::new(&payload);
        assert_ne!(a.id, b.id);
    }
}
