//! Todo list orchestration
//!
//! Add, edit, complete, and soft-delete tasks. Deletion never removes the
//! row: it flips `is_deleted`, so a delete queued offline cannot race a
//! concurrent edit into resurrecting the task.

use std::sync::Arc;

use serde_json::json;

use crate::backend::{SessionStore, TableClient};
use crate::error::Error;
use crate::models::{Priority, Todo};
use crate::offline::{MutationPayload, QueueOutcome, SyncCoordinator};
use crate::services::columns;

/// Form data for a new or edited todo
#[derive(Debug, Clone)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Priority,
    pub category: Option<String>,
}

impl TodoDraft {
    /// Validate the draft before building a mutation
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("title", "Title cannot be empty"));
        }
        Ok(())
    }

    fn column_data(&self) -> serde_json::Value {
        json!({
            "title": self.title.trim(),
            "description": self.description,
            "due_date": self.due_date,
            "priority": self.priority,
            "category": self.category,
        })
    }

    /// Build the insert payload for this draft
    pub fn insert_payload(&self, user_id: Option<&str>) -> MutationPayload {
        let mut data = columns(self.column_data());
        if let Some(user_id) = user_id {
            data.insert("user_id".to_string(), json!(user_id));
        }
        MutationPayload::insert("todos", data)
    }

    /// Build the update payload for an existing todo
    pub fn update_payload(&self, id: &str) -> MutationPayload {
        MutationPayload::update("todos", id, columns(self.column_data()))
    }
}

/// Todo CRUD over the offline coordinator
pub struct TodoService {
    coordinator: Arc<SyncCoordinator>,
    client: TableClient,
    session: Arc<SessionStore>,
}

impl TodoService {
    pub fn new(
        coordinator: Arc<SyncCoordinator>,
        client: TableClient,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            coordinator,
            client,
            session,
        }
    }

    /// All live todos, newest first
    pub async fn list(&self) -> Result<Vec<Todo>, Error> {
        let todos: Vec<Todo> = self.client.select("todos", "created_at.desc").await?;
        Ok(todos.into_iter().filter(|t| !t.is_deleted).collect())
    }

    /// Add a task
    pub async fn add(&self, draft: &TodoDraft) -> Result<QueueOutcome, Error> {
        draft.validate()?;
        let user_id = self.session.current_session().map(|s| s.user_id);
        let payload = draft.insert_payload(user_id.as_deref());
        Ok(self.coordinator.queue_mutation(payload).await)
    }

    /// Edit an existing task
    pub async fn edit(&self, id: &str, draft: &TodoDraft) -> Result<QueueOutcome, Error> {
        draft.validate()?;
        Ok(self.coordinator.queue_mutation(draft.update_payload(id)).await)
    }

    /// Flip a task's completion flag
    pub async fn toggle_complete(&self, todo: &Todo) -> QueueOutcome {
        let payload = MutationPayload::update(
            "todos",
            &todo.id,
            columns(json!({ "is_completed": !todo.is_completed })),
        );
        self.coordinator.queue_mutation(payload).await
    }

    /// Soft-delete a task
    pub async fn remove(&self, id: &str) -> QueueOutcome {
        let payload =
            MutationPayload::update("todos", id, columns(json!({ "is_deleted": true })));
        self.coordinator.queue_mutation(payload).await
    }
}
