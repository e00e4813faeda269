//! Table store HTTP client
//!
//! Speaks the PostgREST-style table API: insert is a POST of the row JSON,
//! update is a PATCH filtered on the identifier column, delete is a DELETE
//! with the same filter, select is a GET with an order clause. Every request
//! carries the anon API key; authenticated requests also carry the session's
//! bearer token.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::backend::session::SessionStore;
use crate::backend::BackendWriter;
use crate::config::AppConfig;
use crate::error::BackendError;
use crate::offline::mutation::{ColumnData, MutationPayload};

/// HTTP client for the remote table store
#[derive(Debug, Clone)]
pub struct TableClient {
    config: AppConfig,
    session: Arc<SessionStore>,
    http: Client,
}

impl TableClient {
    /// Create a client over the given configuration and session slot
    pub fn new(config: AppConfig, session: Arc<SessionStore>) -> Self {
        Self {
            config,
            session,
            http: Client::new(),
        }
    }

    /// Insert a row into `table`
    pub async fn insert(&self, table: &str, data: &ColumnData) -> Result<(), BackendError> {
        let request = self
            .http
            .post(self.config.table_url(table))
            .json(data);
        self.send(request).await.map(|_| ())
    }

    /// Update the row of `table` whose id column equals `id`
    pub async fn update(&self, table: &str, id: &str, data: &ColumnData) -> Result<(), BackendError> {
        let request = self
            .http
            .patch(self.config.table_url(table))
            .query(&[("id", format!("eq.{}", id))])
            .json(data);
        self.send(request).await.map(|_| ())
    }

    /// Delete the row of `table` whose id column equals `id`
    pub async fn delete(&self, table: &str, id: &str) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.config.table_url(table))
            .query(&[("id", format!("eq.{}", id))]);
        self.send(request).await.map(|_| ())
    }

    /// Select all rows of `table`, ordered by `order` (e.g. `created_at.desc`)
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        order: &str,
    ) -> Result<Vec<T>, BackendError> {
        let request = self
            .http
            .get(self.config.table_url(table))
            .query(&[("select", "*"), ("order", order)]);
        let response = self.send(request).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| BackendError::decode(e.to_string()))
    }

    /// Attach auth headers, send, and surface non-success statuses
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let mut request = request;
        if let Some(key) = self.config.api_key() {
            request = request.header("apikey", key);
        }
        if let Some(session) = self.session.current_session() {
            request = request.header(
                "Authorization",
                format!("Bearer {}", session.access_token),
            );
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl BackendWriter for TableClient {
    fn apply(&self, payload: MutationPayload) -> BoxFuture<'_, Result<(), BackendError>> {
        Box::pin(async move {
            match payload {
                MutationPayload::Insert { table, data } => self.insert(&table, &data).await,
                MutationPayload::Update { table, id, data } => {
                    self.update(&table, &id, &data).await
                }
                MutationPayload::Delete { table, id } => self.delete(&table, &id).await,
            }
        })
    }
}
