//! REST API client for the notes endpoints.
//!
//! Wraps `POST`/`PATCH` on `citynotes` and `locationnotes`, plus the
//! collection listings, using [`reqwest`].

use async_trait::async_trait;
use reqwest::StatusCode;
use waypoint_core::{HttpVerb, NoteFamily, NotePayload, NoteRecord};

use crate::config::ClientConfig;
use crate::transport::{NoteTransport, NotesApiError};

/// HTTP client for one notes API deployment.
pub struct NotesApi {
    client: reqwest::Client,
    base_url: String,
}

impl NotesApi {
    /// Create a client with the configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, NotesApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling with other API wrappers).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a resource path such as `citynotes/12`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// List every note of a family.
    ///
    /// Sends `GET citynotes` or `GET locationnotes`. The server answers
    /// `404 {"error": "no notes exist"}` for an empty collection, which is
    /// returned as an empty list.
    pub async fn list_notes(&self, family: NoteFamily) -> Result<Vec<NoteRecord>, NotesApiError> {
        let response = self.client.get(self.url(family.collection())).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(collection = family.collection(), "Note collection is empty");
            return Ok(Vec::new());
        }

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`NotesApiError::Api`]
    /// carrying the status and body on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, NotesApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(NotesApiError::from_response(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, NotesApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl NoteTransport for NotesApi {
    async fn send(
        &self,
        verb: HttpVerb,
        path: &str,
        payload: &NotePayload,
    ) -> Result<NoteRecord, NotesApiError> {
        let url = self.url(path);
        let request = match verb {
            HttpVerb::Create => self.client.post(&url),
            HttpVerb::Update => self.client.patch(&url),
        };

        tracing::debug!(method = verb.method(), url = %url, "Sending note");
        let response = request.json(payload).send().await?;
        let status = response.status().as_u16();

        let record: NoteRecord = Self::parse_response(response).await?;
        tracing::info!(
            method = verb.method(),
            url = %url,
            status,
            note_id = record.id,
            "Note saved"
        );
        Ok(record)
    }
}
