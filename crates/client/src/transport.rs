//! The seam between note forms and the network.

use async_trait::async_trait;
use waypoint_core::{HttpVerb, NotePayload, NoteRecord};

/// Message used when the request never produced an HTTP response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

/// Errors from the notes REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum NotesApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The transport could not reach the server for a reason other than a
    /// `reqwest` failure.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The server returned a non-2xx status code.
    #[error("Notes API error ({status}): {body}")]
    Api {
        status: u16,
        /// The `error` field of the JSON error body, when present.
        detail: Option<String>,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body is not a note record.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NotesApiError {
    /// Build an [`Api`](Self::Api) error from a status and raw body,
    /// extracting the server's `{"error": "..."}` detail if there is one.
    pub fn from_response(status: u16, body: String) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| json.get("error")?.as_str().map(str::to_string));
        NotesApiError::Api {
            status,
            detail,
            body,
        }
    }

    /// Transport-level summary shown to the user.
    pub fn network_message(&self) -> String {
        match self {
            NotesApiError::Request(_) | NotesApiError::Connection(_) => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
            NotesApiError::Api { status, .. } => {
                format!("Request failed with status code {status}")
            }
            NotesApiError::Decode(_) => "Invalid response from server".to_string(),
        }
    }

    /// Server-supplied error detail, when the server sent one.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            NotesApiError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Sends note payloads to the notes API.
///
/// Implemented by [`NotesApi`](crate::NotesApi); tests substitute their own.
#[async_trait]
pub trait NoteTransport: Send + Sync {
    /// Issue `verb` against `path` with `payload` as the JSON body and
    /// return the persisted record.
    async fn send(
        &self,
        verb: HttpVerb,
        path: &str,
        payload: &NotePayload,
    ) -> Result<NoteRecord, NotesApiError>;
}
