//! HTTP access to the notes REST API.
//!
//! [`NoteTransport`] is the seam the note forms submit through;
//! [`NotesApi`] implements it over [`reqwest`].

pub mod api;
pub mod config;
pub mod transport;

pub use api::NotesApi;
pub use config::ClientConfig;
pub use transport::{NoteTransport, NotesApiError};
