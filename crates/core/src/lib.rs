//! Core note authoring logic: domain types, variant resolution and
//! validation. No I/O lives in this crate.

pub mod error;
pub mod form_config;
pub mod note;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use form_config::{resolve, FormConfig, FormValues, HttpVerb};
pub use note::{
    NoteFamily, NoteParent, NotePayload, NoteRecord, NoteType, NoteVariant, Session,
};
pub use types::DbId;
