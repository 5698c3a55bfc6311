//! Note form validation engine.
//!
//! A small rule table per field plus a pure evaluator. Runs on every field
//! change and once more right before submission.

pub mod evaluator;
pub mod rules;

pub use evaluator::{validate, validate_field};
pub use rules::{FieldError, NoteField, ValidationErrorKind, ValidationResult};
