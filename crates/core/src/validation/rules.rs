//! Validation rule and result types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::note::NoteFamily;

/// Minimum note body length in characters.
pub const MIN_BODY_LENGTH: usize = 3;

/// Maximum note body length in characters.
pub const MAX_BODY_LENGTH: usize = 50;

/// Labels accepted for `note_type`.
pub const NOTE_TYPE_LABELS: &[&str] = &["Communication", "Safety", "Transportation", "Other"];

/// A user-editable field of the note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteField {
    #[serde(rename = "note_body")]
    Body,
    NoteType,
}

impl NoteField {
    pub const ALL: [NoteField; 2] = [NoteField::Body, NoteField::NoteType];

    /// Wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            NoteField::Body => "note_body",
            NoteField::NoteType => "note_type",
        }
    }

    /// Whether the field exists on forms of the given family.
    pub fn applies_to(self, family: NoteFamily) -> bool {
        match self {
            NoteField::Body => true,
            NoteField::NoteType => family == NoteFamily::City,
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The check a rule performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Value must be present and non-empty.
    Required,
    /// Character count must be at least this many.
    MinLength(usize),
    /// Character count must be at most this many.
    MaxLength(usize),
    /// When present, value must be one of these labels.
    OneOf(&'static [&'static str]),
}

/// Classification of a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Required,
    TooShort,
    TooLong,
    InvalidCategory,
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub kind: RuleKind,
    pub error: ValidationErrorKind,
    pub message: &'static str,
}

/// Rules for `note_body`, in evaluation order.
pub const BODY_RULES: &[ValidationRule] = &[
    ValidationRule {
        kind: RuleKind::Required,
        error: ValidationErrorKind::Required,
        message: "Must enter a Note",
    },
    ValidationRule {
        kind: RuleKind::MinLength(MIN_BODY_LENGTH),
        error: ValidationErrorKind::TooShort,
        message: "Must be at least 3 characters",
    },
    ValidationRule {
        kind: RuleKind::MaxLength(MAX_BODY_LENGTH),
        error: ValidationErrorKind::TooLong,
        message: "Must be less than 50 characters",
    },
];

/// Rules for `note_type`, in evaluation order.
pub const NOTE_TYPE_RULES: &[ValidationRule] = &[ValidationRule {
    kind: RuleKind::OneOf(NOTE_TYPE_LABELS),
    error: ValidationErrorKind::InvalidCategory,
    message: "Must be one of: Communication, Safety, Transportation, Other",
}];

/// The rule list for one field.
pub fn rules_for(field: NoteField) -> &'static [ValidationRule] {
    match field {
        NoteField::Body => BODY_RULES,
        NoteField::NoteType => NOTE_TYPE_RULES,
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

/// Per-field errors of one evaluation. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<NoteField, FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: NoteField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NoteField, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    pub(crate) fn insert(&mut self, field: NoteField, error: FieldError) {
        self.errors.insert(field, error);
    }
}
