//! Evaluates the note rule table against form values. No I/O.

use crate::form_config::FormValues;
use crate::note::NoteVariant;

use super::rules::{rules_for, FieldError, NoteField, RuleKind, ValidationResult, ValidationRule};

/// Evaluate every field that applies to `variant`.
pub fn validate(values: &FormValues, variant: NoteVariant) -> ValidationResult {
    let mut result = ValidationResult::default();

    for field in NoteField::ALL {
        if let Some(error) = validate_field(field, values, variant) {
            result.insert(field, error);
        }
    }

    result
}

/// Evaluate one field. Returns the first failing rule's error, if any.
///
/// Fields that do not exist on the variant's family always pass.
pub fn validate_field(
    field: NoteField,
    values: &FormValues,
    variant: NoteVariant,
) -> Option<FieldError> {
    if !field.applies_to(variant.family()) {
        return None;
    }

    let value = field_value(field, values);
    rules_for(field)
        .iter()
        .find(|rule| !passes(rule, value))
        .map(|rule| FieldError {
            kind: rule.error,
            message: rule.message.to_string(),
        })
}

fn field_value(field: NoteField, values: &FormValues) -> Option<&str> {
    match field {
        NoteField::Body => Some(values.body.as_str()),
        NoteField::NoteType => values.note_type.as_deref(),
    }
}

fn passes(rule: &ValidationRule, value: Option<&str>) -> bool {
    match rule.kind {
        RuleKind::Required => value.is_some_and(|v| !v.is_empty()),
        // Length rules leave presence to `Required`.
        RuleKind::MinLength(min) => value.map_or(true, |v| v.chars().count() >= min),
        RuleKind::MaxLength(max) => value.map_or(true, |v| v.chars().count() <= max),
        RuleKind::OneOf(allowed) => value.map_or(true, |v| allowed.contains(&v)),
    }
}
