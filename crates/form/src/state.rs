//! Transient state of one open note form.

use std::collections::BTreeSet;

use waypoint_core::form_config::FormValues;
use waypoint_core::validation::{validate, FieldError, NoteField, ValidationResult};
use waypoint_core::NoteVariant;

/// Field values, touched flags, errors and submission flags of one form.
///
/// Owned by exactly one [`NoteForm`](crate::NoteForm); never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    touched: BTreeSet<NoteField>,
    errors: ValidationResult,
    in_flight: bool,
    closed: bool,
}

impl FormState {
    /// Fresh state for the given initial values, already validated.
    pub fn new(values: FormValues, variant: NoteVariant) -> Self {
        let errors = validate(&values, variant);
        Self {
            values,
            touched: BTreeSet::new(),
            errors,
            in_flight: false,
            closed: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// All current errors, touched or not.
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// The error for `field`, but only once the user has touched it.
    pub fn visible_error(&self, field: NoteField) -> Option<&FieldError> {
        if self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_touched(&self, field: NoteField) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn set_body(&mut self, body: String, variant: NoteVariant) {
        self.values.body = body;
        self.touched.insert(NoteField::Body);
        self.revalidate(variant);
    }

    pub(crate) fn set_note_type(&mut self, label: Option<String>, variant: NoteVariant) {
        self.values.note_type = label;
        self.touched.insert(NoteField::NoteType);
        self.revalidate(variant);
    }

    pub(crate) fn touch(&mut self, field: NoteField) {
        self.touched.insert(field);
    }

    /// Mark every field touched so all errors become visible.
    pub(crate) fn touch_all(&mut self) {
        self.touched.extend(NoteField::ALL);
    }

    pub(crate) fn reset(&mut self, values: FormValues, variant: NoteVariant) {
        self.values = values;
        self.touched.clear();
        self.revalidate(variant);
    }

    pub(crate) fn revalidate(&mut self, variant: NoteVariant) -> &ValidationResult {
        self.errors = validate(&self.values, variant);
        &self.errors
    }

    pub(crate) fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }
}
