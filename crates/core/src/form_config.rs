//! Variant resolution: which values, header and endpoint a note form uses.
//!
//! Pure logic. The hosting view picks a [`NoteVariant`] and supplies either
//! the parent id (create) or the record being edited (update).

use crate::error::CoreError;
use crate::note::{
    NoteFamily, NoteParent, NotePayload, NoteRecord, NoteType, NoteVariant, Session,
};
use crate::types::DbId;

/// How the form's payload reaches the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    /// `POST` to the collection.
    Create,
    /// `PATCH` to the record.
    Update,
}

impl HttpVerb {
    pub fn method(self) -> &'static str {
        match self {
            HttpVerb::Create => "POST",
            HttpVerb::Update => "PATCH",
        }
    }
}

/// Editable values of one note form.
///
/// `note_type` is held as the raw label coming from the category picker
/// and only becomes a [`NoteType`] once validation accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub body: String,
    pub note_type: Option<String>,
    pub parent: NoteParent,
}

impl FormValues {
    /// Merge the values with the session identity into a request body.
    ///
    /// Meant to run after validation passed; an unparseable category is
    /// dropped rather than sent. Location notes never carry a category.
    pub fn to_payload(&self, session: &Session) -> NotePayload {
        let note_type = match self.parent {
            NoteParent::City { .. } => self
                .note_type
                .as_deref()
                .and_then(|label| label.parse::<NoteType>().ok()),
            NoteParent::Location { .. } => None,
        };

        NotePayload {
            body: self.body.clone(),
            note_type,
            parent: self.parent,
            user_id: session.user_id,
            author_email: session.email.clone(),
        }
    }
}

/// Everything a form instance needs to render and submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub variant: NoteVariant,
    pub initial_values: FormValues,
    pub header: String,
    /// Path relative to the API base URL, e.g. `citynotes/12`.
    pub resource_path: String,
    pub http_verb: HttpVerb,
}

impl FormConfig {
    /// Check that a hand-built configuration agrees with its variant.
    ///
    /// [`resolve`] always produces a consistent config. This guards configs
    /// assembled or modified by the caller.
    pub fn check(&self) -> Result<(), CoreError> {
        let variant = self.variant;
        let family = variant.family();
        let mismatch = |reason: String| CoreError::RecordMismatch {
            variant: variant.as_str(),
            reason,
        };

        if self.initial_values.parent.family() != family {
            return Err(mismatch(format!(
                "parent is a {}, expected a {}",
                self.initial_values.parent.family().entity(),
                family.entity()
            )));
        }
        if family == NoteFamily::Location && self.initial_values.note_type.is_some() {
            return Err(CoreError::FieldNotApplicable {
                field: "note_type",
                variant: variant.as_str(),
            });
        }

        let expected_verb = if variant.is_edit() {
            HttpVerb::Update
        } else {
            HttpVerb::Create
        };
        if self.http_verb != expected_verb {
            return Err(mismatch(format!("{} uses {}", variant, expected_verb.method())));
        }

        let collection = family.collection();
        let path_ok = match self.resource_path.strip_prefix(collection) {
            Some("") => !variant.is_edit(),
            Some(rest) => variant.is_edit() && rest.starts_with('/') && rest.len() > 1,
            None => false,
        };
        if !path_ok {
            return Err(mismatch(format!(
                "path {} is outside {collection}",
                self.resource_path
            )));
        }
        Ok(())
    }
}

/// Build the configuration for a form of the given variant.
///
/// * `parent_id` - id of the city or location a new note is attached to;
///   required for the create variants, ignored for edits.
/// * `existing`  - the record being edited; required for the edit variants,
///   ignored for creates.
pub fn resolve(
    variant: NoteVariant,
    parent_id: Option<DbId>,
    existing: Option<&NoteRecord>,
) -> Result<FormConfig, CoreError> {
    let family = variant.family();

    let (initial_values, resource_path, http_verb) = match variant {
        NoteVariant::NewCityNote | NoteVariant::NewLocationNote => {
            let parent_id = parent_id.ok_or(CoreError::MissingParent {
                variant: variant.as_str(),
                entity: family.entity(),
            })?;
            let note_type = match variant {
                NoteVariant::NewCityNote => Some(NoteType::default().as_str().to_string()),
                _ => None,
            };
            let values = FormValues {
                body: String::new(),
                note_type,
                parent: NoteParent::for_family(family, parent_id),
            };
            (values, family.collection().to_string(), HttpVerb::Create)
        }
        NoteVariant::EditCityNote | NoteVariant::EditLocationNote => {
            let record = existing.ok_or(CoreError::MissingRecord {
                variant: variant.as_str(),
            })?;
            let id = record.id.ok_or_else(|| CoreError::RecordMismatch {
                variant: variant.as_str(),
                reason: "record has no id".to_string(),
            })?;
            if record.parent.family() != family {
                return Err(CoreError::RecordMismatch {
                    variant: variant.as_str(),
                    reason: format!("record {id} is a {} note", record.parent.family().entity()),
                });
            }
            let note_type = match variant {
                NoteVariant::EditCityNote => Some(
                    record
                        .note_type
                        .unwrap_or_default()
                        .as_str()
                        .to_string(),
                ),
                _ => None,
            };
            let values = FormValues {
                body: record.body.clone(),
                note_type,
                parent: record.parent,
            };
            (
                values,
                format!("{}/{id}", family.collection()),
                HttpVerb::Update,
            )
        }
    };

    let action = if variant.is_edit() { "Edit" } else { "Create New" };

    Ok(FormConfig {
        variant,
        initial_values,
        header: format!("{action} {} Note", family.label()),
        resource_path,
        http_verb,
    })
}
