//! Note domain types shared by the form, the transport and the event bus.
//!
//! City notes and location notes share one record shape. Which parent a
//! note hangs off is a [`NoteParent`] sum type, so a record can never carry
//! both a `city_id` and a `location_id`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Note type (category)
// ---------------------------------------------------------------------------

/// Category of a city note. Location notes carry no category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteType {
    Communication,
    Safety,
    Transportation,
    #[default]
    Other,
}

impl NoteType {
    /// All categories, in the order the category picker lists them.
    pub const ALL: [NoteType; 4] = [
        NoteType::Communication,
        NoteType::Safety,
        NoteType::Transportation,
        NoteType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoteType::Communication => "Communication",
            NoteType::Safety => "Safety",
            NoteType::Transportation => "Transportation",
            NoteType::Other => "Other",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteType {
    type Err = String;

    /// Parse a category label. Matching is exact (case-sensitive), the same
    /// way the server checks `note_type`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("{s} not an allowed value for note_type"))
    }
}

// ---------------------------------------------------------------------------
// Family and variant
// ---------------------------------------------------------------------------

/// Which kind of entity a note is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteFamily {
    City,
    Location,
}

impl NoteFamily {
    /// REST collection for notes of this family.
    pub fn collection(self) -> &'static str {
        match self {
            NoteFamily::City => "citynotes",
            NoteFamily::Location => "locationnotes",
        }
    }

    /// Lower-case entity name, used in error messages and log fields.
    pub fn entity(self) -> &'static str {
        match self {
            NoteFamily::City => "city",
            NoteFamily::Location => "location",
        }
    }

    /// Title-case label, used in form headers.
    pub fn label(self) -> &'static str {
        match self {
            NoteFamily::City => "City",
            NoteFamily::Location => "Location",
        }
    }
}

/// The four editors a note form can behave as.
///
/// Fixed for the lifetime of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteVariant {
    NewCityNote,
    EditCityNote,
    NewLocationNote,
    EditLocationNote,
}

impl NoteVariant {
    pub const ALL: [NoteVariant; 4] = [
        NoteVariant::NewCityNote,
        NoteVariant::EditCityNote,
        NoteVariant::NewLocationNote,
        NoteVariant::EditLocationNote,
    ];

    pub fn family(self) -> NoteFamily {
        match self {
            NoteVariant::NewCityNote | NoteVariant::EditCityNote => NoteFamily::City,
            NoteVariant::NewLocationNote | NoteVariant::EditLocationNote => NoteFamily::Location,
        }
    }

    /// `true` for the variants that modify an existing record.
    pub fn is_edit(self) -> bool {
        matches!(self, NoteVariant::EditCityNote | NoteVariant::EditLocationNote)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteVariant::NewCityNote => "new_city_note",
            NoteVariant::EditCityNote => "edit_city_note",
            NoteVariant::NewLocationNote => "new_location_note",
            NoteVariant::EditLocationNote => "edit_location_note",
        }
    }
}

impl fmt::Display for NoteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteVariant {
    type Err = CoreError;

    /// Accepts the canonical snake_case names as well as the tags the web
    /// views pass around (`newCityNote`, `citynotes`, `newLocNote`,
    /// `locationnotes`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_city_note" | "newCityNote" => Ok(NoteVariant::NewCityNote),
            "edit_city_note" | "citynotes" => Ok(NoteVariant::EditCityNote),
            "new_location_note" | "newLocNote" => Ok(NoteVariant::NewLocationNote),
            "edit_location_note" | "locationnotes" => Ok(NoteVariant::EditLocationNote),
            other => Err(CoreError::InvalidVariant(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Parent reference
// ---------------------------------------------------------------------------

/// Foreign key of the entity a note belongs to.
///
/// Serialized flat into the record as either `city_id` or `location_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteParent {
    City { city_id: DbId },
    Location { location_id: DbId },
}

impl NoteParent {
    pub fn city(city_id: DbId) -> Self {
        NoteParent::City { city_id }
    }

    pub fn location(location_id: DbId) -> Self {
        NoteParent::Location { location_id }
    }

    pub fn family(self) -> NoteFamily {
        match self {
            NoteParent::City { .. } => NoteFamily::City,
            NoteParent::Location { .. } => NoteFamily::Location,
        }
    }

    pub fn id(self) -> DbId {
        match self {
            NoteParent::City { city_id } => city_id,
            NoteParent::Location { location_id } => location_id,
        }
    }

    /// Build the parent reference for `family` from a bare id.
    pub fn for_family(family: NoteFamily, id: DbId) -> Self {
        match family {
            NoteFamily::City => NoteParent::city(id),
            NoteFamily::Location => NoteParent::location(id),
        }
    }
}

// ---------------------------------------------------------------------------
// Records and payloads
// ---------------------------------------------------------------------------

/// A note as the server stores and returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Server-assigned id; `None` only for records that were never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,

    #[serde(rename = "note_body")]
    pub body: String,

    /// Present on city notes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_type: Option<NoteType>,

    #[serde(flatten)]
    pub parent: NoteParent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,

    #[serde(
        default,
        rename = "val_user_email",
        alias = "author_email",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_email: Option<String>,
}

/// The authenticated user on whose behalf a note is written.
///
/// Supplied by the hosting view; the form only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: DbId,
    pub email: String,
}

impl Session {
    pub fn new(user_id: DbId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// JSON body sent to `POST`/`PATCH` note endpoints.
///
/// `user_id` and `author_email` are filled from the [`Session`] and have no
/// counterpart in the editable form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotePayload {
    #[serde(rename = "note_body")]
    pub body: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_type: Option<NoteType>,

    #[serde(flatten)]
    pub parent: NoteParent,

    pub user_id: DbId,

    #[serde(rename = "val_user_email")]
    pub author_email: String,
}
