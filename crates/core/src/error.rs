/// Errors raised while building a note form configuration.
///
/// All variants indicate a mistake in how the hosting view composed the
/// form; none of them is recoverable by the end user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid note variant: '{0}'")]
    InvalidVariant(String),

    #[error("Variant {variant} requires an existing note record")]
    MissingRecord { variant: &'static str },

    #[error("Variant {variant} requires a parent {entity} id")]
    MissingParent {
        variant: &'static str,
        entity: &'static str,
    },

    #[error("Record mismatch for {variant}: {reason}")]
    RecordMismatch {
        variant: &'static str,
        reason: String,
    },

    #[error("Field {field} is not editable on {variant}")]
    FieldNotApplicable {
        field: &'static str,
        variant: &'static str,
    },
}
