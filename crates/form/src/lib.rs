//! Note authoring forms.
//!
//! A [`NoteForm`] is one open editor for a city or location note. It owns
//! its [`FormState`], validates on every edit, and submits through the
//! [`NoteTransport`](waypoint_client::NoteTransport) in [`FormServices`],
//! reporting progress on the lifecycle bus and results to its [`FormHost`].

pub mod form;
pub mod host;
pub mod logging;
pub mod services;
pub mod state;

pub use form::{NoteForm, SubmitOutcome};
pub use host::FormHost;
pub use services::FormServices;
pub use state::FormState;
