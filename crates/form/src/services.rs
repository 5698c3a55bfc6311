use std::sync::Arc;

use waypoint_client::{ClientConfig, NoteTransport, NotesApi, NotesApiError};
use waypoint_events::LifecycleBus;

/// Shared collaborators every note form submits through.
///
/// Cheap to clone; one instance serves all forms of an application.
#[derive(Clone)]
pub struct FormServices {
    pub transport: Arc<dyn NoteTransport>,
    pub bus: Arc<LifecycleBus>,
}

impl FormServices {
    pub fn new(transport: Arc<dyn NoteTransport>, bus: Arc<LifecycleBus>) -> Self {
        Self { transport, bus }
    }

    /// Services backed by a [`NotesApi`] built from `config` and a fresh
    /// lifecycle bus.
    pub fn from_config(config: &ClientConfig) -> Result<Self, NotesApiError> {
        let api = NotesApi::new(config)?;
        tracing::info!(base_url = %api.base_url(), "Notes API client ready");
        Ok(Self::new(Arc::new(api), Arc::new(LifecycleBus::default())))
    }
}
