//! Lifecycle event envelope for note submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use waypoint_core::NoteVariant;

/// Message shown while a submission is in flight.
pub const PENDING_MESSAGE: &str = "Loading...";

/// Stage of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Pending,
    Success,
    Failure,
}

/// A user-visible notification about one submission attempt.
///
/// Every `Pending` event is followed by exactly one `Success` or `Failure`
/// event with the same `form_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Identifies the form instance that submitted.
    pub form_id: Uuid,

    pub state: LifecycleState,

    /// Rendered notification text.
    pub message: String,

    /// Canonical variant name of the submitting form, when known.
    pub variant: Option<String>,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl LifecycleEvent {
    fn new(form_id: Uuid, state: LifecycleState, message: String) -> Self {
        Self {
            form_id,
            state,
            message,
            variant: None,
            timestamp: Utc::now(),
        }
    }

    /// `Loading...`
    pub fn pending(form_id: Uuid) -> Self {
        Self::new(form_id, LifecycleState::Pending, PENDING_MESSAGE.to_string())
    }

    /// `Success: {body}`
    pub fn success(form_id: Uuid, body: &str) -> Self {
        Self::new(form_id, LifecycleState::Success, format!("Success: {body}"))
    }

    /// `Error: {network_message}: {detail}`, or `Error: {network_message}`
    /// when the server supplied no detail.
    pub fn failure(form_id: Uuid, network_message: &str, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => format!("Error: {network_message}: {detail}"),
            None => format!("Error: {network_message}"),
        };
        Self::new(form_id, LifecycleState::Failure, message)
    }

    /// Tag the event with the submitting form's variant.
    pub fn with_variant(mut self, variant: NoteVariant) -> Self {
        self.variant = Some(variant.as_str().to_string());
        self
    }

    /// `true` for `Success` and `Failure`.
    pub fn is_terminal(&self) -> bool {
        self.state != LifecycleState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_message_is_loading() {
        let event = LifecycleEvent::pending(Uuid::new_v4());
        assert_eq!(event.state, LifecycleState::Pending);
        assert_eq!(event.message, "Loading...");
        assert!(!event.is_terminal());
    }

    #[test]
    fn success_message_carries_body() {
        let event = LifecycleEvent::success(Uuid::new_v4(), "Great transit");
        assert_eq!(event.message, "Success: Great transit");
        assert!(event.is_terminal());
    }

    #[test]
    fn failure_message_includes_server_detail() {
        let event = LifecycleEvent::failure(
            Uuid::new_v4(),
            "Request failed with status code 400",
            Some("city_id does not exist."),
        );
        assert_eq!(
            event.message,
            "Error: Request failed with status code 400: city_id does not exist."
        );
        assert_eq!(event.state, LifecycleState::Failure);
    }

    #[test]
    fn failure_message_without_detail() {
        let event = LifecycleEvent::failure(Uuid::new_v4(), "Network Error", None);
        assert_eq!(event.message, "Error: Network Error");
    }

    #[test]
    fn variant_tag_uses_canonical_name() {
        let event = LifecycleEvent::pending(Uuid::new_v4()).with_variant(NoteVariant::EditCityNote);
        assert_eq!(event.variant.as_deref(), Some("edit_city_note"));
    }

    #[test]
    fn state_serializes_lowercase() {
        let event = LifecycleEvent::pending(Uuid::nil());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["state"], "pending");
        assert_eq!(json["form_id"], "00000000-0000-0000-0000-000000000000");
    }
}
