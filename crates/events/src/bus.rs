//! In-process lifecycle bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`LifecycleBus`] fans [`LifecycleEvent`]s out to every subscriber. Share
//! it via `Arc<LifecycleBus>` between the forms and the presentation layer.

use tokio::sync::broadcast;

use crate::lifecycle::LifecycleEvent;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Fan-out channel for submission lifecycle events.
///
/// # Usage
///
/// ```rust
/// use uuid::Uuid;
/// use waypoint_events::{LifecycleBus, LifecycleEvent};
///
/// let bus = LifecycleBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(LifecycleEvent::pending(Uuid::new_v4()));
/// assert!(rx.try_recv().is_ok());
/// ```
pub struct LifecycleBus {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl LifecycleBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: LifecycleEvent) {
        tracing::debug!(
            form_id = %event.form_id,
            state = ?event.state,
            message = %event.message,
            "Lifecycle event"
        );
        // A send error only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }
}

impl Default for LifecycleBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
