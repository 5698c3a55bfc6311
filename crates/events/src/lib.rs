//! Submission lifecycle notifications.
//!
//! Note forms report submission progress as [`LifecycleEvent`]s on a
//! [`LifecycleBus`]. The presentation layer subscribes and renders them
//! (toasts, status bars, logs); the forms never depend on how.

pub mod bus;
pub mod lifecycle;

pub use bus::LifecycleBus;
pub use lifecycle::{LifecycleEvent, LifecycleState};
