use waypoint_core::NoteRecord;

/// The view that opened a note form.
///
/// A form calls [`on_submitted`](Self::on_submitted) at most once, only
/// after the server accepted the note, and always before
/// [`on_close`](Self::on_close). `on_close` runs exactly once per form,
/// after a successful submit or on cancel.
pub trait FormHost {
    /// The server persisted `record`; update lists and detail views.
    fn on_submitted(&self, record: NoteRecord);

    /// The form is dismissed; tear it down.
    fn on_close(&self);
}
