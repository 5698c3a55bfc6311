//! One open note editor and its submission pipeline.
//!
//! A [`NoteForm`] is driven from a single thread. Its methods take `&self`
//! so that the presentation layer can keep handling input (a second click
//! on submit, a click on cancel) while [`NoteForm::submit`] is suspended on
//! the network call. No state borrow is ever held across that await.

use std::cell::RefCell;

use uuid::Uuid;
use waypoint_core::form_config::{resolve, FormConfig, FormValues};
use waypoint_core::validation::{FieldError, NoteField, ValidationResult};
use waypoint_core::{CoreError, DbId, NoteRecord, NoteVariant, Session};
use waypoint_events::LifecycleEvent;

use crate::host::FormHost;
use crate::services::FormServices;
use crate::state::FormState;

/// Message of the failure event published when a submission future is
/// dropped before the server answered.
const ABANDONED_MESSAGE: &str = "Submission abandoned";

/// Result of one call to [`NoteForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server persisted the note; the host received it and the form
    /// is closed.
    Submitted(NoteRecord),
    /// Validation failed; nothing was sent.
    Invalid(ValidationResult),
    /// The request failed; the form stays open for a retry or cancel.
    Failed { message: String },
    /// A submission was already in flight; nothing was sent.
    Ignored,
    /// The form was closed while the request was in flight. The server's
    /// record is returned but the host was not told about it.
    Discarded(NoteRecord),
    /// The form was already closed; nothing was sent.
    Closed,
}

/// An open note editor.
pub struct NoteForm {
    id: Uuid,
    config: FormConfig,
    session: Session,
    services: FormServices,
    host: Box<dyn FormHost>,
    state: RefCell<FormState>,
}

impl NoteForm {
    /// Open a form of `variant`.
    ///
    /// * `parent_id` - the city or location id for the create variants.
    /// * `existing`  - the record to edit for the edit variants.
    ///
    /// Fails when the variant's inputs are missing or inconsistent; that is
    /// a composition bug in the caller and is logged as an error.
    pub fn open(
        services: FormServices,
        variant: NoteVariant,
        parent_id: Option<DbId>,
        existing: Option<&NoteRecord>,
        session: Session,
        host: Box<dyn FormHost>,
    ) -> Result<Self, CoreError> {
        let config = resolve(variant, parent_id, existing).map_err(|e| {
            tracing::error!(variant = %variant, error = %e, "Cannot open note form");
            e
        })?;
        Self::with_config(services, config, session, host)
    }

    /// Open a form from an already resolved configuration.
    ///
    /// Fails when the config disagrees with its variant (parent from the
    /// other family, a category on a location form, or a path or verb that
    /// does not match).
    pub fn with_config(
        services: FormServices,
        config: FormConfig,
        session: Session,
        host: Box<dyn FormHost>,
    ) -> Result<Self, CoreError> {
        config.check().map_err(|e| {
            tracing::error!(
                variant = %config.variant,
                error = %e,
                "Inconsistent note form config"
            );
            e
        })?;

        let id = Uuid::new_v4();
        let state = FormState::new(config.initial_values.clone(), config.variant);
        tracing::debug!(
            form_id = %id,
            variant = %config.variant,
            path = %config.resource_path,
            "Note form opened"
        );
        Ok(Self {
            id,
            config,
            session,
            services,
            host,
            state: RefCell::new(state),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn variant(&self) -> NoteVariant {
        self.config.variant
    }

    pub fn header(&self) -> &str {
        &self.config.header
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Fields this form renders, in display order.
    pub fn fields(&self) -> Vec<NoteField> {
        let family = self.config.variant.family();
        NoteField::ALL
            .into_iter()
            .filter(|field| field.applies_to(family))
            .collect()
    }

    /// Snapshot of the full form state.
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn values(&self) -> FormValues {
        self.state.borrow().values().clone()
    }

    pub fn errors(&self) -> ValidationResult {
        self.state.borrow().errors().clone()
    }

    /// The inline error to display next to `field`, if any.
    pub fn visible_error(&self, field: NoteField) -> Option<FieldError> {
        self.state.borrow().visible_error(field).cloned()
    }

    /// `false` while a submission is in flight or after the form closed.
    pub fn can_submit(&self) -> bool {
        let state = self.state.borrow();
        !state.is_submitting() && !state.is_closed()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().is_closed()
    }

    // ---- editing ----

    pub fn set_body(&self, body: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        if state.is_closed() {
            tracing::warn!(form_id = %self.id, "Edit on closed note form ignored");
            return;
        }
        state.set_body(body.into(), self.config.variant);
    }

    /// Set the category label; `None` clears it.
    ///
    /// Rejected on location forms, which have no category.
    pub fn set_note_type(&self, label: Option<&str>) -> Result<(), CoreError> {
        self.ensure_applies(NoteField::NoteType)?;
        let mut state = self.state.borrow_mut();
        if state.is_closed() {
            tracing::warn!(form_id = %self.id, "Edit on closed note form ignored");
            return Ok(());
        }
        state.set_note_type(label.map(str::to_string), self.config.variant);
        Ok(())
    }

    /// Mark a field as visited (e.g. on blur) without changing it.
    pub fn touch(&self, field: NoteField) -> Result<(), CoreError> {
        self.ensure_applies(field)?;
        let mut state = self.state.borrow_mut();
        if state.is_closed() {
            tracing::warn!(form_id = %self.id, "Touch on closed note form ignored");
            return Ok(());
        }
        state.touch(field);
        Ok(())
    }

    /// Restore the initial values and clear touched flags.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        if state.is_closed() {
            tracing::warn!(form_id = %self.id, "Reset on closed note form ignored");
            return;
        }
        state.reset(self.config.initial_values.clone(), self.config.variant);
    }

    fn ensure_applies(&self, field: NoteField) -> Result<(), CoreError> {
        if field.applies_to(self.config.variant.family()) {
            Ok(())
        } else {
            Err(CoreError::FieldNotApplicable {
                field: field.name(),
                variant: self.config.variant.as_str(),
            })
        }
    }

    // ---- submission ----

    /// Validate and send the note.
    ///
    /// On success the host gets [`FormHost::on_submitted`] and then
    /// [`FormHost::on_close`]. Failures never reach the host; they are
    /// published on the lifecycle bus and returned as
    /// [`SubmitOutcome::Failed`].
    pub async fn submit(&self) -> SubmitOutcome {
        let variant = self.config.variant;

        let payload = {
            let mut state = self.state.borrow_mut();
            if state.is_closed() {
                return SubmitOutcome::Closed;
            }
            if state.is_submitting() {
                tracing::debug!(form_id = %self.id, "Submission already in flight, ignoring");
                return SubmitOutcome::Ignored;
            }

            state.touch_all();
            let result = state.revalidate(variant).clone();
            if !result.is_valid() {
                tracing::debug!(form_id = %self.id, errors = result.len(), "Note form invalid");
                return SubmitOutcome::Invalid(result);
            }

            state.set_in_flight(true);
            state.values().to_payload(&self.session)
        };

        let flight = InFlight::begin(self);

        let result = self
            .services
            .transport
            .send(self.config.http_verb, &self.config.resource_path, &payload)
            .await;

        match result {
            Ok(record) => {
                let closed = flight.finish(LifecycleEvent::success(self.id, &payload.body));
                if closed {
                    tracing::info!(
                        form_id = %self.id,
                        note_id = record.id,
                        "Note saved after form closed, result discarded"
                    );
                    return SubmitOutcome::Discarded(record);
                }

                self.state.borrow_mut().close();
                tracing::info!(
                    form_id = %self.id,
                    variant = %variant,
                    note_id = record.id,
                    "Note submitted"
                );
                self.host.on_submitted(record.clone());
                self.host.on_close();
                SubmitOutcome::Submitted(record)
            }
            Err(err) => {
                let event = LifecycleEvent::failure(
                    self.id,
                    &err.network_message(),
                    err.server_detail(),
                );
                let message = event.message.clone();
                tracing::warn!(
                    form_id = %self.id,
                    variant = %variant,
                    error = %err,
                    "Note submission failed"
                );
                flight.finish(event);
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Dismiss the form without submitting.
    ///
    /// Calls [`FormHost::on_close`] unless the form is already closed.
    /// Returns whether it did. A submission still in flight completes but
    /// its result is discarded.
    pub fn cancel(&self) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.is_closed() {
                return false;
            }
            if state.is_submitting() {
                tracing::info!(
                    form_id = %self.id,
                    "Note form closed with submission in flight"
                );
            }
            state.close();
        }
        self.host.on_close();
        true
    }
}

/// A submission between its pending event and its terminal event.
///
/// Dropping it unfinished (the submit future was dropped mid-request)
/// still resolves the pending event and clears the in-flight flag.
struct InFlight<'a> {
    form: &'a NoteForm,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn begin(form: &'a NoteForm) -> Self {
        form.services
            .bus
            .publish(LifecycleEvent::pending(form.id).with_variant(form.config.variant));
        Self {
            form,
            finished: false,
        }
    }

    /// Publish the terminal event and clear the in-flight flag. Returns
    /// whether the form was closed meanwhile.
    fn finish(mut self, event: LifecycleEvent) -> bool {
        self.finished = true;
        let closed = {
            let mut state = self.form.state.borrow_mut();
            state.set_in_flight(false);
            state.is_closed()
        };
        self.form
            .services
            .bus
            .publish(event.with_variant(self.form.config.variant));
        closed
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Ok(mut state) = self.form.state.try_borrow_mut() {
            state.set_in_flight(false);
        }
        self.form.services.bus.publish(
            LifecycleEvent::failure(self.form.id, ABANDONED_MESSAGE, None)
                .with_variant(self.form.config.variant),
        );
    }
}
