#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{broadcast, Notify};

use waypoint_client::{NoteTransport, NotesApiError};
use waypoint_core::{DbId, HttpVerb, NotePayload, NoteRecord, NoteVariant, Session};
use waypoint_events::{LifecycleBus, LifecycleEvent};
use waypoint_form::{FormHost, FormServices, NoteForm};

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A request the mock transport received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    pub verb: HttpVerb,
    pub path: String,
    pub payload: NotePayload,
}

/// Scripted [`NoteTransport`] that records every call.
///
/// With a gate, each `send` waits for `gate.notify_one()` before answering.
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<SentRequest>>,
    responses: Mutex<VecDeque<Result<NoteRecord, NotesApiError>>>,
    gate: Option<Arc<Notify>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn respond(self, response: Result<NoteRecord, NotesApiError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NoteTransport for MockTransport {
    async fn send(
        &self,
        verb: HttpVerb,
        path: &str,
        payload: &NotePayload,
    ) -> Result<NoteRecord, NotesApiError> {
        self.sent.lock().unwrap().push(SentRequest {
            verb,
            path: path.to_string(),
            payload: payload.clone(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(NotesApiError::Connection("no scripted response".into())))
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// A callback the form made into its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Submitted(NoteRecord),
    Closed,
}

/// [`FormHost`] that records callbacks in order.
#[derive(Clone, Default)]
pub struct RecordingHost {
    calls: Rc<RefCell<Vec<HostCall>>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn close_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == HostCall::Closed)
            .count()
    }

    pub fn submitted_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, HostCall::Submitted(_)))
            .count()
    }
}

impl FormHost for RecordingHost {
    fn on_submitted(&self, record: NoteRecord) {
        self.calls.borrow_mut().push(HostCall::Submitted(record));
    }

    fn on_close(&self) {
        self.calls.borrow_mut().push(HostCall::Closed);
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn session() -> Session {
    Session::new(7, "a@b.com")
}

/// Everything a test needs to drive one form.
pub struct Harness {
    pub form: NoteForm,
    pub transport: Arc<MockTransport>,
    pub host: RecordingHost,
    pub events: broadcast::Receiver<LifecycleEvent>,
}

pub fn open_form(
    transport: MockTransport,
    variant: NoteVariant,
    parent_id: Option<DbId>,
    existing: Option<&NoteRecord>,
) -> Harness {
    let transport = Arc::new(transport);
    let bus = Arc::new(LifecycleBus::default());
    let events = bus.subscribe();
    let host = RecordingHost::default();
    let services = FormServices::new(transport.clone(), bus);

    let form = NoteForm::open(
        services,
        variant,
        parent_id,
        existing,
        session(),
        Box::new(host.clone()),
    )
    .expect("form should open");

    Harness {
        form,
        transport,
        host,
        events,
    }
}

/// Drain every lifecycle event published so far.
pub fn drain(events: &mut broadcast::Receiver<LifecycleEvent>) -> Vec<LifecycleEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}
