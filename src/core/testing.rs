//! Test doubles shared by the core unit tests

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::http::{
    ApiClient, ClientEvent, OutgoingRequest, RawResponse, Transport, TransportError,
};
use crate::core::session::{Role, Session, StorageBackend, StorageError, User};
use crate::core::subscription::Subscription;

#[derive(Default)]
struct Script {
    responses: VecDeque<Result<RawResponse, String>>,
    sent: Vec<OutgoingRequest>,
}

/// Transport that replays queued responses in order and records every request.
///
/// Each send yields to the executor once, so requests driven concurrently interleave.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response
    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond_raw(status, &body.to_string())
    }

    /// Queue a response with an arbitrary body
    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.script
            .borrow_mut()
            .responses
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    /// Queue a transport failure
    pub fn fail(&self, message: &str) -> &Self {
        self.script
            .borrow_mut()
            .responses
            .push_back(Err(message.to_string()));
        self
    }

    pub fn sent(&self) -> Vec<OutgoingRequest> {
        self.script.borrow().sent.clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().responses.len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let next = {
            let mut script = self.script.borrow_mut();
            script.sent.push(request);
            script.responses.pop_front()
        };

        tokio::task::yield_now().await;

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Send(message)),
            None => Err(TransportError::Send("no scripted response left".to_string())),
        }
    }
}

/// Backend whose every operation fails
pub struct UnavailableStorage;

impl StorageBackend for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

pub fn sample_user(role: Role) -> User {
    User {
        id: 1,
        username: "sam".to_string(),
        email: "a@b.com".to_string(),
        first_name: Some("Sam".to_string()),
        last_name: Some("Hill".to_string()),
        role,
    }
}

pub fn sample_session(access_token: &str, refresh_token: &str, role: Role) -> Session {
    Session {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        user: sample_user(role),
    }
}

/// Client events collected while the log is alive
pub struct EventLog {
    events: Rc<RefCell<Vec<ClientEvent>>>,
    _subscription: Subscription,
}

impl EventLog {
    pub fn borrow(&self) -> Ref<'_, Vec<ClientEvent>> {
        self.events.borrow()
    }
}

pub fn record_events<T: Transport>(client: &ApiClient<T>) -> EventLog {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let subscription = client.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    EventLog {
        events,
        _subscription: subscription,
    }
}
