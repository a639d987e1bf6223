//! Auth session manager
//!
//! Owns the authentication lifecycle:
//! - `check_auth` validates a persisted session against `/auth/me` once at startup
//! - `login` / `register` establish a session and persist it
//! - `logout` always ends the session locally, whatever the backend says
//!
//! State changes are pushed to subscribers (the UI context, the route guard).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Deserialize;

use super::model::{Credentials, Registration, Role, Session, User};
use crate::core::http::{ApiClient, ApiError, ApiRequest, ClientEvent, Transport};
use crate::core::subscription::{Listeners, Subscription};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const ME_PATH: &str = "/auth/me";

/// Authentication state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Startup session check not finished yet
    #[default]
    Unknown,
    /// User is authenticated
    Authenticated(User),
    /// User is not authenticated
    Unauthenticated,
}

impl AuthState {
    pub fn is_unknown(&self) -> bool {
        matches!(self, AuthState::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }

    fn label(&self) -> &'static str {
        match self {
            AuthState::Unknown => "unknown",
            AuthState::Authenticated(_) => "authenticated",
            AuthState::Unauthenticated => "unauthenticated",
        }
    }
}

/// Login / register response
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
}

impl AuthResponse {
    fn into_session(self) -> Result<Session, ApiError> {
        match (self.access_token, self.refresh_token, self.user) {
            (Some(access_token), Some(refresh_token), Some(user)) if !access_token.is_empty() => {
                Ok(Session {
                    access_token,
                    refresh_token,
                    user,
                })
            }
            _ => Err(ApiError::Decode(
                "auth response is missing tokens or user".to_string(),
            )),
        }
    }
}

/// `/auth/me` response
#[derive(Debug, Deserialize)]
struct IdentityResponse {
    user: User,
}

/// Session manager shared by the UI. Clones share state.
pub struct SessionManager<T> {
    client: Rc<ApiClient<T>>,
    state: Rc<RefCell<AuthState>>,
    listeners: Listeners<AuthState>,
    auth_checked: Rc<Cell<bool>>,
    _expiry: Rc<Subscription>,
}

impl<T> Clone for SessionManager<T> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            state: Rc::clone(&self.state),
            listeners: self.listeners.clone(),
            auth_checked: Rc::clone(&self.auth_checked),
            _expiry: Rc::clone(&self._expiry),
        }
    }
}

impl<T: Transport> SessionManager<T> {
    pub fn new(client: Rc<ApiClient<T>>) -> Self {
        let state = Rc::new(RefCell::new(AuthState::Unknown));
        let listeners = Listeners::new();

        // A failed refresh anywhere in the app ends the session here too
        let expiry = {
            let state = Rc::clone(&state);
            let listeners = listeners.clone();
            client.subscribe(move |event| {
                if let ClientEvent::SessionExpired { .. } = event {
                    apply_transition(&state, &listeners, AuthState::Unauthenticated);
                }
            })
        };

        Self {
            client,
            state,
            listeners,
            auth_checked: Rc::new(Cell::new(false)),
            _expiry: Rc::new(expiry),
        }
    }

    pub fn client(&self) -> &Rc<ApiClient<T>> {
        &self.client
    }

    /// Current state snapshot
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receive every state change until the returned guard is dropped
    pub fn subscribe(&self, callback: impl Fn(&AuthState) + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }

    /// Rebuild the in-memory session from storage, validated by `/auth/me`.
    ///
    /// Only the first call asks the backend; later calls return the current state.
    pub async fn check_auth(&self) -> AuthState {
        if self.auth_checked.replace(true) {
            return self.state();
        }

        let store = self.client.store();
        let Some(checked_token) = store.access_token() else {
            self.transition(AuthState::Unauthenticated);
            return self.state();
        };

        let identity = self.fetch_identity().await;

        // A login or logout that finished while /auth/me was in flight owns the session now
        let superseded = !self.state.borrow().is_unknown()
            || store.access_token().as_deref() != Some(checked_token.as_str());
        if superseded {
            tracing::debug!("startup session check superseded");
            return self.state();
        }

        match identity {
            Ok(user) => {
                store.replace_user(&user);
                self.transition(AuthState::Authenticated(user));
            }
            Err(err) => {
                tracing::info!(error = %err, "stored session rejected, signing out");
                store.clear();
                self.transition(AuthState::Unauthenticated);
            }
        }

        self.state()
    }

    /// Sign in with email and password
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let request = ApiRequest::post(LOGIN_PATH).json(credentials)?.no_refresh();
        self.establish(request).await
    }

    /// Create an account and sign in
    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let request = ApiRequest::post(REGISTER_PATH)
            .json(registration)?
            .no_refresh();
        self.establish(request).await
    }

    async fn establish(&self, request: ApiRequest) -> Result<User, ApiError> {
        let response: AuthResponse = self.client.request_json(request).await?;
        let session = response.into_session()?;

        self.client
            .store()
            .write(&session)
            .map_err(|err| ApiError::Storage(err.to_string()))?;
        self.auth_checked.set(true);
        self.transition(AuthState::Authenticated(session.user.clone()));

        Ok(session.user)
    }

    /// End the session. Never fails: local state is cleared even if the backend call does.
    pub async fn logout(&self) {
        if self.client.store().access_token().is_some() {
            let request = ApiRequest::post(LOGOUT_PATH).no_refresh();
            if let Err(err) = self.client.send(request).await {
                tracing::warn!(error = %err, "logout request failed, clearing local session anyway");
            }
        }

        self.client.store().clear();
        self.transition(AuthState::Unauthenticated);
    }

    async fn fetch_identity(&self) -> Result<User, ApiError> {
        let response: IdentityResponse = self
            .client
            .request_json(ApiRequest::get(ME_PATH).no_refresh())
            .await?;
        Ok(response.user)
    }

    fn transition(&self, next: AuthState) {
        apply_transition(&self.state, &self.listeners, next);
    }
}

fn apply_transition(state: &RefCell<AuthState>, listeners: &Listeners<AuthState>, next: AuthState) {
    {
        let mut current = state.borrow_mut();
        if *current == next {
            return;
        }
        tracing::info!(from = current.label(), to = next.label(), "auth state changed");
        *current = next.clone();
    }
    listeners.emit(&next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ClientConfig;
    use crate::core::http::{ApiError, REFRESH_PATH};
    use crate::core::session::{MemoryStorage, SessionStore};
    use crate::core::testing::{ScriptedTransport, UnavailableStorage, sample_session};
    use serde_json::json;

    fn manager_over(
        transport: &ScriptedTransport,
        backend: &MemoryStorage,
    ) -> SessionManager<ScriptedTransport> {
        let client = ApiClient::new(
            transport.clone(),
            SessionStore::new(backend.clone()),
            ClientConfig::default(),
        );
        SessionManager::new(Rc::new(client))
    }

    fn record_states(manager: &SessionManager<ScriptedTransport>) -> (Rc<RefCell<Vec<AuthState>>>, Subscription) {
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let subscription = manager.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        (states, subscription)
    }

    fn login_response() -> serde_json::Value {
        json!({
            "success": true,
            "message": "Login successful",
            "access_token": "T1",
            "refresh_token": "R1",
            "user": {"id": 1, "role": "freelancer"}
        })
    }

    #[tokio::test]
    async fn test_starts_unknown() {
        let manager = manager_over(&ScriptedTransport::new(), &MemoryStorage::new());

        assert_eq!(manager.state(), AuthState::Unknown);
        assert!(manager.state().is_unknown());
        assert_eq!(manager.state().user(), None);
    }

    #[tokio::test]
    async fn test_login_persists_session_and_authenticates() {
        let transport = ScriptedTransport::new();
        transport
            .respond(200, login_response())
            .respond(200, json!({"success": true, "profile": {}}));
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);

        let user = manager
            .login(&Credentials::new("a@b.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.role, Role::Freelancer);
        assert_eq!(manager.state(), AuthState::Authenticated(user.clone()));
        assert_eq!(manager.role(), Some(Role::Freelancer));

        let persisted = manager.client().store().read();
        assert_eq!(persisted.access_token.as_deref(), Some("T1"));
        assert_eq!(persisted.refresh_token.as_deref(), Some("R1"));
        assert_eq!(persisted.user, Some(user));

        let login_request = &transport.sent()[0];
        assert_eq!(login_request.url, "http://localhost:5000/api/auth/login");
        let body: serde_json::Value =
            serde_json::from_str(login_request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "a@b.com", "password": "secret123"}));

        // Later protected calls carry the new token
        manager
            .client()
            .send(ApiRequest::get("/freelancer/profile"))
            .await
            .unwrap();
        assert_eq!(
            transport.sent()[1].header("Authorization"),
            Some("Bearer T1")
        );
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_error_without_retry() {
        let transport = ScriptedTransport::new();
        transport.respond(401, json!({"success": false, "message": "Invalid email or password"}));
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);
        manager.check_auth().await;

        let result = manager
            .login(&Credentials::new("a@b.com", "wrong"))
            .await;

        assert_eq!(
            result,
            Err(ApiError::Unauthorized {
                message: "Invalid email or password".to_string()
            })
        );
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert_eq!(transport.sent().len(), 1);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_login_with_incomplete_response_fails() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!({"success": true, "access_token": "T1"}));
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);

        let result = manager.login(&Credentials::new("a@b.com", "secret123")).await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert!(!manager.is_authenticated());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_register_establishes_session() {
        let transport = ScriptedTransport::new();
        transport.respond(
            201,
            json!({
                "success": true,
                "message": "Registration successful",
                "access_token": "T5",
                "refresh_token": "R5",
                "user": {"id": 9, "username": "acme", "email": "hr@acme.io", "user_type": "recruiter"}
            }),
        );
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);
        let registration = Registration {
            username: "acme".to_string(),
            email: "hr@acme.io".to_string(),
            password: "Str0ng!pass".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Cole".to_string(),
            user_type: Role::Recruiter,
        };

        let user = manager.register(&registration).await.unwrap();

        assert_eq!(user.role, Role::Recruiter);
        assert_eq!(transport.sent()[0].url, "http://localhost:5000/api/auth/register");
        assert_eq!(manager.client().store().access_token().as_deref(), Some("T5"));
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_conflict_is_surfaced() {
        let transport = ScriptedTransport::new();
        transport.respond(409, json!({"success": false, "message": "Email already registered"}));
        let manager = manager_over(&transport, &MemoryStorage::new());
        let registration = Registration {
            username: "acme".to_string(),
            email: "hr@acme.io".to_string(),
            password: "Str0ng!pass".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Cole".to_string(),
            user_type: Role::Recruiter,
        };

        let err = manager.register(&registration).await.unwrap_err();

        assert_eq!(err.user_message(), "Email already registered");
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_check_auth_without_token_skips_backend() {
        let transport = ScriptedTransport::new();
        let manager = manager_over(&transport, &MemoryStorage::new());

        let state = manager.check_auth().await;

        assert_eq!(state, AuthState::Unauthenticated);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_login_then_reload_restores_same_user() {
        let backend = MemoryStorage::new();

        let first_transport = ScriptedTransport::new();
        first_transport.respond(200, login_response());
        let first = manager_over(&first_transport, &backend);
        let logged_in = first
            .login(&Credentials::new("a@b.com", "secret123"))
            .await
            .unwrap();

        // A fresh manager over the same storage, as after a page reload
        let second_transport = ScriptedTransport::new();
        second_transport.respond(
            200,
            json!({"success": true, "user": serde_json::to_value(&logged_in).unwrap()}),
        );
        let second = manager_over(&second_transport, &backend);

        let state = second.check_auth().await;

        assert_eq!(state, AuthState::Authenticated(logged_in));
        let me_request = &second_transport.sent()[0];
        assert_eq!(me_request.url, "http://localhost:5000/api/auth/me");
        assert_eq!(me_request.bearer_token(), Some("T1"));
    }

    #[tokio::test]
    async fn test_check_auth_refreshes_cached_user() {
        let backend = MemoryStorage::new();
        SessionStore::new(backend.clone()).write(&sample_session("T1", "R1", Role::Freelancer)).unwrap();
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            json!({"success": true, "user": {"id": 1, "username": "sam2", "user_type": "freelancer"}}),
        );
        let manager = manager_over(&transport, &backend);

        manager.check_auth().await;

        assert_eq!(
            manager.client().store().user().map(|u| u.username),
            Some("sam2".to_string())
        );
    }

    #[tokio::test]
    async fn test_check_auth_failure_clears_store() {
        let backend = MemoryStorage::new();
        SessionStore::new(backend.clone()).write(&sample_session("T1", "R1", Role::Freelancer)).unwrap();
        let transport = ScriptedTransport::new();
        transport.respond(401, json!({"message": "Token is invalid"}));
        let manager = manager_over(&transport, &backend);

        let state = manager.check_auth().await;

        assert_eq!(state, AuthState::Unauthenticated);
        assert!(backend.is_empty());
        // The startup check does not enter the refresh protocol
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_check_auth_network_failure_clears_store() {
        let backend = MemoryStorage::new();
        SessionStore::new(backend.clone()).write(&sample_session("T1", "R1", Role::Recruiter)).unwrap();
        let transport = ScriptedTransport::new();
        transport.fail("offline");
        let manager = manager_over(&transport, &backend);

        assert_eq!(manager.check_auth().await, AuthState::Unauthenticated);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_check_auth_runs_once() {
        let transport = ScriptedTransport::new();
        let manager = manager_over(&transport, &MemoryStorage::new());

        manager.check_auth().await;
        let again = manager.check_auth().await;

        assert_eq!(again, AuthState::Unauthenticated);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_login_during_startup_check_keeps_new_session() {
        let backend = MemoryStorage::new();
        SessionStore::new(backend.clone())
            .write(&sample_session("STALE", "R0", Role::Freelancer))
            .unwrap();
        let transport = ScriptedTransport::new();
        transport
            .respond(200, login_response())
            .respond(401, json!({"message": "Token has expired"}));
        let manager = manager_over(&transport, &backend);
        let credentials = Credentials::new("a@b.com", "secret123");

        let (login, checked) = futures::join!(manager.login(&credentials), manager.check_auth());

        let user = login.unwrap();
        assert_eq!(checked, AuthState::Authenticated(user.clone()));
        assert_eq!(manager.state(), AuthState::Authenticated(user));
        assert_eq!(manager.client().store().access_token().as_deref(), Some("T1"));
        assert_eq!(manager.client().store().refresh_token().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn test_logout_during_startup_check_stays_signed_out() {
        let backend = MemoryStorage::new();
        SessionStore::new(backend.clone())
            .write(&sample_session("T1", "R1", Role::Recruiter))
            .unwrap();
        let transport = ScriptedTransport::new();
        transport
            .respond(200, json!({"success": true, "user": {"id": 1, "user_type": "recruiter"}}))
            .respond(200, json!({"success": true}));
        let manager = manager_over(&transport, &backend);

        futures::join!(manager.check_auth(), manager.logout());

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_login_fails_when_session_cannot_be_saved() {
        let transport = ScriptedTransport::new();
        transport.respond(200, login_response());
        let client = ApiClient::new(
            transport.clone(),
            SessionStore::new(UnavailableStorage),
            ClientConfig::default(),
        );
        let manager = SessionManager::new(Rc::new(client));

        let result = manager.login(&Credentials::new("a@b.com", "secret123")).await;

        assert!(matches!(result, Err(ApiError::Storage(_))));
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_state_and_store() {
        let transport = ScriptedTransport::new();
        transport
            .respond(200, login_response())
            .respond(200, json!({"success": true}));
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);
        manager.login(&Credentials::new("a@b.com", "secret123")).await.unwrap();

        manager.logout().await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(backend.is_empty());
        let logout_request = &transport.sent()[1];
        assert_eq!(logout_request.url, "http://localhost:5000/api/auth/logout");
        assert_eq!(logout_request.bearer_token(), Some("T1"));
    }

    #[tokio::test]
    async fn test_logout_survives_network_failure() {
        let transport = ScriptedTransport::new();
        transport.respond(200, login_response()).fail("network down");
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);
        manager.login(&Credentials::new("a@b.com", "secret123")).await.unwrap();

        manager.logout().await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_logout_survives_server_error_without_refreshing() {
        let transport = ScriptedTransport::new();
        transport
            .respond(200, login_response())
            .respond(401, json!({"message": "Token has expired"}));
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);
        manager.login(&Credentials::new("a@b.com", "secret123")).await.unwrap();

        manager.logout().await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(backend.is_empty());
        assert!(!transport.sent().iter().any(|r| r.url.ends_with(REFRESH_PATH)));
    }

    #[tokio::test]
    async fn test_logout_without_session_skips_backend() {
        let transport = ScriptedTransport::new();
        let manager = manager_over(&transport, &MemoryStorage::new());

        manager.logout().await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_makes_manager_unauthenticated() {
        let transport = ScriptedTransport::new();
        transport
            .respond(200, login_response())
            .respond(401, json!({}))
            .respond(401, json!({"message": "Refresh token expired"}));
        let backend = MemoryStorage::new();
        let manager = manager_over(&transport, &backend);
        manager.login(&Credentials::new("a@b.com", "secret123")).await.unwrap();

        let result = manager
            .client()
            .send(ApiRequest::get("/freelancer/applications"))
            .await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_each_transition_once() {
        let transport = ScriptedTransport::new();
        transport
            .respond(200, login_response())
            .respond(200, json!({"success": true}));
        let manager = manager_over(&transport, &MemoryStorage::new());
        let (states, subscription) = record_states(&manager);

        manager.check_auth().await;
        manager.login(&Credentials::new("a@b.com", "secret123")).await.unwrap();
        manager.logout().await;
        manager.logout().await;

        let states = states.borrow();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], AuthState::Unauthenticated);
        assert!(states[1].is_authenticated());
        assert_eq!(states[2], AuthState::Unauthenticated);
        drop(subscription);
    }

    #[tokio::test]
    async fn test_dropped_subscription_stops_updates() {
        let manager = manager_over(&ScriptedTransport::new(), &MemoryStorage::new());
        let (states, subscription) = record_states(&manager);
        drop(subscription);

        manager.check_auth().await;

        assert!(states.borrow().is_empty());
    }
}
