//! Auth context for the component tree
//!
//! Wraps the [`SessionManager`] in reactive signals:
//! - `state` mirrors the manager's auth state
//! - `loading` and `error` track the last login / register attempt
//! - Client events (session expiry, failed requests) become toasts
//!
//! The manager and its listeners are not `Send`, so they live in local stored values
//! that are released when the providing owner is cleaned up.

use std::rc::Rc;

use leptos::prelude::*;

use crate::core::config::ClientConfig;
use crate::core::http::{ApiClient, ApiError, ClientEvent, GlooTransport, SESSION_EXPIRED_MESSAGE};
use crate::core::session::{AuthState, Credentials, Registration, Role, SessionManager, SessionStore, User};
use crate::core::subscription::Subscription;
use crate::ui::notifications::ToastManager;

/// Session manager type used by the app
pub type AppSession = SessionManager<GlooTransport>;

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current authentication state
    pub state: RwSignal<AuthState>,
    /// Login / register request in flight
    pub loading: RwSignal<bool>,
    /// Error message from the last login / register attempt
    pub error: RwSignal<Option<String>>,
    /// Where to go after the session expired; consumed inside the router
    pub pending_redirect: RwSignal<Option<String>>,
    manager: StoredValue<AppSession, LocalStorage>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|state| state.user().cloned())
    }

    pub fn role(&self) -> Option<Role> {
        self.state.with(AuthState::role)
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// The shared session manager
    pub fn session(&self) -> AppSession {
        self.manager.get_value()
    }

    /// Shared API client for typed services
    pub fn client(&self) -> Rc<ApiClient<GlooTransport>> {
        self.manager.with_value(|manager| Rc::clone(manager.client()))
    }

    pub async fn login(&self, credentials: Credentials) -> Result<User, ApiError> {
        let manager = self.session();
        self.track(async move { manager.login(&credentials).await })
            .await
    }

    pub async fn register(&self, registration: Registration) -> Result<User, ApiError> {
        let manager = self.session();
        self.track(async move { manager.register(&registration).await })
            .await
    }

    /// Never fails; local session is always cleared
    pub async fn logout(&self) {
        self.session().logout().await;
    }

    async fn track(
        &self,
        attempt: impl std::future::Future<Output = Result<User, ApiError>>,
    ) -> Result<User, ApiError> {
        self.loading.set(true);
        self.error.set(None);

        let result = attempt.await;

        self.loading.set(false);
        if let Err(err) = &result {
            self.error.set(Some(err.user_message()));
        }
        result
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context(toasts: ToastManager) -> AuthContext {
    let config = ClientConfig::from_build_env();
    leptos::logging::log!("Creating session manager for {}", config.api_base_url);

    let client = ApiClient::new(GlooTransport, SessionStore::for_current_target(), config);
    let manager = SessionManager::new(Rc::new(client));

    // Unknown on both server and client so hydration matches; the guard shows a loader
    let state = RwSignal::new(AuthState::Unknown);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let pending_redirect = RwSignal::new(None::<String>);

    let subscriptions: Vec<Subscription> = vec![
        manager.subscribe(move |next| state.set(next.clone())),
        manager.client().subscribe(move |event| match event {
            ClientEvent::SessionExpired { redirect_to } => {
                toasts.warning("Session expired", SESSION_EXPIRED_MESSAGE);
                pending_redirect.set(Some(redirect_to.clone()));
            }
            ClientEvent::RequestFailed { message, .. } => {
                toasts.error("Request failed", message.clone());
            }
            ClientEvent::TokenRefreshed => {
                leptos::logging::log!("Access token refreshed");
            }
        }),
    ];
    let subscriptions = StoredValue::new_local(subscriptions);
    on_cleanup(move || {
        subscriptions.try_update_value(|subs| subs.clear());
    });

    let ctx = AuthContext {
        state,
        loading,
        error,
        pending_redirect,
        manager: StoredValue::new_local(manager),
    };

    // Validate the stored session once, after hydration (client-side only)
    #[cfg(feature = "hydrate")]
    {
        use leptos::task::spawn_local;

        Effect::new(move |_| {
            let manager = ctx.session();
            spawn_local(async move {
                manager.check_auth().await;
            });
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
