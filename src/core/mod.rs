//! Core session logic and backend access, independent of the UI

pub mod api;
pub mod config;
pub mod guard;
pub mod http;
pub mod models;
pub mod routes;
pub mod session;
pub mod subscription;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use guard::{GuardDecision, PublicDecision, decide, decide_public_only};
pub use routes::AppRoute;
pub use session::{AuthState, Role, SessionManager, User};
