//! Session state: persisted tokens, the cached user, and the auth lifecycle

mod manager;
mod model;
mod store;

pub use manager::{AuthState, LOGIN_PATH, LOGOUT_PATH, ME_PATH, REGISTER_PATH, SessionManager};
pub use model::{Credentials, Registration, Role, Session, User};
#[cfg(feature = "hydrate")]
pub use store::BrowserStorage;
pub use store::{
    ACCESS_TOKEN_KEY, MemoryStorage, PersistedSession, REFRESH_TOKEN_KEY, SessionStore,
    StorageBackend, StorageError, USER_KEY,
};
