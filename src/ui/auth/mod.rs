//! Authentication UI module
//!
//! Auth context, route guards and the sign-in / sign-up components.

mod context;
mod guard;
mod login_form;
mod register_form;
mod user_menu;

pub use context::{AppSession, AuthContext, provide_auth_context, use_auth_context};
pub use guard::{ProtectedRoute, PublicOnly, SessionRedirect};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use user_menu::{UserAvatar, UserMenu};
