pub mod auth;
pub mod common;
pub mod icon;
pub mod jobs;
pub mod navbar;
pub mod notifications;
pub mod pages;

pub use auth::{AuthContext, ProtectedRoute, PublicOnly, provide_auth_context, use_auth_context};
pub use icon::{Icon, icons};
pub use navbar::Navbar;
pub use notifications::{ToastContainer, ToastManager, provide_toasts, use_toasts};
