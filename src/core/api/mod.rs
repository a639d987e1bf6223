//! Typed backend services
//!
//! Thin wrappers that borrow the shared [`ApiClient`](crate::core::http::ApiClient), so
//! every call goes through the same token handling and error reporting.

mod freelancer;
mod notifications;
mod recruiter;

pub use freelancer::FreelancerApi;
pub use notifications::NotificationApi;
pub use recruiter::RecruiterApi;

use serde::Deserialize;

/// `{"message": ...}` acknowledgement returned by write endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}
