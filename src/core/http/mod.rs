//! HTTP client wrapper: token attachment, refresh-on-401, error extraction

mod client;
mod error;
mod request;
mod transport;

pub use client::{ApiClient, ClientEvent, REFRESH_PATH};
pub use error::{
    ApiError, GENERIC_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE, decode_envelope, extract_message,
};
pub use request::{ApiRequest, Method, OutgoingRequest, PendingRequest, RawResponse};
pub use transport::{GlooTransport, Transport, TransportError};
