//! Authenticated API client
//!
//! Single point of egress for backend calls:
//! - Attaches the stored access token as a bearer credential
//! - On a 401, refreshes the access token once and reissues the request once
//! - On refresh failure, clears the stored session and announces the expiry
//! - Turns error responses into [`ApiError`]s carrying the server's message

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{ApiError, decode_envelope};
use super::request::{ApiRequest, OutgoingRequest, PendingRequest, RawResponse};
use super::transport::Transport;
use crate::core::config::ClientConfig;
use crate::core::routes::AppRoute;
use crate::core::session::SessionStore;
use crate::core::subscription::{Listeners, Subscription};

pub const REFRESH_PATH: &str = "/auth/refresh";

/// Things the UI reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A new access token was stored
    TokenRefreshed,
    /// Refresh failed; the stored session is gone
    SessionExpired { redirect_to: String },
    /// A resource call failed; `message` is ready for display
    RequestFailed { status: Option<u16>, message: String },
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: Option<String>,
}

/// API client generic over its transport
pub struct ApiClient<T> {
    transport: T,
    store: SessionStore,
    config: ClientConfig,
    events: Listeners<ClientEvent>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, store: SessionStore, config: ClientConfig) -> Self {
        Self {
            transport,
            store,
            config,
            events: Listeners::new(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Listen for client events until the returned guard is dropped
    pub fn subscribe(&self, callback: impl Fn(&ClientEvent) + 'static) -> Subscription {
        self.events.subscribe(callback)
    }

    /// Send a request and return the raw 2xx response
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let report = request.reports_failures();
        let result = self.dispatch(PendingRequest::new(request)).await;
        if report {
            self.report_failure(&result);
        }
        result
    }

    /// Send a request and decode its `{success, ...}` envelope
    pub async fn request_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let report = request.reports_failures();
        let result = match self.dispatch(PendingRequest::new(request)).await {
            Ok(response) => decode_envelope(&response.body),
            Err(err) => Err(err),
        };
        if report {
            self.report_failure(&result);
        }
        result
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request_json(ApiRequest::get(path)).await
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request_json(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request_json(ApiRequest::put(path).json(body)?).await
    }

    async fn dispatch(&self, pending: PendingRequest) -> Result<RawResponse, ApiError> {
        let response = self
            .transmit(&pending.request, self.store.access_token().as_deref())
            .await?;

        if !response.is_unauthorized() || !pending.can_refresh() {
            return Self::check_status(response);
        }

        let pending = pending.into_retry();
        tracing::debug!(path = pending.request.path(), "access token rejected, refreshing");

        match self.refresh_access_token().await {
            Ok(token) => {
                let response = self.transmit(&pending.request, Some(&token)).await?;
                Self::check_status(response)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, ending session");
                self.expire_session();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// Mint a new access token from the stored refresh token and store it
    pub async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let refresh_token = self
            .store
            .refresh_token()
            .ok_or_else(|| ApiError::Rejected("No refresh token available".to_string()))?;

        let request = ApiRequest::post(REFRESH_PATH).no_refresh();
        let response = self.transmit(&request, Some(&refresh_token)).await?;
        let response = Self::check_status(response)?;
        let body: RefreshResponse = decode_envelope(&response.body)?;

        let token = body
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Decode("refresh response has no access_token".to_string()))?;

        self.store.replace_access_token(&token);
        self.events.emit(&ClientEvent::TokenRefreshed);
        tracing::debug!("access token refreshed");

        Ok(token)
    }

    async fn transmit(&self, request: &ApiRequest, token: Option<&str>) -> Result<RawResponse, ApiError> {
        let outgoing = self.outgoing(request, token);
        tracing::debug!(method = %outgoing.method, url = %outgoing.url, "dispatching request");
        Ok(self.transport.send(outgoing).await?)
    }

    fn outgoing(&self, request: &ApiRequest, token: Option<&str>) -> OutgoingRequest {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        OutgoingRequest {
            method: request.method(),
            url: request.url(&self.config.api_base_url),
            headers,
            body: request.body().map(str::to_string),
        }
    }

    fn check_status(response: RawResponse) -> Result<RawResponse, ApiError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(response.status, &response.body))
        }
    }

    fn expire_session(&self) {
        self.store.clear();
        self.events.emit(&ClientEvent::SessionExpired {
            redirect_to: AppRoute::Login.path().to_string(),
        });
    }

    fn report_failure<R>(&self, result: &Result<R, ApiError>) {
        if let Err(err) = result {
            if *err != ApiError::SessionExpired {
                self.events.emit(&ClientEvent::RequestFailed {
                    status: err.status(),
                    message: err.user_message(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::error::GENERIC_ERROR_MESSAGE;
    use crate::core::http::request::Method;
    use crate::core::session::{MemoryStorage, Role};
    use crate::core::testing::{ScriptedTransport, record_events, sample_session};
    use serde_json::json;

    fn client_with_session(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
        let store = SessionStore::new(MemoryStorage::new());
        store.write(&sample_session("T1", "R1", Role::Freelancer)).unwrap();
        ApiClient::new(transport.clone(), store, ClientConfig::default())
    }

    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!({"success": true, "profile": {}}));
        let client = client_with_session(&transport);

        client.send(ApiRequest::get("/freelancer/profile")).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].url, "http://localhost:5000/api/freelancer/profile");
        assert_eq!(sent[0].header("Authorization"), Some("Bearer T1"));
        assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!({"success": true}));
        let client = ApiClient::new(
            transport.clone(),
            SessionStore::new(MemoryStorage::new()),
            ClientConfig::default(),
        );

        client.send(ApiRequest::get("/jobs/1")).await.unwrap();

        assert_eq!(transport.sent()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_single_401_refreshes_and_retries_once() {
        let transport = ScriptedTransport::new();
        transport
            .respond(401, json!({"message": "Token has expired"}))
            .respond(200, json!({"success": true, "access_token": "T2"}))
            .respond(200, json!({"success": true, "unread_count": 2}));
        let client = client_with_session(&transport);
        let events = record_events(&client);

        let response = client
            .send(ApiRequest::get("/notifications/unread/count"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].bearer_token(), Some("T1"));
        assert_eq!(sent[1].url, "http://localhost:5000/api/auth/refresh");
        assert_eq!(sent[1].method, Method::Post);
        assert_eq!(sent[1].bearer_token(), Some("R1"));
        assert_eq!(sent[2].url, sent[0].url);
        assert_eq!(sent[2].bearer_token(), Some("T2"));
        assert_eq!(client.store().access_token().as_deref(), Some("T2"));
        assert_eq!(client.store().refresh_token().as_deref(), Some("R1"));
        assert_eq!(events.borrow().as_slice(), &[ClientEvent::TokenRefreshed]);
    }

    #[tokio::test]
    async fn test_retry_returns_result_to_original_caller() {
        let transport = ScriptedTransport::new();
        transport
            .respond(401, json!({}))
            .respond(200, json!({"success": true, "access_token": "T2"}))
            .respond(200, json!({"success": true, "unread_count": 5}));
        let client = client_with_session(&transport);

        #[derive(Deserialize)]
        struct Count {
            unread_count: u32,
        }
        let count: Count = client.get_json("/notifications/unread/count").await.unwrap();

        assert_eq!(count.unread_count, 5);
    }

    #[tokio::test]
    async fn test_second_401_is_not_refreshed_again() {
        let transport = ScriptedTransport::new();
        transport
            .respond(401, json!({}))
            .respond(200, json!({"success": true, "access_token": "T2"}))
            .respond(401, json!({"message": "Still not allowed"}));
        let client = client_with_session(&transport);

        let result = client.send(ApiRequest::get("/recruiter/jobs")).await;

        assert_eq!(
            result,
            Err(ApiError::Unauthorized {
                message: "Still not allowed".to_string()
            })
        );
        assert_eq!(transport.sent().len(), 3);
        assert_eq!(transport.remaining(), 0);
        // The session itself survives: only a failed refresh ends it
        assert_eq!(client.store().access_token().as_deref(), Some("T2"));
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_session_and_fails_caller() {
        let transport = ScriptedTransport::new();
        transport
            .respond(401, json!({}))
            .respond(401, json!({"message": "Refresh token expired"}));
        let client = client_with_session(&transport);
        let events = record_events(&client);

        let result = client.send(ApiRequest::get("/freelancer/applications")).await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert!(client.store().read().is_empty());
        assert_eq!(transport.sent().len(), 2);
        assert_eq!(
            events.borrow().as_slice(),
            &[ClientEvent::SessionExpired {
                redirect_to: "/login".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_refresh_rejected_envelope_counts_as_failure() {
        let transport = ScriptedTransport::new();
        transport
            .respond(401, json!({}))
            .respond(200, json!({"success": false, "message": "Invalid refresh token"}));
        let client = client_with_session(&transport);

        let result = client.send(ApiRequest::get("/freelancer/profile")).await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert!(client.store().read().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_network_failure_counts_as_failure() {
        let transport = ScriptedTransport::new();
        transport.respond(401, json!({})).fail("connection reset");
        let client = client_with_session(&transport);

        let result = client.send(ApiRequest::get("/freelancer/profile")).await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        assert_eq!(client.store().access_token(), None);
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_expires_session() {
        let transport = ScriptedTransport::new();
        transport.respond(401, json!({}));
        let client = ApiClient::new(
            transport.clone(),
            SessionStore::new(MemoryStorage::new()),
            ClientConfig::default(),
        );

        let result = client.send(ApiRequest::get("/recruiter/dashboard")).await;

        assert_eq!(result, Err(ApiError::SessionExpired));
        // Only the original request went out
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_no_refresh_request_surfaces_401() {
        let transport = ScriptedTransport::new();
        transport.respond(401, json!({"success": false, "message": "Invalid email or password"}));
        let client = client_with_session(&transport);
        let events = record_events(&client);

        let result = client
            .send(ApiRequest::post("/auth/login").no_refresh())
            .await;

        assert_eq!(
            result,
            Err(ApiError::Unauthorized {
                message: "Invalid email or password".to_string()
            })
        );
        assert_eq!(transport.sent().len(), 1);
        assert!(events.borrow().is_empty());
        assert_eq!(client.store().access_token().as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_error_message_is_extracted_and_reported() {
        let transport = ScriptedTransport::new();
        transport.respond(400, json!({"success": false, "message": "Cover letter is required"}));
        let client = client_with_session(&transport);
        let events = record_events(&client);

        let result = client
            .send(ApiRequest::post("/freelancer/jobs/4/apply"))
            .await;

        assert_eq!(
            result,
            Err(ApiError::Server {
                status: 400,
                message: "Cover letter is required".to_string()
            })
        );
        assert_eq!(
            events.borrow().as_slice(),
            &[ClientEvent::RequestFailed {
                status: Some(400),
                message: "Cover letter is required".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_error_without_message_uses_generic_text() {
        let transport = ScriptedTransport::new();
        transport.respond_raw(500, "Internal Server Error");
        let client = client_with_session(&transport);

        let err = client.send(ApiRequest::get("/jobs/1")).await.unwrap_err();

        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_network_failure_is_not_retried() {
        let transport = ScriptedTransport::new();
        transport.fail("dns lookup failed");
        let client = client_with_session(&transport);
        let events = record_events(&client);

        let err = client.send(ApiRequest::get("/jobs/1")).await.unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(
            events.borrow().as_slice(),
            &[ClientEvent::RequestFailed {
                status: None,
                message: GENERIC_ERROR_MESSAGE.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_rejected_envelope_is_reported() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!({"success": false, "message": "Profile not found"}));
        let client = client_with_session(&transport);
        let events = record_events(&client);

        let result: Result<serde_json::Value, _> = client.get_json("/freelancer/profile").await;

        assert_eq!(result, Err(ApiError::Rejected("Profile not found".to_string())));
        assert_eq!(events.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_silent_request_still_refreshes_but_is_not_reported() {
        let transport = ScriptedTransport::new();
        transport
            .respond(401, json!({}))
            .respond(200, json!({"success": true, "access_token": "T2"}))
            .respond(503, json!({"message": "Service unavailable"}));
        let client = client_with_session(&transport);
        let events = record_events(&client);

        let err = client
            .send(ApiRequest::get("/notifications/unread/count").silent())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(events.borrow().as_slice(), &[ClientEvent::TokenRefreshed]);
    }

    #[tokio::test]
    async fn test_concurrent_401s_each_refresh_independently() {
        let transport = ScriptedTransport::new();
        transport
            .respond(401, json!({}))
            .respond(401, json!({}))
            .respond(200, json!({"success": true, "access_token": "T2"}))
            .respond(200, json!({"success": true, "access_token": "T3"}))
            .respond(200, json!({"success": true, "jobs": []}))
            .respond(200, json!({"success": true, "applications": []}));
        let client = client_with_session(&transport);

        let (jobs, applications) = futures::join!(
            client.send(ApiRequest::get("/recruiter/jobs")),
            client.send(ApiRequest::get("/freelancer/applications")),
        );

        assert!(jobs.is_ok());
        assert!(applications.is_ok());
        let refreshes = transport
            .sent()
            .iter()
            .filter(|request| request.url.ends_with(REFRESH_PATH))
            .count();
        assert_eq!(refreshes, 2);
        // Last write wins
        assert_eq!(client.store().access_token().as_deref(), Some("T3"));
    }
}
