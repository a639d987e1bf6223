//! Request and response values passed between the client and its transport

use derive_more::Display;
use serde::Serialize;

use super::error::ApiError;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Method {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
}

/// A backend call described relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Option<String>,
    body: Option<String>,
    refresh_on_unauthorized: bool,
    report_failures: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            refresh_on_unauthorized: true,
            report_failures: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Attach URL query parameters. Fields that serialize to nothing are left out.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, ApiError> {
        let encoded =
            serde_urlencoded::to_string(params).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    /// Exclude this request from the refresh-and-retry protocol.
    ///
    /// Used for the auth endpoints themselves, where a 401 means bad credentials.
    pub fn no_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }

    /// Keep failures of this request out of the client's `RequestFailed` events.
    ///
    /// Background polling uses this so an unreachable backend does not flood the UI.
    pub fn silent(mut self) -> Self {
        self.report_failures = false;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn refreshes_on_unauthorized(&self) -> bool {
        self.refresh_on_unauthorized
    }

    /// Whether failures are announced as client events. Auth calls never are.
    pub fn reports_failures(&self) -> bool {
        self.report_failures && self.refresh_on_unauthorized
    }

    /// Absolute URL for this request
    pub fn url(&self, base_url: &str) -> String {
        let separator = if self.path.starts_with('/') { "" } else { "/" };
        match &self.query {
            Some(query) => format!("{}{}{}?{}", base_url, separator, self.path, query),
            None => format!("{}{}{}", base_url, separator, self.path),
        }
    }
}

/// A request travelling through the retry path.
///
/// `retried` is set once the request has been reissued after a token refresh;
/// a retried request is never refreshed again.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub request: ApiRequest,
    pub retried: bool,
}

impl PendingRequest {
    pub fn new(request: ApiRequest) -> Self {
        Self {
            request,
            retried: false,
        }
    }

    /// Whether a 401 for this request may trigger a refresh
    pub fn can_refresh(&self) -> bool {
        !self.retried && self.request.refreshes_on_unauthorized()
    }

    pub fn into_retry(self) -> Self {
        Self {
            request: self.request,
            retried: true,
        }
    }
}

/// Fully resolved request handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl OutgoingRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Token carried in the `Authorization: Bearer` header
    pub fn bearer_token(&self) -> Option<&str> {
        self.header("Authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
    }
}

/// Status and body as received from the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Filters {
        search: Option<String>,
        is_remote: Option<bool>,
    }

    #[test]
    fn test_url_without_query() {
        let request = ApiRequest::get("/auth/me");
        assert_eq!(
            request.url("http://localhost:5000/api"),
            "http://localhost:5000/api/auth/me"
        );
    }

    #[test]
    fn test_url_adds_missing_slash() {
        let request = ApiRequest::get("jobs/3");
        assert_eq!(request.url("http://api"), "http://api/jobs/3");
    }

    #[test]
    fn test_query_encoding_skips_none_fields() {
        let request = ApiRequest::get("/freelancer/jobs/search")
            .query(&Filters {
                search: Some("rust & wasm".to_string()),
                is_remote: None,
            })
            .unwrap();

        assert_eq!(
            request.url("http://api"),
            "http://api/freelancer/jobs/search?search=rust+%26+wasm"
        );
    }

    #[test]
    fn test_empty_query_adds_no_question_mark() {
        let request = ApiRequest::get("/notifications")
            .query(&Filters {
                search: None,
                is_remote: None,
            })
            .unwrap();

        assert_eq!(request.url("http://api"), "http://api/notifications");
    }

    #[test]
    fn test_json_body_is_encoded() {
        let request = ApiRequest::post("/auth/login")
            .json(&json!({"email": "a@b.com"}))
            .unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.body(), Some(r#"{"email":"a@b.com"}"#));
    }

    #[test]
    fn test_no_refresh_flag() {
        let request = ApiRequest::post("/auth/login");
        assert!(request.refreshes_on_unauthorized());
        assert!(!request.no_refresh().refreshes_on_unauthorized());
    }

    #[test]
    fn test_failure_reporting_flags() {
        assert!(ApiRequest::get("/jobs/1").reports_failures());
        assert!(!ApiRequest::get("/jobs/1").silent().reports_failures());
        assert!(!ApiRequest::post("/auth/login").no_refresh().reports_failures());
        assert!(ApiRequest::get("/jobs/1").silent().refreshes_on_unauthorized());
    }

    #[test]
    fn test_pending_request_refreshes_at_most_once() {
        let pending = PendingRequest::new(ApiRequest::get("/freelancer/profile"));
        assert!(pending.can_refresh());

        let retry = pending.into_retry();
        assert!(retry.retried);
        assert!(!retry.can_refresh());

        let auth_call = PendingRequest::new(ApiRequest::get("/auth/me").no_refresh());
        assert!(!auth_call.can_refresh());
    }

    #[test]
    fn test_outgoing_header_lookup_is_case_insensitive() {
        let outgoing = OutgoingRequest {
            method: Method::Get,
            url: "http://api/auth/me".to_string(),
            headers: vec![("authorization".to_string(), "Bearer T1".to_string())],
            body: None,
        };

        assert_eq!(outgoing.header("Authorization"), Some("Bearer T1"));
        assert_eq!(outgoing.bearer_token(), Some("T1"));
        assert_eq!(outgoing.header("Content-Type"), None);
    }

    #[test]
    fn test_response_status_classes() {
        assert!(RawResponse::new(201, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
        assert!(RawResponse::new(401, "").is_unauthorized());
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
