//! Client configuration.
//!
//! The host binary loads it with `ClientConfig::from_env()` after calling `dotenvy::dotenv()`.
//! The browser bundle has no process environment, so it reads the same variables at
//! compile time through `ClientConfig::from_build_env()`.

/// Base URL used when `GIGBOARD_API_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Unread notification polling interval used when `GIGBOARD_UNREAD_POLL_MS` is not set
pub const DEFAULT_UNREAD_POLL_INTERVAL_MS: u32 = 30_000;

const API_URL_VAR: &str = "GIGBOARD_API_URL";
const UNREAD_POLL_VAR: &str = "GIGBOARD_UNREAD_POLL_MS";

/// Settings shared by the HTTP client and the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend REST base URL without trailing slash
    /// Example: http://localhost:5000/api
    pub api_base_url: String,

    /// How often the navbar refreshes the unread notification badge
    pub unread_poll_interval_ms: u32,
}

impl ClientConfig {
    /// Build a config from optional raw values, falling back to defaults.
    pub fn from_values(api_url: Option<&str>, unread_poll_ms: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let unread_poll_interval_ms = unread_poll_ms
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_UNREAD_POLL_INTERVAL_MS);

        Self {
            api_base_url,
            unread_poll_interval_ms,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        let api_url = std::env::var(API_URL_VAR).ok();
        let unread_poll_ms = std::env::var(UNREAD_POLL_VAR).ok();
        Self::from_values(api_url.as_deref(), unread_poll_ms.as_deref())
    }

    /// Load configuration baked in at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("GIGBOARD_API_URL"), option_env!("GIGBOARD_UNREAD_POLL_MS"))
    }

    /// Check if a non-default API URL is configured
    pub fn has_custom_api_url(&self) -> bool {
        self.api_base_url != DEFAULT_API_BASE_URL
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
