use std::time::Duration;

/// Default base URL of the notes API (the development server).
pub const DEFAULT_API_URL: &str = "http://localhost:5555";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Notes API client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every resource path is joined onto.
    pub base_url: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from the process environment, reading a `.env`
    /// file first when one exists.
    ///
    /// | Env Var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `NOTES_API_URL`              | `http://localhost:5555`  |
    /// | `NOTES_REQUEST_TIMEOUT_SECS` | `10`                     |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Malformed or empty values fall back to the defaults.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = get("NOTES_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout_secs = match get("NOTES_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_REQUEST_TIMEOUT_SECS,
                    "NOTES_REQUEST_TIMEOUT_SECS is not a valid u64, using default"
                );
                DEFAULT_REQUEST_TIMEOUT_SECS
            }),
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Self {
            base_url,
            request_timeout_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
