// Client configuration: endpoint, timeout and user agent, fixed when a
// client is built.

use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.uploadfly.cloud";

/// Settings fixed when a client is built.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Request timeout applied by the HTTP transport
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("uploadfly-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Config pointing at another deployment of the API.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Join an endpoint path onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
