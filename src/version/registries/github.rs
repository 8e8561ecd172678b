//! GitHub Releases API registry implementation

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::FETCH_TIMEOUT_SECS;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;

/// Registry implementation for the GitHub Releases API
pub struct GitHubRegistry {
    client: Client,
    url: String,
    token: Option<String>,
}

impl GitHubRegistry {
    /// Creates a registry fetching releases from `url`.
    ///
    /// `token` is sent as a bearer token, but only to github.com hosts.
    pub fn new(url: &str, token: Option<String>) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(concat!("bazel-version/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|_| self.url.contains("github.com"))
    }
}

impl Registry for GitHubRegistry {
    fn fetch_releases(&self) -> Result<String, RegistryError> {
        debug!("Fetching releases from {}", self.url);

        let mut request = self
            .client
            .get(&self.url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(self.url.clone()));
        }

        let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
            || (status == StatusCode::FORBIDDEN
                && response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .is_some_and(|v| v.as_bytes() == b"0"));
        if rate_limited {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, self.url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        Ok(response.text()?)
    }
}
