//! Pulse GitLab Client
//!
//! A simple, type-safe HTTP client for the GitLab REST read API (v4).
//!
//! The dashboard only reads from GitLab: project lookup by path, branch
//! listing, and project search for onboarding screens. Webhook ingestion does
//! not go through this client.
//!
//! # Example
//!
//! ```no_run
//! use pulse_gitlab::GitLabClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pulse_gitlab::ClientError> {
//!     let client = GitLabClient::new("https://gitlab.example.com", "glpat-secret");
//!
//!     let project = client.get_project("sg1/alpha").await?;
//!     println!("Found project: {}", project.name);
//!     Ok(())
//! }
//! ```

pub mod error;
mod branches;
mod projects;

// Re-export commonly used types
pub use branches::{Branch, BranchCommit};
pub use error::{ClientError, Result};
pub use projects::GitLabProject;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the GitLab REST API
///
/// Authenticates every request with the `PRIVATE-TOKEN` header. Methods are
/// organized into logical groups:
/// - Project lookup and search
/// - Branch listing
#[derive(Debug, Clone)]
pub struct GitLabClient {
    /// Base URL of the GitLab instance (e.g., "https://gitlab.example.com")
    base_url: String,
    /// Personal or project access token with read_api scope
    token: String,
    /// HTTP client instance
    client: Client,
}

impl GitLabClient {
    /// Create a new GitLab client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the GitLab instance
    /// * `token` - Access token sent as `PRIVATE-TOKEN`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a new GitLab client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the GitLab instance
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
