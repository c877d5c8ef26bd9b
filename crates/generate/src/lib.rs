//! Client for the external step-generation service.
//!
//! The service turns a natural-language goal into an ordered list of
//! step drafts for a just-created play. It is a collaborator, not part
//! of this system: a failed generation call must never roll back the
//! play it was meant to populate.

use serde::{Deserialize, Serialize};

/// Environment variable naming the generation service base URL.
pub const ENV_GENERATE_URL: &str = "PLAYBOOK_GENERATE_URL";

/// Request body for the `/generate` endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    play_id: &'a str,
    goal: &'a str,
    roles: &'a [String],
}

/// Response body of the `/generate` endpoint.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    steps: Vec<GeneratedStep>,
}

/// One generated step draft.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedStep {
    pub step_name: String,
    #[serde(default)]
    pub step_description: Option<String>,
    pub step_num: i32,
    #[serde(default)]
    pub step_role_name: Option<String>,
}

/// Errors from the generation service client.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The service base URL is not configured.
    #[error("{0} is not set")]
    Config(&'static str),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Generation service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },
}

/// HTTP client for the generation service.
#[derive(Debug, Clone)]
pub struct GeneratorClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeneratorClient {
    /// Create a client targeting the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the base URL from `PLAYBOOK_GENERATE_URL`.
    ///
    /// Only required when generation is actually requested; missing
    /// configuration fails the one operation, not startup.
    pub fn from_env() -> Result<Self, GeneratorError> {
        match std::env::var(ENV_GENERATE_URL) {
            Ok(url) if !url.trim().is_empty() => Ok(Self::new(url.trim())),
            _ => Err(GeneratorError::Config(ENV_GENERATE_URL)),
        }
    }

    /// Ask the service to draft steps for a play from a goal statement.
    ///
    /// `roles` are the device's role names, offered to the service so it
    /// can assign them to drafted steps.
    pub async fn generate(
        &self,
        play_id: &str,
        goal: &str,
        roles: &[String],
    ) -> Result<Vec<GeneratedStep>, GeneratorError> {
        let body = GenerateRequest {
            play_id,
            goal,
            roles,
        };

        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        tracing::debug!(play_id, steps = parsed.steps.len(), "Generated step drafts");
        Ok(parsed.steps)
    }
}
