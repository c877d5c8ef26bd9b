use crate::error::GatewayError;

/// Environment variable naming the backend project base URL.
pub const ENV_PROJECT_URL: &str = "PLAYBOOK_PROJECT_URL";

/// Environment variable naming the static API credential.
pub const ENV_API_KEY: &str = "PLAYBOOK_API_KEY";

/// Path of the GraphQL endpoint under the project base URL.
const GRAPHQL_PATH: &str = "/graphql/v1";

/// Gateway configuration loaded from environment variables.
///
/// Both variables are required; the gateway cannot operate without them.
///
/// | Env Var               | Description                                |
/// |-----------------------|--------------------------------------------|
/// | `PLAYBOOK_PROJECT_URL`| Backend base URL, e.g. `https://x.example` |
/// | `PLAYBOOK_API_KEY`    | Static API key attached to every request   |
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Full GraphQL endpoint URL (base URL + `/graphql/v1`).
    pub graphql_url: String,
    /// Static credential sent in the `apikey` header.
    pub api_key: String,
}

impl GatewayConfig {
    /// Load configuration from the environment.
    ///
    /// Fails with [`GatewayError::Config`] when a required variable is
    /// missing or blank, which is a fatal startup condition for callers.
    pub fn from_env() -> Result<Self, GatewayError> {
        let base = require(ENV_PROJECT_URL)?;
        let api_key = require(ENV_API_KEY)?;
        Ok(Self {
            graphql_url: format!("{}{GRAPHQL_PATH}", base.trim_end_matches('/')),
            api_key,
        })
    }
}

fn require(name: &'static str) -> Result<String, GatewayError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(GatewayError::Config(name)),
    }
}
