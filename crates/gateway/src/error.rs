use serde::Deserialize;

/// One entry of a GraphQL `errors` array.
///
/// Only the message is interpreted; the full list is kept so callers can
/// surface server wording (e.g. unique-constraint violations) to users.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Errors from the remote data gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A required environment variable is not set.
    #[error("{0} is not set")]
    Config(&'static str),

    /// The owner token could not be resolved or persisted.
    #[error("Owner token unavailable: {0}")]
    Identity(String),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("GraphQL HTTP {status}: {body}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// A well-formed response carrying a server-reported error list.
    #[error("GraphQL error: {}", join_messages(errors))]
    Application { errors: Vec<GraphQlError> },

    /// The response body was not the JSON shape we expect.
    #[error("Malformed GraphQL response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Concatenated server error messages, or the transport body, for
    /// matching against known server wordings. Empty for other variants.
    pub fn server_message(&self) -> String {
        match self {
            GatewayError::Application { errors } => join_messages(errors),
            GatewayError::Transport { body, .. } => body.clone(),
            _ => String::new(),
        }
    }
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
