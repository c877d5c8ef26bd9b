use playbook_gateway::GatewayError;

/// Errors from the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The underlying gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// An expected record was absent from the response (non-existent or
    /// not owned by this device).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The response decoded, but not into the shape we expect.
    #[error("Malformed {entity} payload: {source}")]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl RepoError {
    /// Server-side message text, when the failure carries one.
    ///
    /// Used by the presentation layer to soften known wordings (e.g.
    /// unique-constraint violations) without parsing at lower layers.
    pub fn server_message(&self) -> String {
        match self {
            RepoError::Gateway(err) => err.server_message(),
            _ => String::new(),
        }
    }
}
