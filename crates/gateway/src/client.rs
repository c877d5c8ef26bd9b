//! GraphQL gateway: one POST per operation, no retry, no caching.
//!
//! [`Gateway`] holds the endpoint configuration, the static API key, and
//! the resolved owner token. Every call attaches both credentials and
//! distinguishes transport failures from application-level error lists;
//! callers that surface user-facing messages need the latter intact.

use serde_json::{json, Value};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GraphQlError};

/// Request header carrying the per-device owner token.
pub const OWNER_TOKEN_HEADER: &str = "x-client-id";

/// Request header carrying the static API credential.
pub const API_KEY_HEADER: &str = "apikey";

/// Introspection query used as a connectivity check.
const PING_QUERY: &str = "query { __schema { queryType { name } } }";

/// HTTP client for the backend GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    graphql_url: String,
    api_key: String,
    owner_token: String,
}

impl Gateway {
    /// Create a gateway from configuration and a resolved owner token.
    pub fn new(config: GatewayConfig, owner_token: String) -> Self {
        Self::with_client(reqwest::Client::new(), config, owner_token)
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: GatewayConfig,
        owner_token: String,
    ) -> Self {
        Self {
            client,
            graphql_url: config.graphql_url,
            api_key: config.api_key,
            owner_token,
        }
    }

    /// The owner token this gateway scopes every call with.
    ///
    /// Repositories also pass it as an explicit query variable, so reads
    /// filter on it and writes stamp it.
    pub fn owner_token(&self) -> &str {
        &self.owner_token
    }

    /// Execute a named query/mutation with the given variables.
    ///
    /// Returns the response `data` object. A non-2xx response fails with
    /// [`GatewayError::Transport`]; a 2xx response carrying an `errors`
    /// array fails with [`GatewayError::Application`] even though the
    /// transport succeeded.
    pub async fn execute(&self, operation: &str, variables: Value) -> Result<Value, GatewayError> {
        let body = json!({
            "query": operation,
            "variables": variables,
        });

        let response = self
            .client
            .post(&self.graphql_url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(OWNER_TOKEN_HEADER, &self.owner_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Transport {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| GatewayError::Decode(format!("response is not JSON: {e}")))?;

        interpret_payload(payload)
    }

    /// Connectivity check: run a trivial introspection query and return
    /// the schema's query type name.
    pub async fn ping(&self) -> Result<String, GatewayError> {
        let data = self.execute(PING_QUERY, json!({})).await?;
        data.pointer("/__schema/queryType/name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GatewayError::Decode("introspection response missing query type".to_string()))
    }
}

/// Split a 2xx GraphQL payload into data vs application errors.
///
/// The presence of an `errors` key wins over any partial `data`, matching
/// the backend's all-or-nothing usage of the protocol.
fn interpret_payload(mut payload: Value) -> Result<Value, GatewayError> {
    if let Some(raw_errors) = payload.get_mut("errors").filter(|v| !v.is_null()) {
        let errors: Vec<GraphQlError> =
            serde_json::from_value(raw_errors.take()).unwrap_or_default();
        tracing::warn!(count = errors.len(), "GraphQL operation returned errors");
        return Err(GatewayError::Application { errors });
    }

    match payload.get_mut("data") {
        Some(data) if !data.is_null() => Ok(data.take()),
        _ => Err(GatewayError::Decode(
            "response carries neither data nor errors".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn payload_with_data_yields_data() {
        let payload = json!({"data": {"playsCollection": {"edges": []}}});
        let data = interpret_payload(payload).expect("data");
        assert!(data.get("playsCollection").is_some());
    }

    #[test]
    fn payload_with_errors_fails_with_application_error() {
        let payload = json!({
            "data": null,
            "errors": [{"message": "permission denied"}],
        });
        let err = interpret_payload(payload).expect_err("must fail");
        assert_matches!(err, GatewayError::Application { ref errors } if errors.len() == 1);
        assert_eq!(err.server_message(), "permission denied");
    }

    #[test]
    fn errors_win_over_partial_data() {
        let payload = json!({
            "data": {"rolesCollection": {"edges": []}},
            "errors": [{"message": "partial failure"}],
        });
        assert_matches!(
            interpret_payload(payload),
            Err(GatewayError::Application { .. })
        );
    }

    #[test]
    fn empty_payload_is_a_decode_error() {
        assert_matches!(interpret_payload(json!({})), Err(GatewayError::Decode(_)));
    }

    #[test]
    fn null_errors_key_is_not_a_failure() {
        let payload = json!({"data": {"ok": true}, "errors": null});
        assert!(interpret_payload(payload).is_ok());
    }

    #[test]
    fn malformed_error_entries_still_fail_the_call() {
        let payload = json!({"errors": "not-a-list"});
        assert_matches!(
            interpret_payload(payload),
            Err(GatewayError::Application { errors }) if errors.is_empty()
        );
    }
}
