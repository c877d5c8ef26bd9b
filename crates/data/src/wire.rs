//! Envelope types for the backend's collection-style GraphQL schema.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RepoError;

/// Query result wrapper: `{ edges: [{ node: T }] }`.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Collection<T> {
    /// Unwrap the edge/node nesting into a plain vector.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

/// Mutation result wrapper: `{ records: [T] }`.
#[derive(Debug, Deserialize)]
pub struct MutationRecords<T> {
    pub records: Vec<T>,
}

/// Delete result wrapper: `{ affectedCount: n }`.
#[derive(Debug, Deserialize)]
pub struct DeleteResult {
    #[serde(rename = "affectedCount")]
    pub affected_count: i64,
}

/// Pull one named field out of a `data` object and deserialize it.
pub fn decode_field<T: DeserializeOwned>(
    mut data: Value,
    field: &str,
    entity: &'static str,
) -> Result<T, RepoError> {
    let value = data.get_mut(field).map(Value::take).unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|source| RepoError::Decode { entity, source })
}
