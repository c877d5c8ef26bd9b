//! Repository for plays.

use serde_json::json;

use playbook_core::model::Play;
use playbook_gateway::Gateway;

use crate::error::RepoError;
use crate::wire::{decode_field, Collection, DeleteResult, MutationRecords};

const LIST_PLAYS: &str = "
    query GetPlays($client_id: String!) {
      playsCollection(
        filter: { client_id: { eq: $client_id } }
        orderBy: [{ play_name: AscNullsLast }]
      ) {
        edges {
          node {
            play_id
            play_name
            client_id
          }
        }
      }
    }
";

const FIND_PLAY: &str = "
    query GetPlay($play_id: UUID!, $client_id: String!) {
      playsCollection(
        filter: {
          play_id: { eq: $play_id }
          client_id: { eq: $client_id }
        }
        first: 1
      ) {
        edges {
          node {
            play_id
            play_name
            client_id
          }
        }
      }
    }
";

const CREATE_PLAY: &str = "
    mutation CreatePlay($play_name: String!, $client_id: String!) {
      insertIntoplaysCollection(
        objects: [
          {
            play_name: $play_name
            client_id: $client_id
          }
        ]
      ) {
        records {
          play_id
          play_name
          client_id
        }
      }
    }
";

const RENAME_PLAY: &str = "
    mutation UpdatePlay($play_id: UUID!, $play_name: String!, $client_id: String!) {
      updateplaysCollection(
        filter: {
          play_id: { eq: $play_id }
          client_id: { eq: $client_id }
        }
        set: {
          play_name: $play_name
        }
      ) {
        records {
          play_id
          play_name
          client_id
        }
      }
    }
";

const DELETE_PLAY: &str = "
    mutation DeletePlay($play_id: UUID!, $client_id: String!) {
      deleteFromplaysCollection(
        filter: {
          play_id: { eq: $play_id }
          client_id: { eq: $client_id }
        }
      ) {
        affectedCount
      }
    }
";

/// Provides CRUD operations for plays, scoped by owner token.
pub struct PlayRepo;

impl PlayRepo {
    /// List this device's plays, ordered by name ascending.
    pub async fn list(gateway: &Gateway) -> Result<Vec<Play>, RepoError> {
        let data = gateway
            .execute(LIST_PLAYS, json!({ "client_id": gateway.owner_token() }))
            .await?;
        let collection: Collection<Play> = decode_field(data, "playsCollection", "play")?;
        Ok(collection.into_nodes())
    }

    /// Find a play by id. Returns `None` when it does not exist or is
    /// not owned by this device.
    pub async fn find(gateway: &Gateway, play_id: &str) -> Result<Option<Play>, RepoError> {
        let data = gateway
            .execute(
                FIND_PLAY,
                json!({ "play_id": play_id, "client_id": gateway.owner_token() }),
            )
            .await?;
        let collection: Collection<Play> = decode_field(data, "playsCollection", "play")?;
        Ok(collection.into_nodes().into_iter().next())
    }

    /// Insert a new play, returning the created row.
    pub async fn create(gateway: &Gateway, play_name: &str) -> Result<Play, RepoError> {
        let data = gateway
            .execute(
                CREATE_PLAY,
                json!({ "play_name": play_name, "client_id": gateway.owner_token() }),
            )
            .await?;
        let result: MutationRecords<Play> =
            decode_field(data, "insertIntoplaysCollection", "play")?;
        result
            .records
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound {
                entity: "play",
                id: play_name.to_string(),
            })
    }

    /// Rename an existing play owned by this device.
    pub async fn rename(
        gateway: &Gateway,
        play_id: &str,
        play_name: &str,
    ) -> Result<Play, RepoError> {
        let data = gateway
            .execute(
                RENAME_PLAY,
                json!({
                    "play_id": play_id,
                    "play_name": play_name,
                    "client_id": gateway.owner_token(),
                }),
            )
            .await?;
        let result: MutationRecords<Play> = decode_field(data, "updateplaysCollection", "play")?;
        result
            .records
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound {
                entity: "play",
                id: play_id.to_string(),
            })
    }

    /// Delete a play owned by this device.
    pub async fn delete(gateway: &Gateway, play_id: &str) -> Result<(), RepoError> {
        let data = gateway
            .execute(
                DELETE_PLAY,
                json!({ "play_id": play_id, "client_id": gateway.owner_token() }),
            )
            .await?;
        let result: DeleteResult = decode_field(data, "deleteFromplaysCollection", "play")?;
        tracing::debug!(play_id, affected = result.affected_count, "Deleted play");
        Ok(())
    }
}
