//! Repository for play steps.

use serde_json::json;

use playbook_core::model::PlayStep;
use playbook_gateway::Gateway;

use crate::error::RepoError;
use crate::models::step::{NewStep, StepPatch, StepRow};
use crate::wire::{decode_field, Collection, DeleteResult, MutationRecords};

const LIST_STEPS: &str = "
    query GetPlaySteps($play_id: UUID!, $client_id: String!) {
      play_stepsCollection(
        filter: {
          play_id: { eq: $play_id }
          client_id: { eq: $client_id }
        }
        orderBy: [{ step_num: AscNullsLast }]
      ) {
        edges {
          node {
            id
            play_id
            client_id
            step_name
            step_description
            step_num
            step_role_name
          }
        }
      }
    }
";

const CREATE_STEP: &str = "
    mutation CreatePlayStep(
      $play_id: UUID!
      $step_name: String!
      $step_description: String
      $step_num: Int!
      $step_role_name: String
      $client_id: String!
    ) {
      insertIntoplay_stepsCollection(
        objects: [
          {
            play_id: $play_id
            step_name: $step_name
            step_description: $step_description
            step_num: $step_num
            step_role_name: $step_role_name
            client_id: $client_id
          }
        ]
      ) {
        records {
          id
          play_id
          client_id
          step_name
          step_description
          step_num
          step_role_name
        }
      }
    }
";

const UPDATE_STEP: &str = "
    mutation UpdatePlayStep(
      $id: UUID!
      $step_name: String!
      $step_description: String
      $step_num: Int!
      $step_role_name: String
      $client_id: String!
    ) {
      updateplay_stepsCollection(
        filter: {
          id: { eq: $id }
          client_id: { eq: $client_id }
        }
        set: {
          step_name: $step_name
          step_description: $step_description
          step_num: $step_num
          step_role_name: $step_role_name
        }
      ) {
        records {
          id
          play_id
          client_id
          step_name
          step_description
          step_num
          step_role_name
        }
      }
    }
";

const DELETE_STEP: &str = "
    mutation DeletePlayStep($id: UUID!, $client_id: String!) {
      deleteFromplay_stepsCollection(
        filter: {
          id: { eq: $id }
          client_id: { eq: $client_id }
        }
      ) {
        affectedCount
      }
    }
";

/// Provides CRUD operations for play steps, scoped by owner token.
///
/// Listing returns steps ordered by `step_num` ascending, nulls last:
/// the order the editor treats as authoritative on load.
pub struct StepRepo;

impl StepRepo {
    /// List the steps of one play in `step_num` order.
    pub async fn list_for_play(
        gateway: &Gateway,
        play_id: &str,
    ) -> Result<Vec<PlayStep>, RepoError> {
        let data = gateway
            .execute(
                LIST_STEPS,
                json!({ "play_id": play_id, "client_id": gateway.owner_token() }),
            )
            .await?;
        let collection: Collection<StepRow> =
            decode_field(data, "play_stepsCollection", "play step")?;
        Ok(collection
            .into_nodes()
            .into_iter()
            .map(PlayStep::from)
            .collect())
    }

    /// Insert a new step with its sequence position.
    pub async fn create(gateway: &Gateway, input: &NewStep) -> Result<PlayStep, RepoError> {
        let data = gateway
            .execute(
                CREATE_STEP,
                json!({
                    "play_id": input.play_id,
                    "step_name": input.step_name,
                    "step_description": input.step_description,
                    "step_num": input.step_num,
                    "step_role_name": input.step_role_name,
                    "client_id": gateway.owner_token(),
                }),
            )
            .await?;
        let result: MutationRecords<StepRow> =
            decode_field(data, "insertIntoplay_stepsCollection", "play step")?;
        result
            .records
            .into_iter()
            .next()
            .map(PlayStep::from)
            .ok_or_else(|| RepoError::NotFound {
                entity: "play step",
                id: input.step_name.clone(),
            })
    }

    /// Update a persisted step's fields and sequence position.
    ///
    /// Fails with [`RepoError::NotFound`] when the id does not match a
    /// row owned by this device.
    pub async fn update(gateway: &Gateway, patch: &StepPatch) -> Result<PlayStep, RepoError> {
        let data = gateway
            .execute(
                UPDATE_STEP,
                json!({
                    "id": patch.id,
                    "step_name": patch.step_name,
                    "step_description": patch.step_description,
                    "step_num": patch.step_num,
                    "step_role_name": patch.step_role_name,
                    "client_id": gateway.owner_token(),
                }),
            )
            .await?;
        let result: MutationRecords<StepRow> =
            decode_field(data, "updateplay_stepsCollection", "play step")?;
        result
            .records
            .into_iter()
            .next()
            .map(PlayStep::from)
            .ok_or_else(|| RepoError::NotFound {
                entity: "play step",
                id: patch.id.clone(),
            })
    }

    /// Delete a persisted step by server id.
    pub async fn delete(gateway: &Gateway, step_id: &str) -> Result<(), RepoError> {
        let data = gateway
            .execute(
                DELETE_STEP,
                json!({ "id": step_id, "client_id": gateway.owner_token() }),
            )
            .await?;
        let result: DeleteResult =
            decode_field(data, "deleteFromplay_stepsCollection", "play step")?;
        tracing::debug!(step_id, affected = result.affected_count, "Deleted play step");
        Ok(())
    }
}
