//! Repository for roles (shown in the UI as "job descriptions").
//!
//! `role_name` is the identity: updates only touch the description, and
//! uniqueness is ultimately enforced server-side. The client-side
//! pre-check lives in `playbook_core::validate`.

use serde_json::json;

use playbook_core::model::Role;
use playbook_gateway::Gateway;

use crate::error::RepoError;
use crate::wire::{decode_field, Collection, DeleteResult, MutationRecords};

const LIST_ROLES: &str = "
    query GetRoles($client_id: String!) {
      rolesCollection(
        filter: { client_id: { eq: $client_id } }
        orderBy: [{ role_name: AscNullsLast }]
      ) {
        edges {
          node {
            role_name
            role_description
            client_id
          }
        }
      }
    }
";

const CREATE_ROLE: &str = "
    mutation CreateRole(
      $role_name: String!
      $role_description: String!
      $client_id: String!
    ) {
      insertIntorolesCollection(
        objects: [
          {
            role_name: $role_name
            role_description: $role_description
            client_id: $client_id
          }
        ]
      ) {
        records {
          role_name
          role_description
          client_id
        }
      }
    }
";

const UPDATE_ROLE: &str = "
    mutation UpdateRole(
      $role_name: String!
      $role_description: String!
      $client_id: String!
    ) {
      updaterolesCollection(
        filter: {
          role_name: { eq: $role_name }
          client_id: { eq: $client_id }
        }
        set: {
          role_description: $role_description
        }
      ) {
        records {
          role_name
          role_description
          client_id
        }
      }
    }
";

const DELETE_ROLE: &str = "
    mutation DeleteRole($role_name: String!, $client_id: String!) {
      deleteFromrolesCollection(
        filter: {
          role_name: { eq: $role_name }
          client_id: { eq: $client_id }
        }
      ) {
        affectedCount
      }
    }
";

/// Provides CRUD operations for roles, scoped by owner token.
pub struct RoleRepo;

impl RoleRepo {
    /// List this device's roles, ordered by name ascending.
    pub async fn list(gateway: &Gateway) -> Result<Vec<Role>, RepoError> {
        let data = gateway
            .execute(LIST_ROLES, json!({ "client_id": gateway.owner_token() }))
            .await?;
        let collection: Collection<Role> = decode_field(data, "rolesCollection", "role")?;
        Ok(collection.into_nodes())
    }

    /// Insert a new role, returning the created row.
    pub async fn create(
        gateway: &Gateway,
        role_name: &str,
        role_description: &str,
    ) -> Result<Role, RepoError> {
        let data = gateway
            .execute(
                CREATE_ROLE,
                json!({
                    "role_name": role_name,
                    "role_description": role_description,
                    "client_id": gateway.owner_token(),
                }),
            )
            .await?;
        let result: MutationRecords<Role> =
            decode_field(data, "insertIntorolesCollection", "role")?;
        result
            .records
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound {
                entity: "role",
                id: role_name.to_string(),
            })
    }

    /// Update an existing role's description.
    pub async fn update(
        gateway: &Gateway,
        role_name: &str,
        role_description: &str,
    ) -> Result<Role, RepoError> {
        let data = gateway
            .execute(
                UPDATE_ROLE,
                json!({
                    "role_name": role_name,
                    "role_description": role_description,
                    "client_id": gateway.owner_token(),
                }),
            )
            .await?;
        let result: MutationRecords<Role> = decode_field(data, "updaterolesCollection", "role")?;
        result
            .records
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound {
                entity: "role",
                id: role_name.to_string(),
            })
    }

    /// Delete a role owned by this device.
    pub async fn delete(gateway: &Gateway, role_name: &str) -> Result<(), RepoError> {
        let data = gateway
            .execute(
                DELETE_ROLE,
                json!({ "role_name": role_name, "client_id": gateway.owner_token() }),
            )
            .await?;
        let result: DeleteResult = decode_field(data, "deleteFromrolesCollection", "role")?;
        tracing::debug!(role_name, affected = result.affected_count, "Deleted role");
        Ok(())
    }
}
