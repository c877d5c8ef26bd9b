//! Persistence seam for the editor.
//!
//! [`StepStore`] is the narrow interface the editor saves through;
//! [`RemoteStepStore`] is the production implementation binding a
//! gateway to one play. Tests substitute an in-memory double.

use async_trait::async_trait;

use playbook_core::model::PlayStep;
use playbook_data::{NewStep, RepoError, StepPatch, StepRepo};
use playbook_gateway::Gateway;

/// Step persistence operations for a single play.
#[async_trait]
pub trait StepStore: Send + Sync {
    /// Fetch all steps of the play in `step_num` order.
    async fn list(&self) -> Result<Vec<PlayStep>, RepoError>;

    /// Create one step.
    async fn create(&self, input: &NewStep) -> Result<PlayStep, RepoError>;

    /// Update one persisted step.
    async fn update(&self, patch: &StepPatch) -> Result<PlayStep, RepoError>;

    /// Delete one persisted step by server id.
    async fn delete(&self, step_id: &str) -> Result<(), RepoError>;
}

/// [`StepStore`] backed by the remote repositories.
#[derive(Debug, Clone)]
pub struct RemoteStepStore {
    gateway: Gateway,
    play_id: String,
}

impl RemoteStepStore {
    pub fn new(gateway: Gateway, play_id: impl Into<String>) -> Self {
        Self {
            gateway,
            play_id: play_id.into(),
        }
    }
}

#[async_trait]
impl StepStore for RemoteStepStore {
    async fn list(&self) -> Result<Vec<PlayStep>, RepoError> {
        StepRepo::list_for_play(&self.gateway, &self.play_id).await
    }

    async fn create(&self, input: &NewStep) -> Result<PlayStep, RepoError> {
        StepRepo::create(&self.gateway, input).await
    }

    async fn update(&self, patch: &StepPatch) -> Result<PlayStep, RepoError> {
        StepRepo::update(&self.gateway, patch).await
    }

    async fn delete(&self, step_id: &str) -> Result<(), RepoError> {
        StepRepo::delete(&self.gateway, step_id).await
    }
}
