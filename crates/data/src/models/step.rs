//! Wire and input types for play steps.
//!
//! Steps are the one entity whose in-memory identity ([`StepRef`]) is
//! richer than the wire identity, so the row type lives here instead of
//! the shared model: placeholder ids must never be serialized.

use serde::Deserialize;

use playbook_core::model::{PlayStep, StepRef};

/// A step row exactly as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct StepRow {
    pub id: String,
    pub play_id: String,
    pub client_id: Option<String>,
    pub step_name: String,
    pub step_description: Option<String>,
    pub step_num: i32,
    pub step_role_name: Option<String>,
}

impl From<StepRow> for PlayStep {
    fn from(row: StepRow) -> Self {
        PlayStep {
            id: StepRef::Persisted(row.id),
            play_id: row.play_id,
            client_id: row.client_id,
            step_name: row.step_name,
            step_description: row.step_description,
            step_num: row.step_num,
            step_role_name: row.step_role_name,
        }
    }
}

/// Input for creating a step. Optional fields are already normalized
/// (blank collapsed to `None`) by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStep {
    pub play_id: String,
    pub step_name: String,
    pub step_description: Option<String>,
    pub step_num: i32,
    pub step_role_name: Option<String>,
}

/// Input for updating a persisted step: full field set plus current
/// sequence position, targeted by server id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPatch {
    pub id: String,
    pub step_name: String,
    pub step_description: Option<String>,
    pub step_num: i32,
    pub step_role_name: Option<String>,
}
