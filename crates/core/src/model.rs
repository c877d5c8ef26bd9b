//! Entity types shared across the client.
//!
//! [`Play`] and [`Role`] match their wire representation directly. A
//! [`PlayStep`] does not: its identity is a [`StepRef`], which only
//! collapses to a plain server id once the step has been persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, ordered workflow composed of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub play_id: String,
    pub play_name: String,
    /// Owner token scoping this row to one device.
    pub client_id: Option<String>,
}

/// A named responsibility that can be assigned to steps.
///
/// `role_name` is the identity and is immutable after creation; only the
/// description can be updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role_name: String,
    pub role_description: Option<String>,
    pub client_id: Option<String>,
}

/// Identity of a step within an editing session.
///
/// A step loaded from the server carries its real id; a step created
/// locally carries a session-scoped counter until the next successful
/// save replaces it. Pending ids never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepRef {
    /// Server-issued identifier.
    Persisted(String),
    /// Session-local identifier for a not-yet-saved step.
    Pending(u64),
}

impl StepRef {
    /// Whether this step has not been persisted yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, StepRef::Pending(_))
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepRef::Persisted(id) => write!(f, "{id}"),
            StepRef::Pending(n) => write!(f, "pending-{n}"),
        }
    }
}

/// One ordered unit of a [`Play`], optionally assigned a [`Role`].
///
/// `step_num` is the 1-based sequence position. It is only guaranteed to
/// match display order after a renumber pass; the editor recomputes it on
/// every reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayStep {
    pub id: StepRef,
    pub play_id: String,
    pub client_id: Option<String>,
    pub step_name: String,
    pub step_description: Option<String>,
    pub step_num: i32,
    pub step_role_name: Option<String>,
}
