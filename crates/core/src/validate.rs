//! Client-side precondition checks.
//!
//! These run before any network call. They are soft checks: the server
//! remains the final arbiter (notably for role-name uniqueness, which is
//! enforced by a database constraint).

use crate::error::CoreError;
use crate::model::{PlayStep, Role};

/// Validate a play name: non-empty after trimming.
pub fn validate_play_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Give this play a name before saving".to_string(),
        ));
    }
    Ok(())
}

/// Validate that every step has a non-blank name.
///
/// Applies to pending and persisted steps alike; a single offender
/// aborts the whole save before anything is sent.
pub fn validate_step_names(steps: &[PlayStep]) -> Result<(), CoreError> {
    for step in steps {
        if step.step_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Give every step a name before saving".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate role creation/update input: name and description are both
/// required and must be non-blank.
pub fn validate_role_input(name: &str, description: &str) -> Result<(), CoreError> {
    let name_blank = name.trim().is_empty();
    let desc_blank = description.trim().is_empty();
    if name_blank && desc_blank {
        return Err(CoreError::Validation(
            "Name and description are required".to_string(),
        ));
    }
    if name_blank {
        return Err(CoreError::Validation("Name is required".to_string()));
    }
    if desc_blank {
        return Err(CoreError::Validation("Description is required".to_string()));
    }
    Ok(())
}

/// Case-insensitive uniqueness pre-check for a new role name against the
/// roles currently in memory.
pub fn ensure_role_name_available(existing: &[Role], candidate: &str) -> Result<(), CoreError> {
    let candidate = candidate.trim();
    let lowered = candidate.to_lowercase();
    let taken = existing
        .iter()
        .any(|r| r.role_name.to_lowercase() == lowered);
    if taken {
        return Err(CoreError::Validation(format!(
            "A job description named '{candidate}' already exists"
        )));
    }
    Ok(())
}
