use playbook_core::CoreError;
use playbook_data::RepoError;

/// Errors from the step-list editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A client-side precondition failed; no network call was made.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// A step store call failed.
    #[error(transparent)]
    Store(#[from] RepoError),
}
