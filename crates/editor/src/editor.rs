//! The in-session ordered step list and its reconciliation with the
//! server.

use futures::future::join_all;

use playbook_core::model::{PlayStep, StepRef};
use playbook_core::normalize::collapse_blank;
use playbook_core::validate::validate_step_names;
use playbook_data::{NewStep, StepPatch};

use crate::error::EditorError;
use crate::store::StepStore;

/// Owns the authoritative ordered step list for one play during an
/// editing session.
///
/// Insertion order is display order. `step_num` values are recomputed on
/// every reorder; between a deletion and the next save they may carry
/// gaps, which the save then persists as-is and the reload re-derives.
pub struct StepListEditor<S> {
    store: S,
    play_id: String,
    steps: Vec<PlayStep>,
    next_pending: u64,
}

impl<S: StepStore> StepListEditor<S> {
    /// Create an editor with an empty list. Call [`load`](Self::load) to
    /// populate it.
    pub fn new(store: S, play_id: impl Into<String>) -> Self {
        Self {
            store,
            play_id: play_id.into(),
            steps: Vec::new(),
            next_pending: 0,
        }
    }

    /// The play this session edits.
    pub fn play_id(&self) -> &str {
        &self.play_id
    }

    /// Current steps in display order.
    pub fn steps(&self) -> &[PlayStep] {
        &self.steps
    }

    /// Replace the list wholesale from the store.
    ///
    /// Used at session start and after a save, when the reload swaps
    /// pending ids for the server-issued ones.
    pub async fn load(&mut self) -> Result<(), EditorError> {
        self.steps = self.store.list().await?;
        Ok(())
    }

    /// Append a new step with a session-local pending id and
    /// `step_num = len + 1`. No server call.
    pub fn add_step(&mut self) -> StepRef {
        let id = StepRef::Pending(self.next_pending);
        self.next_pending += 1;

        self.steps.push(PlayStep {
            id: id.clone(),
            play_id: self.play_id.clone(),
            client_id: None,
            step_name: String::new(),
            step_description: None,
            step_num: self.steps.len() as i32 + 1,
            step_role_name: None,
        });
        id
    }

    /// Set a step's name in place. Unknown ids are a silent no-op.
    /// Validation happens at save, not here.
    pub fn edit_name(&mut self, id: &StepRef, value: &str) {
        if let Some(step) = self.find_mut(id) {
            step.step_name = value.to_string();
        }
    }

    /// Set a step's description in place, raw. Blank text is collapsed
    /// to absent only when the step is persisted.
    pub fn edit_description(&mut self, id: &StepRef, value: &str) {
        if let Some(step) = self.find_mut(id) {
            step.step_description = Some(value.to_string());
        }
    }

    /// Assign or clear a step's role in place.
    pub fn set_role(&mut self, id: &StepRef, role_name: Option<&str>) {
        if let Some(step) = self.find_mut(id) {
            step.step_role_name = role_name.map(str::to_string);
        }
    }

    /// Move the step at `from` to position `to` (list-move semantics:
    /// the relative order of the other steps is unchanged), then
    /// renumber every step to its new 1-based position.
    ///
    /// Out-of-range indices are a silent no-op.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from >= self.steps.len() || to >= self.steps.len() || from == to {
            return;
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        self.renumber();
    }

    /// Remove a step from the session immediately (optimistic).
    ///
    /// Pending steps are purely local: no server call. Persisted steps
    /// get exactly one delete call; if it fails the error is surfaced
    /// but the removal is not rolled back.
    pub async fn delete_step(&mut self, id: &StepRef) -> Result<(), EditorError> {
        let Some(pos) = self.steps.iter().position(|s| &s.id == id) else {
            return Ok(());
        };
        let step = self.steps.remove(pos);

        match step.id {
            StepRef::Pending(_) => Ok(()),
            StepRef::Persisted(server_id) => {
                tracing::debug!(step_id = %server_id, "Deleting persisted step");
                self.store.delete(&server_id).await?;
                Ok(())
            }
        }
    }

    /// Persist the whole session: update every persisted step, create
    /// every pending one, then reload the authoritative list.
    ///
    /// Validation failures abort before any network call. The per-step
    /// calls run concurrently and are not a transaction: partial
    /// completion is accepted and never rolled back. The reload runs
    /// after all calls were attempted, even when some failed, so the
    /// session converges back to the server's view; the first failure
    /// is then reported.
    pub async fn save_all(&mut self) -> Result<(), EditorError> {
        validate_step_names(&self.steps)?;

        let mut patches = Vec::new();
        let mut inputs = Vec::new();
        for step in &self.steps {
            match &step.id {
                StepRef::Persisted(id) => patches.push(StepPatch {
                    id: id.clone(),
                    step_name: step.step_name.clone(),
                    step_description: collapse_blank(step.step_description.as_deref()),
                    step_num: step.step_num,
                    step_role_name: collapse_blank(step.step_role_name.as_deref()),
                }),
                StepRef::Pending(_) => inputs.push(NewStep {
                    play_id: self.play_id.clone(),
                    step_name: step.step_name.clone(),
                    step_description: collapse_blank(step.step_description.as_deref()),
                    step_num: step.step_num,
                    step_role_name: collapse_blank(step.step_role_name.as_deref()),
                }),
            }
        }

        tracing::debug!(
            updates = patches.len(),
            creates = inputs.len(),
            "Saving step list"
        );

        let updates = join_all(patches.iter().map(|p| self.store.update(p)));
        let creates = join_all(inputs.iter().map(|i| self.store.create(i)));
        let (update_results, create_results) = futures::join!(updates, creates);

        let mut first_failure = update_results
            .into_iter()
            .chain(create_results)
            .find_map(Result::err);

        match self.store.list().await {
            Ok(steps) => self.steps = steps,
            Err(e) => {
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn find_mut(&mut self, id: &StepRef) -> Option<&mut PlayStep> {
        self.steps.iter_mut().find(|s| &s.id == id)
    }

    fn renumber(&mut self) {
        for (index, step) in self.steps.iter_mut().enumerate() {
            step.step_num = index as i32 + 1;
        }
    }
}
