//! Integration tests for the step-list editor, driven through an
//! in-memory recording store so every network interaction is observable.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;

use playbook_core::model::{PlayStep, StepRef};
use playbook_data::{NewStep, RepoError, StepPatch};
use playbook_editor::{EditorError, StepListEditor, StepStore};

const PLAY: &str = "p1";

// ---------------------------------------------------------------------------
// Recording store double
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Create(NewStep),
    Update(StepPatch),
    Delete(String),
}

#[derive(Default)]
struct Inner {
    /// Successive `list` results; the last entry is reused once drained.
    list_results: Mutex<VecDeque<Vec<PlayStep>>>,
    calls: Mutex<Vec<Call>>,
    fail_update_ids: Mutex<HashSet<String>>,
    fail_deletes: Mutex<bool>,
    created: Mutex<u64>,
}

#[derive(Clone, Default)]
struct RecordingStore(Arc<Inner>);

impl RecordingStore {
    fn with_lists(lists: Vec<Vec<PlayStep>>) -> Self {
        let store = Self::default();
        *store.0.list_results.lock().unwrap() = lists.into();
        store
    }

    fn fail_update(self, id: &str) -> Self {
        self.0.fail_update_ids.lock().unwrap().insert(id.to_string());
        self
    }

    fn fail_deletes(self) -> Self {
        *self.0.fail_deletes.lock().unwrap() = true;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.0.calls.lock().unwrap().clone()
    }

    fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List))
            .collect()
    }
}

#[async_trait]
impl StepStore for RecordingStore {
    async fn list(&self) -> Result<Vec<PlayStep>, RepoError> {
        self.0.calls.lock().unwrap().push(Call::List);
        let mut results = self.0.list_results.lock().unwrap();
        if results.len() > 1 {
            Ok(results.pop_front().unwrap())
        } else {
            Ok(results.front().cloned().unwrap_or_default())
        }
    }

    async fn create(&self, input: &NewStep) -> Result<PlayStep, RepoError> {
        self.0.calls.lock().unwrap().push(Call::Create(input.clone()));
        let mut created = self.0.created.lock().unwrap();
        *created += 1;
        Ok(PlayStep {
            id: StepRef::Persisted(format!("srv-{created}")),
            play_id: input.play_id.clone(),
            client_id: None,
            step_name: input.step_name.clone(),
            step_description: input.step_description.clone(),
            step_num: input.step_num,
            step_role_name: input.step_role_name.clone(),
        })
    }

    async fn update(&self, patch: &StepPatch) -> Result<PlayStep, RepoError> {
        self.0.calls.lock().unwrap().push(Call::Update(patch.clone()));
        if self.0.fail_update_ids.lock().unwrap().contains(&patch.id) {
            return Err(RepoError::NotFound {
                entity: "play step",
                id: patch.id.clone(),
            });
        }
        Ok(PlayStep {
            id: StepRef::Persisted(patch.id.clone()),
            play_id: PLAY.to_string(),
            client_id: None,
            step_name: patch.step_name.clone(),
            step_description: patch.step_description.clone(),
            step_num: patch.step_num,
            step_role_name: patch.step_role_name.clone(),
        })
    }

    async fn delete(&self, step_id: &str) -> Result<(), RepoError> {
        self.0
            .calls
            .lock()
            .unwrap()
            .push(Call::Delete(step_id.to_string()));
        if *self.0.fail_deletes.lock().unwrap() {
            return Err(RepoError::NotFound {
                entity: "play step",
                id: step_id.to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn persisted(id: &str, name: &str, num: i32) -> PlayStep {
    PlayStep {
        id: StepRef::Persisted(id.to_string()),
        play_id: PLAY.to_string(),
        client_id: None,
        step_name: name.to_string(),
        step_description: None,
        step_num: num,
        step_role_name: None,
    }
}

async fn loaded_editor(store: RecordingStore) -> StepListEditor<RecordingStore> {
    let mut editor = StepListEditor::new(store, PLAY);
    editor.load().await.expect("initial load");
    editor
}

fn identities(editor: &StepListEditor<RecordingStore>) -> HashSet<StepRef> {
    editor.steps().iter().map(|s| s.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reorder_renumbers_every_step() {
    let store = RecordingStore::with_lists(vec![vec![
        persisted("s1", "a", 1),
        persisted("s2", "b", 2),
        persisted("s3", "c", 3),
        persisted("s4", "d", 4),
    ]]);
    let mut editor = loaded_editor(store).await;
    let before = identities(&editor);

    editor.reorder(0, 2);
    editor.reorder(3, 1);

    for (i, step) in editor.steps().iter().enumerate() {
        assert_eq!(step.step_num, i as i32 + 1, "stale step_num at index {i}");
    }
    assert_eq!(identities(&editor), before, "reorder must not change the step set");
}

#[tokio::test]
async fn reorder_moves_without_disturbing_relative_order() {
    let store = RecordingStore::with_lists(vec![vec![
        persisted("s1", "a", 1),
        persisted("s2", "b", 2),
        persisted("s3", "c", 3),
    ]]);
    let mut editor = loaded_editor(store).await;

    editor.reorder(2, 0);

    let names: Vec<&str> = editor.steps().iter().map(|s| s.step_name.as_str()).collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[tokio::test]
async fn reorder_out_of_range_is_a_no_op() {
    let store = RecordingStore::with_lists(vec![vec![
        persisted("s1", "a", 1),
        persisted("s2", "b", 2),
    ]]);
    let mut editor = loaded_editor(store).await;
    let before = editor.steps().to_vec();

    editor.reorder(0, 5);
    editor.reorder(7, 0);

    assert_eq!(editor.steps(), before.as_slice());
}

// ---------------------------------------------------------------------------
// AddStep
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_step_appends_pending_step_with_next_number() {
    let store = RecordingStore::with_lists(vec![vec![
        persisted("s1", "a", 1),
        persisted("s2", "b", 2),
    ]]);
    let mut editor = loaded_editor(store.clone()).await;

    let id = editor.add_step();

    assert!(id.is_pending());
    let last = editor.steps().last().expect("appended step");
    assert_eq!(last.id, id);
    assert_eq!(last.step_num, 3);
    assert_eq!(last.step_name, "");
    assert!(store.write_calls().is_empty(), "add_step must stay local");
}

// ---------------------------------------------------------------------------
// DeleteStep
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_pending_step_makes_no_network_call() {
    let store = RecordingStore::default();
    let mut editor = StepListEditor::new(store.clone(), PLAY);
    let id = editor.add_step();

    editor.delete_step(&id).await.expect("local delete");

    assert!(editor.steps().is_empty());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn delete_persisted_step_issues_exactly_one_call() {
    let store = RecordingStore::with_lists(vec![vec![persisted("s1", "a", 1)]]);
    let mut editor = loaded_editor(store.clone()).await;

    editor
        .delete_step(&StepRef::Persisted("s1".to_string()))
        .await
        .expect("delete");

    assert!(editor.steps().is_empty());
    assert_eq!(store.write_calls(), vec![Call::Delete("s1".to_string())]);
}

#[tokio::test]
async fn failed_delete_is_not_rolled_back() {
    let store =
        RecordingStore::with_lists(vec![vec![persisted("s1", "a", 1)]]).fail_deletes();
    let mut editor = loaded_editor(store.clone()).await;

    let result = editor.delete_step(&StepRef::Persisted("s1".to_string())).await;

    assert_matches!(result, Err(EditorError::Store(_)));
    assert!(
        editor.steps().is_empty(),
        "optimistic removal must survive a failed delete"
    );
    assert_eq!(store.write_calls().len(), 1);
}

#[tokio::test]
async fn delete_unknown_id_is_a_silent_no_op() {
    let store = RecordingStore::with_lists(vec![vec![persisted("s1", "a", 1)]]);
    let mut editor = loaded_editor(store.clone()).await;

    editor
        .delete_step(&StepRef::Persisted("missing".to_string()))
        .await
        .expect("no-op");

    assert_eq!(editor.steps().len(), 1);
    assert!(store.write_calls().is_empty());
}

// ---------------------------------------------------------------------------
// SaveAll
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_all_with_blank_name_makes_no_calls() {
    let store = RecordingStore::with_lists(vec![vec![persisted("s1", "a", 1)]]);
    let mut editor = loaded_editor(store.clone()).await;
    editor.add_step(); // name left empty

    let result = editor.save_all().await;

    assert_matches!(result, Err(EditorError::Validation(_)));
    assert!(store.write_calls().is_empty());
    // The failed save must not have triggered a reload either.
    assert_eq!(store.calls(), vec![Call::List]);
}

#[tokio::test]
async fn save_all_updates_existing_and_creates_pending() {
    let store = RecordingStore::with_lists(vec![
        vec![persisted("s1", "A", 1)],
        vec![persisted("s1", "A", 1), persisted("s2", "B", 2)],
    ]);
    let mut editor = loaded_editor(store.clone()).await;
    let pending = editor.add_step();
    editor.edit_name(&pending, "B");

    editor.save_all().await.expect("save");

    let writes = store.write_calls();
    assert_eq!(writes.len(), 2, "exactly one update and one create");
    assert!(writes.iter().any(|c| matches!(
        c,
        Call::Update(patch) if patch.id == "s1" && patch.step_num == 1
    )));
    assert!(writes.iter().any(|c| matches!(
        c,
        Call::Create(input) if input.step_name == "B" && input.step_num == 2
    )));

    // Reload replaced the pending id with the server's view.
    assert!(editor.steps().iter().all(|s| !s.id.is_pending()));
    assert_eq!(editor.steps().len(), 2);
}

#[tokio::test]
async fn save_all_carries_reordered_step_numbers() {
    let store = RecordingStore::with_lists(vec![vec![
        persisted("s1", "a", 1),
        persisted("s2", "b", 2),
    ]]);
    let mut editor = loaded_editor(store.clone()).await;

    editor.reorder(0, 1);
    editor.save_all().await.expect("save");

    let writes = store.write_calls();
    assert!(writes.iter().any(|c| matches!(
        c,
        Call::Update(patch) if patch.id == "s2" && patch.step_num == 1
    )));
    assert!(writes.iter().any(|c| matches!(
        c,
        Call::Update(patch) if patch.id == "s1" && patch.step_num == 2
    )));
}

#[tokio::test]
async fn blank_optional_fields_are_saved_as_absent() {
    let store = RecordingStore::with_lists(vec![vec![persisted("s1", "a", 1)]]);
    let mut editor = loaded_editor(store.clone()).await;
    let id = StepRef::Persisted("s1".to_string());

    editor.edit_description(&id, "   ");
    editor.set_role(&id, Some("  "));
    editor.save_all().await.expect("save");

    let writes = store.write_calls();
    match &writes[0] {
        Call::Update(patch) => {
            assert_eq!(patch.step_description, None);
            assert_eq!(patch.step_role_name, None);
        }
        other => panic!("expected an update, got {other:?}"),
    }
}

#[tokio::test]
async fn partial_failure_still_reloads_and_reports() {
    let store = RecordingStore::with_lists(vec![
        vec![persisted("s1", "a", 1), persisted("s2", "b", 2)],
        vec![persisted("s1", "a", 1), persisted("s2", "b", 2)],
    ])
    .fail_update("s2");
    let mut editor = loaded_editor(store.clone()).await;
    editor.edit_name(&StepRef::Persisted("s1".to_string()), "a2");

    let result = editor.save_all().await;

    assert_matches!(result, Err(EditorError::Store(_)));
    // Both updates were attempted, and the reload still ran.
    assert_eq!(store.write_calls().len(), 2);
    assert_eq!(
        store.calls().iter().filter(|c| matches!(c, Call::List)).count(),
        2,
        "authoritative reload must follow a partially failed save"
    );
    assert_eq!(editor.steps().len(), 2);
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_round_trip_is_stable() {
    let steps = vec![
        persisted("s1", "a", 1),
        persisted("s2", "b", 2),
        persisted("s3", "c", 3),
    ];
    let store = RecordingStore::with_lists(vec![steps.clone(), steps]);
    let mut editor = StepListEditor::new(store, PLAY);

    editor.load().await.expect("first load");
    let first = editor.steps().to_vec();
    editor.load().await.expect("second load");

    assert_eq!(editor.steps(), first.as_slice());
}

// ---------------------------------------------------------------------------
// Field edits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edits_apply_in_place_and_ignore_unknown_ids() {
    let store = RecordingStore::with_lists(vec![vec![persisted("s1", "a", 1)]]);
    let mut editor = loaded_editor(store.clone()).await;
    let known = StepRef::Persisted("s1".to_string());
    let unknown = StepRef::Persisted("ghost".to_string());

    editor.edit_name(&known, "renamed");
    editor.edit_description(&known, "details");
    editor.set_role(&known, Some("Sales Rep"));
    editor.edit_name(&unknown, "nope");

    let step = &editor.steps()[0];
    assert_eq!(step.step_name, "renamed");
    assert_eq!(step.step_description.as_deref(), Some("details"));
    assert_eq!(step.step_role_name.as_deref(), Some("Sales Rep"));
    assert!(store.write_calls().is_empty(), "edits never touch the network");
}
