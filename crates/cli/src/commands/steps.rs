//! Interactive step-editing session: the terminal analogue of the
//! drag-and-drop step editor page.
//!
//! The session owns a [`StepListEditor`]; every command manipulates the
//! in-memory list, and only `save` (bulk) and `del` (single, optimistic)
//! touch the network. Errors inside the session never end it.

use std::io::{self, BufRead, Write};

use playbook_core::model::{PlayStep, Role, StepRef};
use playbook_data::{PlayRepo, RoleRepo};
use playbook_editor::{EditorError, RemoteStepStore, StepListEditor};
use playbook_gateway::Gateway;

type Editor = StepListEditor<RemoteStepStore>;

/// Run an interactive editing session for one play's steps.
pub async fn edit(gateway: &Gateway, play_id: &str) -> anyhow::Result<()> {
    let store = RemoteStepStore::new(gateway.clone(), play_id);
    let mut editor = StepListEditor::new(store, play_id);

    // Play, roles, and steps load in parallel; completion order is not
    // assumed.
    let (play, roles, loaded) = tokio::join!(
        PlayRepo::find(gateway, play_id),
        RoleRepo::list(gateway),
        editor.load(),
    );
    let Some(play) = play? else {
        println!("Play not found. It may have been deleted.");
        return Ok(());
    };
    let roles = roles?;
    loaded?;

    println!("Editing steps of '{}'. Type 'help' for commands.", play.play_name);
    render(editor.steps());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = split_command(input);
        match command {
            "help" => help(),
            "list" => render(editor.steps()),
            "add" => {
                editor.add_step();
                render(editor.steps());
            }
            "name" => {
                let (index, value) = split_command(rest);
                match target(&editor, index) {
                    Some(id) => {
                        editor.edit_name(&id, value);
                        render(editor.steps());
                    }
                    None => println!("No step '{index}'."),
                }
            }
            "desc" => {
                let (index, value) = split_command(rest);
                match target(&editor, index) {
                    Some(id) => {
                        editor.edit_description(&id, value);
                        render(editor.steps());
                    }
                    None => println!("No step '{index}'."),
                }
            }
            "role" => {
                let (index, value) = split_command(rest);
                match target(&editor, index) {
                    Some(id) => {
                        assign_role(&mut editor, &roles, &id, value);
                        render(editor.steps());
                    }
                    None => println!("No step '{index}'."),
                }
            }
            "move" => {
                let (from, to) = split_command(rest);
                match (parse_index(&editor, from), parse_index(&editor, to)) {
                    (Some(from), Some(to)) => {
                        editor.reorder(from, to);
                        render(editor.steps());
                    }
                    _ => println!("Usage: move <from> <to>"),
                }
            }
            "del" => match target(&editor, rest) {
                Some(id) => {
                    if let Err(e) = editor.delete_step(&id).await {
                        // The step is already gone locally; the server
                        // may still have it.
                        tracing::warn!(error = %e, "Failed to delete step");
                        println!("Failed to delete step on the server: {e}");
                    }
                    render(editor.steps());
                }
                None => println!("No step '{rest}'."),
            },
            "save" => match editor.save_all().await {
                Ok(()) => {
                    println!("Play steps saved.");
                    render(editor.steps());
                }
                Err(EditorError::Validation(e)) => println!("{e}"),
                Err(EditorError::Store(e)) => {
                    tracing::warn!(error = %e, "Failed to save steps");
                    println!("Failed to save. Please try again. ({e})");
                }
            },
            "reload" => match editor.load().await {
                Ok(()) => render(editor.steps()),
                Err(e) => println!("Failed to reload: {e}"),
            },
            "quit" | "q" | "exit" => break,
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }

    Ok(())
}

/// Split off the first whitespace-delimited word.
fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(|c: char| c.is_whitespace()) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (input, ""),
    }
}

/// Resolve a 1-based display index to the step's identity.
fn target(editor: &Editor, arg: &str) -> Option<StepRef> {
    parse_index(editor, arg).map(|i| editor.steps()[i].id.clone())
}

/// Parse a 1-based display index into a 0-based list index.
fn parse_index(editor: &Editor, arg: &str) -> Option<usize> {
    let position: usize = arg.parse().ok()?;
    let index = position.checked_sub(1)?;
    (index < editor.steps().len()).then_some(index)
}

/// Assign, replace, or clear (`-`) a step's job description.
fn assign_role(editor: &mut Editor, roles: &[Role], id: &StepRef, value: &str) {
    if value.is_empty() || value == "-" {
        editor.set_role(id, None);
        return;
    }
    match roles
        .iter()
        .find(|r| r.role_name.to_lowercase() == value.to_lowercase())
    {
        Some(role) => editor.set_role(id, Some(&role.role_name)),
        None => {
            let known: Vec<&str> = roles.iter().map(|r| r.role_name.as_str()).collect();
            println!(
                "No job description named '{value}'. Known: {}",
                if known.is_empty() {
                    "(none)".to_string()
                } else {
                    known.join(", ")
                }
            );
        }
    }
}

fn render(steps: &[PlayStep]) {
    if steps.is_empty() {
        println!("  (no steps yet -- 'add' to create one)");
        return;
    }
    let mut any_pending = false;
    for (i, step) in steps.iter().enumerate() {
        let marker = if step.id.is_pending() {
            any_pending = true;
            "*"
        } else {
            " "
        };
        let name = if step.step_name.is_empty() {
            "(untitled step)"
        } else {
            step.step_name.as_str()
        };
        let role = step.step_role_name.as_deref().unwrap_or("-");
        println!("{:>3}{marker} {name}  [{role}]", i + 1);
        if let Some(description) = &step.step_description {
            if !description.trim().is_empty() {
                println!("      {description}");
            }
        }
    }
    if any_pending {
        println!("  * not saved yet");
    }
}

fn help() {
    println!("Commands:");
    println!("  list              Show the current steps");
    println!("  add               Append a new step");
    println!("  name <n> <text>   Set step n's name");
    println!("  desc <n> <text>   Set step n's description");
    println!("  role <n> <job|->  Assign or clear step n's job description");
    println!("  move <from> <to>  Move a step to a new position");
    println!("  del <n>           Delete step n (immediate)");
    println!("  save              Save all changes");
    println!("  reload            Discard local changes, reload from the server");
    println!("  quit              Leave the session");
}
