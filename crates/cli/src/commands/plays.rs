//! Play commands: list, show, create (with optional step generation),
//! rename, delete.

use futures::future::join_all;

use playbook_core::model::Play;
use playbook_core::validate::validate_play_name;
use playbook_data::{NewStep, PlayRepo, RoleRepo, StepRepo};
use playbook_gateway::Gateway;
use playbook_generate::GeneratorClient;

/// List this device's plays.
pub async fn list(gateway: &Gateway) -> anyhow::Result<()> {
    let plays = PlayRepo::list(gateway).await?;
    if plays.is_empty() {
        println!("No plays yet. Create your first play to get started.");
        return Ok(());
    }
    for play in &plays {
        println!("{}  {}", play.play_id, play.play_name);
    }
    Ok(())
}

/// Show one play and its steps.
///
/// The play record and the step list load in parallel; neither is
/// assumed to resolve first.
pub async fn show(gateway: &Gateway, play_id: &str) -> anyhow::Result<()> {
    let (play, steps) = tokio::join!(
        PlayRepo::find(gateway, play_id),
        StepRepo::list_for_play(gateway, play_id),
    );
    let Some(play) = play? else {
        println!("Play not found. It may have been deleted.");
        return Ok(());
    };
    let steps = steps?;

    println!("{}  ({})", play.play_name, play.play_id);
    if steps.is_empty() {
        println!("  No steps yet.");
        return Ok(());
    }
    for step in &steps {
        let role = step.step_role_name.as_deref().unwrap_or("-");
        println!("  {:>2}. {}  [{}]", step.step_num, step.step_name, role);
        if let Some(description) = &step.step_description {
            println!("      {description}");
        }
    }
    Ok(())
}

/// Create a play; with `--goal`, draft its steps via the generation
/// service afterwards.
///
/// Generation is best-effort: the play is already created and stays
/// created when the generation call or the step inserts fail.
pub async fn create(gateway: &Gateway, name: &str, goal: Option<&str>) -> anyhow::Result<()> {
    validate_play_name(name)?;

    let play = PlayRepo::create(gateway, name.trim()).await?;
    println!("Created play '{}' ({}).", play.play_name, play.play_id);

    if let Some(goal) = goal {
        match populate_steps(gateway, &play, goal).await {
            Ok(0) => println!("The generation service returned no steps."),
            Ok(count) => println!("Generated {count} steps."),
            Err(e) => {
                tracing::warn!(error = %e, play_id = %play.play_id, "Step generation failed");
                println!("Play created, but steps could not be auto-generated: {e}");
            }
        }
    }
    Ok(())
}

/// Rename a play.
pub async fn rename(gateway: &Gateway, play_id: &str, name: &str) -> anyhow::Result<()> {
    validate_play_name(name)?;
    let play = PlayRepo::rename(gateway, play_id, name.trim()).await?;
    println!("Renamed play to '{}'.", play.play_name);
    Ok(())
}

/// Delete a play.
pub async fn delete(gateway: &Gateway, play_id: &str) -> anyhow::Result<()> {
    PlayRepo::delete(gateway, play_id).await?;
    println!("Deleted play {play_id}.");
    Ok(())
}

/// Call the generation service and insert the drafted steps.
async fn populate_steps(gateway: &Gateway, play: &Play, goal: &str) -> anyhow::Result<usize> {
    let generator = GeneratorClient::from_env()?;

    let roles = RoleRepo::list(gateway).await?;
    let role_names: Vec<String> = roles.into_iter().map(|r| r.role_name).collect();

    let drafts = generator.generate(&play.play_id, goal, &role_names).await?;
    if drafts.is_empty() {
        return Ok(0);
    }

    let inputs: Vec<NewStep> = drafts
        .into_iter()
        .map(|draft| NewStep {
            play_id: play.play_id.clone(),
            step_name: draft.step_name,
            step_description: draft.step_description,
            step_num: draft.step_num,
            step_role_name: draft.step_role_name,
        })
        .collect();

    let results = join_all(inputs.iter().map(|input| StepRepo::create(gateway, input))).await;
    let count = results.len();
    results.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(count)
}
