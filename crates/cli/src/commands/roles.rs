//! Job-description commands.
//!
//! Creation runs the required-field validation and the case-insensitive
//! uniqueness pre-check before any write. The server still owns the real
//! uniqueness constraint; its duplicate errors are softened here.

use playbook_core::validate::{ensure_role_name_available, validate_role_input};
use playbook_data::{RepoError, RoleRepo};
use playbook_gateway::Gateway;

/// List this device's job descriptions.
pub async fn list(gateway: &Gateway) -> anyhow::Result<()> {
    let roles = RoleRepo::list(gateway).await?;
    if roles.is_empty() {
        println!("No job descriptions yet.");
        return Ok(());
    }
    for role in &roles {
        let description = role.role_description.as_deref().unwrap_or("-");
        println!("{}  {}", role.role_name, description);
    }
    Ok(())
}

/// Create a job description.
pub async fn create(gateway: &Gateway, name: &str, description: &str) -> anyhow::Result<()> {
    let name = name.trim();
    let description = description.trim();
    validate_role_input(name, description)?;

    let existing = RoleRepo::list(gateway).await?;
    ensure_role_name_available(&existing, name)?;

    let role = RoleRepo::create(gateway, name, description)
        .await
        .map_err(soften_duplicate)?;
    println!("Created job description '{}'.", role.role_name);
    Ok(())
}

/// Update a job description's text.
pub async fn update(gateway: &Gateway, name: &str, description: &str) -> anyhow::Result<()> {
    let name = name.trim();
    let description = description.trim();
    validate_role_input(name, description)?;

    let role = RoleRepo::update(gateway, name, description).await?;
    println!("Updated job description '{}'.", role.role_name);
    Ok(())
}

/// Delete a job description.
pub async fn delete(gateway: &Gateway, name: &str) -> anyhow::Result<()> {
    RoleRepo::delete(gateway, name).await?;
    println!("Deleted job description '{name}'.");
    Ok(())
}

/// Map server-side unique-constraint wording to a friendly message.
fn soften_duplicate(err: RepoError) -> anyhow::Error {
    let message = err.server_message().to_lowercase();
    if message.contains("duplicate") || message.contains("unique") {
        anyhow::anyhow!("A job description with this name already exists")
    } else {
        err.into()
    }
}
