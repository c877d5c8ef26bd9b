//! Connectivity and identity diagnostics.

use playbook_gateway::{Gateway, TokenStore};

/// Run a trivial introspection query against the backend.
pub async fn ping(gateway: &Gateway) -> anyhow::Result<()> {
    let query_type = gateway.ping().await?;
    println!("Backend reachable (query type: {query_type}).");
    Ok(())
}

/// Print the device's owner token and its storage location, creating it
/// on first use.
pub fn identity() -> anyhow::Result<()> {
    let store = TokenStore::from_env()?;
    let token = store.get_or_create()?;
    println!("Owner token: {token}");
    println!("Stored at:   {}", store.token_path().display());
    Ok(())
}
