//! Role command for the tokenization CLI.

use tokenization_chain::get_party_permission;
use tokenization_core::{EnvVars, Result, RoleCode};
use tracing::info;

/// Runs the role command.
pub async fn run(config: &EnvVars, address: &str) -> Result<RoleCode> {
    info!("Getting role for address: {}", address);
    get_party_permission(config, address).await
}
