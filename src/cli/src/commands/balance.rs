//! Balance command for the tokenization CLI.

use tokenization_chain::get_token_balance;
use tokenization_core::{EnvVars, Result};
use tracing::info;

/// Runs the balance command.
pub async fn run(config: &EnvVars, address: &str) -> Result<String> {
    info!("Getting balance for address: {}", address);
    get_token_balance(config, address).await
}
