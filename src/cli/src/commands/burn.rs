//! Burn command for the tokenization CLI.

use tokenization_chain::{burn_tokens, TransactionOutcome};
use tokenization_core::{EnvVars, Result};
use tracing::info;

/// Runs the burn command.
pub async fn run(
    config: &EnvVars,
    private_key: &str,
    amount: &str,
    note: Option<&str>,
) -> Result<TransactionOutcome> {
    info!("Burning {} tokens", amount);
    burn_tokens(config, private_key, amount, note).await
}
