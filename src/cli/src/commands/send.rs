//! Send command for the tokenization CLI.

use tokenization_chain::{send_tokens, TransactionOutcome};
use tokenization_core::{EnvVars, Result};
use tracing::info;

/// Runs the send command.
pub async fn run(
    config: &EnvVars,
    private_key: &str,
    to: &str,
    amount: &str,
    note: Option<&str>,
) -> Result<TransactionOutcome> {
    info!("Sending {} tokens to {}", amount, to);
    send_tokens(config, private_key, to, amount, note).await
}
