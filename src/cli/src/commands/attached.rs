//! Attached data commands for the tokenization CLI.

use tokenization_chain::{get_citizen_benefit, get_merchant_name};
use tokenization_core::{BenefitCode, EnvVars, Result};
use tracing::info;

/// Runs the benefit command.
pub async fn benefit(config: &EnvVars, address: &str) -> Result<BenefitCode> {
    info!("Getting benefit for citizen: {}", address);
    get_citizen_benefit(config, address).await
}

/// Runs the merchant-name command.
pub async fn merchant_name(config: &EnvVars, address: &str) -> Result<String> {
    info!("Getting name of merchant: {}", address);
    get_merchant_name(config, address).await
}
