//! Ticket upload command for the tokenization CLI.

use std::convert::TryFrom;
use std::path::Path;
use tokenization_core::{
    BenefitCode, EnvVars, Result, TicketFile, TicketProcessingResult, TokenizationError,
};
use tokenization_services::process_ticket_image;
use tracing::info;

/// Builds the ticket file from either a local path or a JSON file descriptor.
pub fn ticket_file(path: Option<&Path>, descriptor: Option<&str>) -> Result<TicketFile> {
    match (path, descriptor) {
        (Some(path), None) => Ok(TicketFile::from_path(path)),
        (None, Some(descriptor)) => {
            let value: serde_json::Value =
                serde_json::from_str(descriptor).map_err(|_| TokenizationError::InvalidFormat)?;
            TicketFile::try_from(value)
        }
        _ => Err(TokenizationError::Config(
            "exactly one of --file or --descriptor is required".to_string(),
        )),
    }
}

/// Parses an aid category given as code (`2`) or label (`grocery`).
pub fn parse_aid(value: &str) -> std::result::Result<BenefitCode, String> {
    match value.trim().to_ascii_uppercase().as_str() {
        "0" | "NONE" => Ok(BenefitCode::None),
        "1" | "STATIONERY" => Ok(BenefitCode::Stationery),
        "2" | "GROCERY" => Ok(BenefitCode::Grocery),
        other => Err(format!("unknown aid category: {}", other)),
    }
}

/// Runs the upload-ticket command.
pub async fn run(
    config: &EnvVars,
    aid: BenefitCode,
    file: TicketFile,
    authorization: &str,
) -> Result<TicketProcessingResult> {
    info!("Uploading ticket for aid {}", aid);
    process_ticket_image(config, aid, file, authorization).await
}
