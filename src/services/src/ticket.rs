//! Ticket image upload to the processing backend.

use reqwest::{
    header::AUTHORIZATION,
    multipart::{Form, Part},
    Client,
};
use tokenization_core::{
    BenefitCode, EnvVars, Result, TicketFile, TicketProcessingResult, TokenizationError,
    UpstreamReason,
};
use tracing::{debug, error};

/// File name browsers give to anonymous blobs.
const BLOB_FILE_NAME: &str = "blob";

fn upload_failed(status: Option<u16>, reason: UpstreamReason) -> TokenizationError {
    error!("Ticket upload failed (status {:?}): {:?}", status, reason);
    TokenizationError::UploadFailed { status, reason }
}

async fn image_part(file: TicketFile) -> Result<Part> {
    let part = match file {
        TicketFile::Descriptor(descriptor) => {
            let bytes = tokio::fs::read(descriptor.local_path()).await.map_err(|e| {
                upload_failed(
                    None,
                    UpstreamReason::from_message(format!(
                        "Failed to read {}: {}",
                        descriptor.uri, e
                    )),
                )
            })?;
            Part::bytes(bytes)
                .file_name(descriptor.name)
                .mime_str(&descriptor.mime_type)
        }
        TicketFile::Blob(bytes) => Part::bytes(bytes)
            .file_name(BLOB_FILE_NAME)
            .mime_str("application/octet-stream"),
    };

    part.map_err(|e| upload_failed(None, UpstreamReason::from_message(e)))
}

/// Client for the ticket-processing backend.
pub struct TicketClient {
    upload_url: String,
    http_client: Client,
}

impl TicketClient {
    /// Creates a client for the backend configured in `config`.
    pub fn new(config: &EnvVars) -> Result<Self> {
        Self::with_http_client(config, Client::new())
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_http_client(config: &EnvVars, http_client: Client) -> Result<Self> {
        if config.back_end_url.is_empty() {
            return Err(TokenizationError::Config(
                "BACK_END_URL is not set".to_string(),
            ));
        }

        Ok(Self {
            upload_url: config.ticket_upload_url(),
            http_client,
        })
    }

    /// Uploads a ticket image for the given aid category and returns what the backend extracted.
    pub async fn process_ticket_image(
        &self,
        aid: BenefitCode,
        file: TicketFile,
        authorization: &str,
    ) -> Result<TicketProcessingResult> {
        let form = Form::new()
            .text("aid_id", aid.code().to_string())
            .part("images", image_part(file).await?);

        debug!("Uploading ticket for aid {} to {}", aid, self.upload_url);

        let response = self
            .http_client
            .post(&self.upload_url)
            .header(AUTHORIZATION, authorization)
            .multipart(form)
            .send()
            .await
            .map_err(|e| upload_failed(None, UpstreamReason::from_message(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<failed to read body: {}>", e),
            };
            return Err(upload_failed(
                Some(status.as_u16()),
                UpstreamReason::from_message(format!(
                    "unexpected status {}: {}",
                    status.as_u16(),
                    body
                )),
            ));
        }

        response
            .json::<TicketProcessingResult>()
            .await
            .map_err(|e| upload_failed(Some(status.as_u16()), UpstreamReason::from_message(e)))
    }
}

/// Uploads a ticket image using the backend configured in `config`.
pub async fn process_ticket_image(
    config: &EnvVars,
    aid: BenefitCode,
    file: TicketFile,
    authorization: &str,
) -> Result<TicketProcessingResult> {
    let client = TicketClient::new(config).map_err(|e| upload_failed(None, e.into()))?;
    client.process_ticket_image(aid, file, authorization).await
}
