//! Error types shared by every crate of the tokenization client.

use std::fmt;
use thiserror::Error;

/// Fallback text used when an upstream failure carries no usable message.
pub const UNKNOWN_REASON: &str = "Unknown error";

/// The reason an upstream collaborator (chain RPC, HTTP backend) gave for a failure.
///
/// Each field is optional because upstream errors come in many shapes. The
/// most specific one wins when the reason is rendered: a decoded revert reason,
/// then the message nested in the error's `data`, then the top-level message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamReason {
    /// Revert reason decoded from the chain
    pub revert_reason: Option<String>,
    /// Message nested inside the error payload
    pub data_message: Option<String>,
    /// Generic error message
    pub message: Option<String>,
}

impl UpstreamReason {
    /// Creates a reason that only carries a generic message.
    pub fn from_message(message: impl fmt::Display) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Returns the most specific reason available.
    pub fn render(&self) -> &str {
        [&self.revert_reason, &self.data_message, &self.message]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .find(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_REASON)
    }
}

impl fmt::Display for UpstreamReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

/// Errors that can occur in the tokenization client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizationError {
    /// The QR string does not start with a known role prefix.
    #[error("Lib error: Invalid QR prefix")]
    InvalidPrefix,

    /// The QR payload could not be parsed.
    #[error("Lib error: Invalid QR data format")]
    InvalidFormat,

    /// The merchant QR payload lacks a required field.
    #[error("Lib error: Missing fields in QR data")]
    MissingFields,

    /// A write transaction was rejected, reverted or could not be submitted.
    #[error("{operation} Error: {reason}")]
    TransactionFailed {
        /// Label of the operation, e.g. "Send Tokens"
        operation: &'static str,
        /// Upstream reason
        reason: UpstreamReason,
    },

    /// A read-only contract call failed.
    #[error("{method} query failed: {reason}")]
    QueryFailed {
        /// Contract method that was called
        method: &'static str,
        /// Upstream reason
        reason: UpstreamReason,
    },

    /// The ticket upload failed, either in transport or with a non-success status.
    #[error("sendTicket Error: {reason}")]
    UploadFailed {
        /// HTTP status, when the backend answered
        status: Option<u16>,
        /// Upstream reason
        reason: UpstreamReason,
    },

    /// Error when an address is invalid.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when a private key is invalid.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Error when an amount is invalid.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when the configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TokenizationError {
    /// Returns the upstream reason carried by the error, if any.
    pub fn upstream_reason(&self) -> Option<&UpstreamReason> {
        match self {
            TokenizationError::TransactionFailed { reason, .. }
            | TokenizationError::QueryFailed { reason, .. }
            | TokenizationError::UploadFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<TokenizationError> for UpstreamReason {
    fn from(error: TokenizationError) -> Self {
        match error.upstream_reason() {
            Some(reason) => reason.clone(),
            None => UpstreamReason::from_message(&error),
        }
    }
}

/// Result type used across the tokenization crates.
pub type Result<T> = std::result::Result<T, TokenizationError>;
