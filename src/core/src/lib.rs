//! Core of the benefits token client.
//!
//! Offline pieces shared by the chain and backend crates: QR payload
//! encoding, ticket image sources, the data model, errors and configuration.

pub mod config;
pub mod errors;
pub mod files;
pub mod qr;
pub mod types;

pub use config::{env_vars, init_env_vars, EnvVars, EnvVarsPatch};
pub use errors::{Result, TokenizationError, UpstreamReason};
pub use files::{is_platform_file_descriptor, FileDescriptor, TicketFile};
pub use types::{
    AidProduct, BenefitCode, CitizenPayload, MerchantPayload, QrPayload, RoleCode,
    TicketProcessingResult,
};
