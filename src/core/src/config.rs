//! Run-time configuration of the tokenization client.
//!
//! Every network-facing call takes an [`EnvVars`] value. A process-wide
//! instance is also kept for callers that prefer to configure once at start
//! up: call [`init_env_vars`] before any other call, then read it back with
//! [`env_vars`]. Concurrent initialization is last-writer-wins per key.

use crate::errors::{Result, TokenizationError};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

/// Gas limit used for write transactions when none is configured.
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;

/// Environment variable holding the backend base URL.
pub const BACK_END_URL_VAR: &str = "BACK_END_URL";
/// Environment variable holding the chain RPC URL.
pub const BLOCKCHAIN_RPC_URL_VAR: &str = "BLOCKCHAIN_RPC_URL";
/// Environment variable holding the token contract address.
pub const SMART_CONTRACT_ADDRESS_VAR: &str = "SMART_CONTRACT_ADDRESS";
/// Environment variable holding the gas limit for writes.
pub const GAS_LIMIT_VAR: &str = "GAS_LIMIT";

/// Configuration read by every network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVars {
    /// Base URL of the ticket-processing backend
    pub back_end_url: String,
    /// JSON-RPC endpoint of the chain
    pub blockchain_rpc_url: String,
    /// Address of the token contract
    pub smart_contract_address: String,
    /// Gas limit for write transactions
    pub gas_limit: u64,
}

impl Default for EnvVars {
    fn default() -> Self {
        Self {
            back_end_url: String::new(),
            blockchain_rpc_url: String::new(),
            smart_contract_address: String::new(),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}

/// A partial update of [`EnvVars`]. Unset fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVarsPatch {
    /// Base URL of the ticket-processing backend
    pub back_end_url: Option<String>,
    /// JSON-RPC endpoint of the chain
    pub blockchain_rpc_url: Option<String>,
    /// Address of the token contract
    pub smart_contract_address: Option<String>,
    /// Gas limit for write transactions
    pub gas_limit: Option<u64>,
}

impl EnvVarsPatch {
    /// Reads the patch from the process environment.
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| std::env::var(key).ok();

        let gas_limit = match var(GAS_LIMIT_VAR) {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|e| {
                TokenizationError::Config(format!("{} is not a number: {}", GAS_LIMIT_VAR, e))
            })?),
            None => None,
        };

        Ok(Self {
            back_end_url: var(BACK_END_URL_VAR),
            blockchain_rpc_url: var(BLOCKCHAIN_RPC_URL_VAR),
            smart_contract_address: var(SMART_CONTRACT_ADDRESS_VAR),
            gas_limit,
        })
    }
}

impl EnvVars {
    /// Applies a patch, overwriting only the fields it sets.
    pub fn merge(&mut self, patch: EnvVarsPatch) {
        if let Some(url) = patch.back_end_url {
            self.back_end_url = url;
        }
        if let Some(url) = patch.blockchain_rpc_url {
            self.blockchain_rpc_url = url;
        }
        if let Some(address) = patch.smart_contract_address {
            self.smart_contract_address = address;
        }
        if let Some(gas_limit) = patch.gas_limit {
            self.gas_limit = gas_limit;
        }
    }

    /// Returns a copy with the patch applied.
    pub fn merged(mut self, patch: EnvVarsPatch) -> Self {
        self.merge(patch);
        self
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::default().merged(EnvVarsPatch::from_env()?))
    }

    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            TokenizationError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            TokenizationError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TokenizationError::Config(e.to_string()))?;
        fs::write(path, contents).map_err(|e| {
            TokenizationError::Config(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Returns the ticket upload endpoint.
    pub fn ticket_upload_url(&self) -> String {
        format!(
            "{}/ticket_processing/upload/",
            self.back_end_url.trim_end_matches('/')
        )
    }
}

lazy_static! {
    static ref ENV_VARS: RwLock<EnvVars> = RwLock::new(EnvVars::default());
}

/// Merges `patch` into the process-wide configuration.
pub fn init_env_vars(patch: EnvVarsPatch) {
    debug!("Updating process configuration: {:?}", patch);
    let mut vars = ENV_VARS.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    vars.merge(patch);
}

/// Returns a snapshot of the process-wide configuration.
pub fn env_vars() -> EnvVars {
    ENV_VARS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}
