//! Configuration resolution for the CLI.
//!
//! Sources are applied in order, later ones winning per key: the JSON config
//! file, the process environment (including `.env`), then command line flags.

use std::path::{Path, PathBuf};
use tokenization_core::{EnvVars, EnvVarsPatch, Result};

/// Environment variable holding the signing key.
pub const PRIVATE_KEY_VAR: &str = "TOKENIZATION_PRIVATE_KEY";

/// Environment variable holding the backend authorization token.
pub const AUTHORIZATION_VAR: &str = "TOKENIZATION_AUTHORIZATION";

/// Returns the config file used when none is given.
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tokenization");
    path.push("config.json");
    path
}

/// Resolves the configuration from file, environment and flag overrides.
pub fn load(path: Option<&Path>, overrides: EnvVarsPatch) -> Result<EnvVars> {
    let mut config = match path {
        Some(path) => EnvVars::from_file(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                EnvVars::from_file(path)?
            } else {
                EnvVars::default()
            }
        }
    };

    config.merge(EnvVarsPatch::from_env()?);
    config.merge(overrides);
    Ok(config)
}

/// Returns the flag value, or the named environment variable when the flag is absent.
pub fn secret(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(var).ok())
        .filter(|value| !value.trim().is_empty())
}
