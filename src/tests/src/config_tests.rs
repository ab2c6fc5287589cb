//! Tests for the process-wide configuration.

use serial_test::serial;
use tempfile::tempdir;
use tokenization_core::{
    env_vars, init_env_vars, BenefitCode, EnvVars, EnvVarsPatch, TicketFile, TokenizationError,
};

/// The process configuration merges partial updates, last writer wins per key.
#[test]
#[serial]
fn test_init_env_vars_merges() {
    init_env_vars(EnvVarsPatch {
        back_end_url: Some("https://backend.example.org".to_string()),
        blockchain_rpc_url: Some("http://localhost:8545".to_string()),
        smart_contract_address: Some("0x0123456789012345678901234567890123456789".to_string()),
        gas_limit: None,
    });
    init_env_vars(EnvVarsPatch {
        blockchain_rpc_url: Some("http://localhost:9545".to_string()),
        ..Default::default()
    });

    let vars = env_vars();
    assert_eq!(vars.back_end_url, "https://backend.example.org");
    assert_eq!(vars.blockchain_rpc_url, "http://localhost:9545");
    assert_eq!(
        vars.smart_contract_address,
        "0x0123456789012345678901234567890123456789"
    );
}

/// Invalid values are accepted at set time and only fail when used.
#[tokio::test]
#[serial]
async fn test_invalid_configuration_fails_lazily() {
    init_env_vars(EnvVarsPatch {
        back_end_url: Some(String::new()),
        blockchain_rpc_url: Some("not a url".to_string()),
        smart_contract_address: Some("0x0123456789012345678901234567890123456789".to_string()),
        gas_limit: None,
    });

    let config = env_vars();
    let err = tokenization_chain::get_token_balance(
        &config,
        "0x0123456789012345678901234567890123456789",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TokenizationError::Config(_)));

    let err = tokenization_services::process_ticket_image(
        &config,
        BenefitCode::Grocery,
        TicketFile::Blob(vec![1]),
        "Token test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TokenizationError::UploadFailed { status: None, .. }));
    assert!(err.to_string().starts_with("sendTicket Error: "));
}

/// A configuration saved by the CLI loads back with the same values.
#[test]
#[serial]
fn test_cli_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let saved = EnvVars {
        back_end_url: "https://backend.example.org".to_string(),
        blockchain_rpc_url: "http://localhost:8545".to_string(),
        smart_contract_address: "0x0123456789012345678901234567890123456789".to_string(),
        gas_limit: 300_000,
    };
    saved.to_file(&path).unwrap();

    let loaded = tokenization_cli::load(Some(&path), EnvVarsPatch::default()).unwrap();
    assert_eq!(loaded.gas_limit, 300_000);
    assert_eq!(loaded.smart_contract_address, saved.smart_contract_address);
}
