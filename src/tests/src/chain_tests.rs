//! Tests for the chain crate.

use ethers::{
    abi::{self, Token},
    providers::{MockProvider, Provider},
    types::{Address, Block, Bytes, TxHash, U256},
};
use serial_test::serial;
use std::sync::Arc;
use tokenization_chain::TokenOperations;
use tokenization_core::{BenefitCode, EnvVars, RoleCode, TokenizationError};
use tokio::runtime::Runtime;

const LOCAL_CONTRACT: &str = "0x0123456789012345678901234567890123456789";
const CITIZEN: &str = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";

fn local_config() -> EnvVars {
    EnvVars {
        blockchain_rpc_url: "http://localhost:8545".to_string(),
        smart_contract_address: LOCAL_CONTRACT.to_string(),
        ..Default::default()
    }
}

fn push_return(mock: &MockProvider, token: Token) {
    mock.push::<Bytes, _>(Bytes::from(abi::encode(&[token])))
        .unwrap();
}

/// A wallet screen loads balance, role and benefit in sequence over one connection.
#[tokio::test]
async fn test_citizen_wallet_screen() {
    let (provider, mock) = Provider::mocked();
    let operations = TokenOperations::new(LOCAL_CONTRACT.parse().unwrap(), Arc::new(provider));
    let citizen: Address = CITIZEN.parse().unwrap();

    // Responses are served last in, first out
    push_return(&mock, Token::Bytes(vec![0x01]));
    push_return(&mock, Token::Uint(U256::from(1u8)));
    // The role lookup reads the latest block first
    mock.push::<Block<TxHash>, _>(Block::<TxHash>::default())
        .unwrap();
    push_return(&mock, Token::Uint(U256::from(12u64) * U256::exp10(17)));

    assert_eq!(operations.get_token_balance(citizen).await.unwrap(), "1.2");
    assert_eq!(
        operations.get_party_permission(citizen).await.unwrap(),
        RoleCode::Citizen
    );
    assert_eq!(
        operations.get_citizen_benefit(citizen).await.unwrap(),
        BenefitCode::Stationery
    );
}

/// Writes with a malformed key fail with the operation prefix before touching the network.
#[tokio::test]
async fn test_write_with_invalid_key() {
    let err = tokenization_chain::send_tokens(&local_config(), "not-a-key", CITIZEN, "1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, TokenizationError::TransactionFailed { .. }));
    assert!(err.to_string().starts_with("Send Tokens Error: "));

    let err = tokenization_chain::burn_tokens(&local_config(), "not-a-key", "1", None)
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Burn Tokens Error: "));
}

/// Reads the balance from a deployed contract.
#[test]
#[serial]
#[ignore] // Requires a local Ethereum node with the token deployed
fn test_local_node_balance() {
    let rt = Runtime::new().unwrap();

    rt.block_on(async {
        let balance = tokenization_chain::get_token_balance(&local_config(), CITIZEN).await;
        assert!(balance.is_ok());
    });
}

/// Sends tokens on a deployed contract and waits for the receipt.
#[test]
#[serial]
#[ignore] // Requires a local Ethereum node with the token deployed
fn test_local_node_send_tokens() {
    let rt = Runtime::new().unwrap();

    // Default first development account
    let private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    rt.block_on(async {
        let outcome = tokenization_chain::send_tokens(
            &local_config(),
            private_key,
            CITIZEN,
            "0.5",
            Some("integration"),
        )
        .await
        .unwrap();
        assert_eq!(outcome.receipt.transaction_hash, outcome.tx_hash);
    });
}
