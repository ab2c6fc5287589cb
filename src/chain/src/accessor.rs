//! Connections to the configured token contract.
//!
//! Nothing is cached: each call resolves the configuration it is given and
//! opens a fresh connection.

use crate::bindings::TokenContract;
use crate::errors::{query_failed, reason_from_middleware_error};
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, BlockNumber, U256},
};
use std::str::FromStr;
use std::sync::Arc;
use tokenization_core::{EnvVars, Result, TokenizationError, UpstreamReason};
use tracing::debug;

/// Read-only connection to the chain.
pub type ReadClient = Provider<Http>;

/// Connection that signs transactions with a local private key.
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Parses a hex address.
pub fn parse_address(address: &str) -> Result<Address> {
    Address::from_str(address.trim())
        .map_err(|e| TokenizationError::InvalidAddress(format!("{}: {}", address, e)))
}

/// Returns the configured token contract address.
pub fn contract_address(config: &EnvVars) -> Result<Address> {
    if config.smart_contract_address.is_empty() {
        return Err(TokenizationError::Config(
            "SMART_CONTRACT_ADDRESS is not set".to_string(),
        ));
    }
    parse_address(&config.smart_contract_address)
}

/// Creates a read-only provider for the configured RPC endpoint.
pub fn provider(config: &EnvVars) -> Result<ReadClient> {
    if config.blockchain_rpc_url.is_empty() {
        return Err(TokenizationError::Config(
            "BLOCKCHAIN_RPC_URL is not set".to_string(),
        ));
    }

    Provider::<Http>::try_from(config.blockchain_rpc_url.as_str()).map_err(|e| {
        TokenizationError::Config(format!(
            "Invalid RPC URL {}: {}",
            config.blockchain_rpc_url, e
        ))
    })
}

/// Parses a hex private key into a wallet.
pub fn wallet(private_key: &str) -> Result<LocalWallet> {
    private_key
        .trim()
        .parse::<LocalWallet>()
        .map_err(|e| TokenizationError::InvalidKey(e.to_string()))
}

/// Creates a signing client, binding the wallet to the chain id reported by the RPC.
pub async fn signer(config: &EnvVars, private_key: &str) -> Result<SignerClient> {
    let provider = provider(config)?;
    let wallet = wallet(private_key)?;

    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| query_failed("eth_chainId", reason_from_middleware_error(&e)))?;
    debug!("Connected to chain {} as {:?}", chain_id, wallet.address());

    Ok(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id.as_u64()),
    ))
}

/// Binds the configured token contract to `client`.
pub fn contract<M: Middleware>(config: &EnvVars, client: Arc<M>) -> Result<TokenContract<M>> {
    Ok(TokenContract::new(contract_address(config)?, client))
}

/// Returns the timestamp of the latest block.
pub async fn latest_block_timestamp<M: Middleware>(client: &M) -> Result<U256> {
    let block = client
        .get_block(BlockNumber::Latest)
        .await
        .map_err(|e| query_failed("eth_getBlockByNumber", reason_from_middleware_error(&e)))?
        .ok_or_else(|| {
            query_failed(
                "eth_getBlockByNumber",
                UpstreamReason::from_message("latest block not found"),
            )
        })?;

    Ok(block.timestamp)
}
