//! Token operations against the benefits token contract.
//!
//! Reads surface a `QueryFailed` error. Writes never leak a raw ethers error:
//! every failure, from connecting to waiting for the receipt, is normalized
//! into `"<Operation> Error: <reason>"`.

use crate::accessor::{self, ReadClient, SignerClient};
use crate::bindings::TokenContract;
use crate::errors::{query_failed, reason_from_contract_error, reason_from_middleware_error, transaction_failed};
use ethers::{
    contract::ContractCall,
    providers::Middleware,
    types::{Address, Bytes, TransactionReceipt, H256, U256, U64},
    utils::format_units,
};
use std::sync::Arc;
use tokenization_core::{
    config::DEFAULT_GAS_LIMIT, BenefitCode, EnvVars, Result, RoleCode, TokenizationError,
    UpstreamReason,
};
use tracing::{debug, info};

/// Decimals of the benefits token.
pub const TOKEN_DECIMALS: u32 = 18;

/// Label of transfer failures.
pub const SEND_TOKENS_OPERATION: &str = "Send Tokens";

/// Label of burn failures.
pub const BURN_TOKENS_OPERATION: &str = "Burn Tokens";

/// A confirmed write transaction.
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    /// Hash of the transaction
    pub tx_hash: H256,
    /// Inclusion receipt
    pub receipt: TransactionReceipt,
}

/// Formats a raw token amount the way wallets display it, e.g. `1.0` or `0.25`.
pub fn format_token_amount(value: U256) -> Result<String> {
    let formatted = format_units(value, TOKEN_DECIMALS)
        .map_err(|e| TokenizationError::InvalidAmount(e.to_string()))?;

    Ok(match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => format!("{}.0", formatted),
    })
}

/// Scales a decimal token amount up to its raw on-chain value.
///
/// At most `TOKEN_DECIMALS` fractional digits are accepted and the scaled
/// value must fit in a `U256`.
pub fn parse_token_amount(amount: &str) -> Result<U256> {
    let amount = amount.trim();
    let invalid = |why: &str| TokenizationError::InvalidAmount(format!("{}: {}", amount, why));

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty amount"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("not a decimal number"));
    }
    if fraction.len() > TOKEN_DECIMALS as usize {
        return Err(invalid("fractional component exceeds decimals"));
    }

    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| invalid("amount too large"))?
    };
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = TOKEN_DECIMALS as usize);
        U256::from_dec_str(&padded).map_err(|_| invalid("not a decimal number"))?
    };

    whole
        .checked_mul(U256::exp10(TOKEN_DECIMALS as usize))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| invalid("amount too large"))
}

/// Encodes the optional note attached to a transfer or burn.
///
/// An absent or empty note is sent as a single zero byte.
pub fn encode_event_data(note: Option<&str>) -> Bytes {
    match note {
        Some(note) if !note.is_empty() => Bytes::from(note.as_bytes().to_vec()),
        _ => Bytes::from(vec![0u8]),
    }
}

/// Fails when a receipt reports a reverted transaction.
pub fn check_receipt(receipt: &TransactionReceipt) -> std::result::Result<(), UpstreamReason> {
    if receipt.status == Some(U64::zero()) {
        return Err(UpstreamReason::from_message(format!(
            "transaction {:?} reverted",
            receipt.transaction_hash
        )));
    }
    Ok(())
}

/// Token operations bound to one contract and one client.
pub struct TokenOperations<M: Middleware> {
    contract: TokenContract<M>,
    client: Arc<M>,
    gas_limit: u64,
}

impl<M: Middleware + 'static> TokenOperations<M> {
    /// Binds the operations to the contract at `contract_address`.
    pub fn new(contract_address: Address, client: Arc<M>) -> Self {
        Self {
            contract: TokenContract::new(contract_address, client.clone()),
            client,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    /// Sets the gas limit used by write transactions.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Returns the token balance of `address`, formatted with 18 decimals.
    pub async fn get_token_balance(&self, address: Address) -> Result<String> {
        debug!("Fetching balance of {:?}", address);
        let balance = self
            .contract
            .balance_of(address)
            .map_err(|e| query_failed("balanceOf", UpstreamReason::from_message(e)))?
            .call()
            .await
            .map_err(|e| query_failed("balanceOf", reason_from_contract_error(&e)))?;

        format_token_amount(balance)
    }

    /// Returns the role `address` holds at the latest block.
    pub async fn get_party_permission(&self, address: Address) -> Result<RoleCode> {
        let timestamp = accessor::latest_block_timestamp(self.client.as_ref()).await?;
        debug!("Fetching role of {:?} at {}", address, timestamp);

        let role = self
            .contract
            .party_permission(address, timestamp)
            .map_err(|e| query_failed("partyPermission", UpstreamReason::from_message(e)))?
            .call()
            .await
            .map_err(|e| query_failed("partyPermission", reason_from_contract_error(&e)))?;

        Ok(RoleCode::from_code(role.into()))
    }

    async fn attached_data(&self, address: Address) -> Result<Bytes> {
        debug!("Fetching attached data of {:?}", address);
        self.contract
            .get_attached_data(address)
            .map_err(|e| query_failed("getAttachedData", UpstreamReason::from_message(e)))?
            .call()
            .await
            .map_err(|e| query_failed("getAttachedData", reason_from_contract_error(&e)))
    }

    /// Returns the benefit category attached to a citizen.
    pub async fn get_citizen_benefit(&self, address: Address) -> Result<BenefitCode> {
        let data = self.attached_data(address).await?;
        Ok(BenefitCode::from_attached_data(&data))
    }

    /// Returns the name attached to a merchant.
    pub async fn get_merchant_name(&self, address: Address) -> Result<String> {
        let data = self.attached_data(address).await?;
        String::from_utf8(data.to_vec()).map_err(|e| {
            query_failed(
                "getAttachedData",
                UpstreamReason::from_message(format!("merchant name is not UTF-8: {}", e)),
            )
        })
    }

    /// Sends `amount` tokens from the signer to `to`, waiting for inclusion.
    pub async fn send_tokens(
        &self,
        to: Address,
        amount: &str,
        note: Option<&str>,
    ) -> Result<TransactionOutcome> {
        self.transfer(to, amount, note)
            .await
            .map_err(|reason| transaction_failed(SEND_TOKENS_OPERATION, reason))
    }

    /// Burns `amount` tokens held by the signer, waiting for inclusion.
    pub async fn burn_tokens(&self, amount: &str, note: Option<&str>) -> Result<TransactionOutcome> {
        self.redeem(amount, note)
            .await
            .map_err(|reason| transaction_failed(BURN_TOKENS_OPERATION, reason))
    }

    async fn transfer(
        &self,
        to: Address,
        amount: &str,
        note: Option<&str>,
    ) -> std::result::Result<TransactionOutcome, UpstreamReason> {
        let amount = parse_token_amount(amount)?;
        info!("Sending {} raw tokens to {:?}", amount, to);

        let call = self
            .contract
            .transfer_with_data(to, amount, encode_event_data(note))
            .map_err(UpstreamReason::from_message)?;
        self.submit(call).await
    }

    async fn redeem(
        &self,
        amount: &str,
        note: Option<&str>,
    ) -> std::result::Result<TransactionOutcome, UpstreamReason> {
        let amount = parse_token_amount(amount)?;
        let from = self
            .client
            .default_sender()
            .ok_or_else(|| UpstreamReason::from_message("client has no signer address"))?;
        info!("Burning {} raw tokens from {:?}", amount, from);

        let call = self
            .contract
            .redeem_from(from, amount, encode_event_data(note))
            .map_err(UpstreamReason::from_message)?;
        self.submit(call).await
    }

    async fn submit(
        &self,
        call: ContractCall<M, ()>,
    ) -> std::result::Result<TransactionOutcome, UpstreamReason> {
        let call = call.gas(self.gas_limit);
        let pending = call
            .send()
            .await
            .map_err(|e| reason_from_contract_error(&e))?;

        let tx_hash = pending.tx_hash();
        debug!("Transaction {:?} submitted, waiting for receipt", tx_hash);

        let receipt = pending
            .await
            .map_err(|e| reason_from_middleware_error(&e))?
            .ok_or_else(|| {
                UpstreamReason::from_message(format!(
                    "transaction {:?} dropped from mempool",
                    tx_hash
                ))
            })?;
        check_receipt(&receipt)?;

        info!("Transaction {:?} confirmed", tx_hash);
        Ok(TransactionOutcome { tx_hash, receipt })
    }
}

impl TokenOperations<ReadClient> {
    /// Opens a read-only connection using `config`.
    pub fn connect(config: &EnvVars) -> Result<Self> {
        let client = Arc::new(accessor::provider(config)?);
        Ok(Self::new(accessor::contract_address(config)?, client).with_gas_limit(config.gas_limit))
    }
}

impl TokenOperations<SignerClient> {
    /// Opens a signing connection using `config` and a hex private key.
    pub async fn connect_with_signer(config: &EnvVars, private_key: &str) -> Result<Self> {
        let contract_address = accessor::contract_address(config)?;
        let client = Arc::new(accessor::signer(config, private_key).await?);
        Ok(Self::new(contract_address, client).with_gas_limit(config.gas_limit))
    }
}

/// Returns the formatted token balance of `address`.
pub async fn get_token_balance(config: &EnvVars, address: &str) -> Result<String> {
    let address = accessor::parse_address(address)?;
    TokenOperations::connect(config)?
        .get_token_balance(address)
        .await
}

/// Returns the role of `address`.
pub async fn get_party_permission(config: &EnvVars, address: &str) -> Result<RoleCode> {
    let address = accessor::parse_address(address)?;
    TokenOperations::connect(config)?
        .get_party_permission(address)
        .await
}

/// Returns the benefit category of a citizen.
pub async fn get_citizen_benefit(config: &EnvVars, address: &str) -> Result<BenefitCode> {
    let address = accessor::parse_address(address)?;
    TokenOperations::connect(config)?
        .get_citizen_benefit(address)
        .await
}

/// Returns the name of a merchant.
pub async fn get_merchant_name(config: &EnvVars, address: &str) -> Result<String> {
    let address = accessor::parse_address(address)?;
    TokenOperations::connect(config)?
        .get_merchant_name(address)
        .await
}

/// Sends tokens signed with `private_key`.
pub async fn send_tokens(
    config: &EnvVars,
    private_key: &str,
    to: &str,
    amount: &str,
    note: Option<&str>,
) -> Result<TransactionOutcome> {
    let operations = TokenOperations::connect_with_signer(config, private_key)
        .await
        .map_err(|e| transaction_failed(SEND_TOKENS_OPERATION, e.into()))?;
    let to = accessor::parse_address(to)
        .map_err(|e| transaction_failed(SEND_TOKENS_OPERATION, e.into()))?;

    operations.send_tokens(to, amount, note).await
}

/// Burns tokens signed with `private_key`.
pub async fn burn_tokens(
    config: &EnvVars,
    private_key: &str,
    amount: &str,
    note: Option<&str>,
) -> Result<TransactionOutcome> {
    let operations = TokenOperations::connect_with_signer(config, private_key)
        .await
        .map_err(|e| transaction_failed(BURN_TOKENS_OPERATION, e.into()))?;

    operations.burn_tokens(amount, note).await
}
