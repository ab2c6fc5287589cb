//! Extraction of upstream reasons from ethers errors.

use ethers::{
    abi::{self, ParamType, Token},
    contract::ContractError,
    providers::{JsonRpcError, Middleware, MiddlewareError},
};
use tokenization_core::{TokenizationError, UpstreamReason};
use tracing::error;

/// Selector of the standard `Error(string)` revert payload.
const REVERT_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Decodes the message of an `Error(string)` revert payload.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if data.len() < 4 || data[..4] != REVERT_SELECTOR {
        return None;
    }

    match abi::decode(&[ParamType::String], &data[4..]).ok()?.pop()? {
        Token::String(reason) => Some(reason),
        _ => None,
    }
}

/// Builds a reason from a JSON-RPC error response.
pub fn reason_from_json_rpc(response: &JsonRpcError) -> UpstreamReason {
    let revert_reason = response
        .as_revert_data()
        .and_then(|data| decode_revert_reason(&data));
    let data_message = response
        .data
        .as_ref()
        .and_then(|data| data.get("message"))
        .and_then(|message| message.as_str())
        .map(str::to_string);

    UpstreamReason {
        revert_reason,
        data_message,
        message: Some(response.message.clone()),
    }
}

/// Builds a reason from a middleware (or provider) error.
pub fn reason_from_middleware_error<E: MiddlewareError>(e: &E) -> UpstreamReason {
    match e.as_error_response() {
        Some(response) => reason_from_json_rpc(response),
        None => UpstreamReason::from_message(e),
    }
}

/// Builds a reason from a contract call error.
pub fn reason_from_contract_error<M: Middleware>(e: &ContractError<M>) -> UpstreamReason {
    match e {
        ContractError::Revert(data) => UpstreamReason {
            revert_reason: decode_revert_reason(data),
            message: Some(format!("execution reverted: 0x{}", hex::encode(data))),
            ..Default::default()
        },
        ContractError::MiddlewareError { e } => reason_from_middleware_error(e),
        ContractError::ProviderError { e } => reason_from_middleware_error(e),
        other => UpstreamReason::from_message(other),
    }
}

/// Wraps the failure of a read-only call.
pub fn query_failed(method: &'static str, reason: UpstreamReason) -> TokenizationError {
    TokenizationError::QueryFailed { method, reason }
}

/// Wraps the failure of a write operation, logging the reason.
pub fn transaction_failed(operation: &'static str, reason: UpstreamReason) -> TokenizationError {
    error!("{} failed: {:?}", operation, reason);
    TokenizationError::TransactionFailed { operation, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::{Http, Provider, ProviderError};
    use serde_json::json;

    fn revert_payload(reason: &str) -> Vec<u8> {
        let mut data = REVERT_SELECTOR.to_vec();
        data.extend(abi::encode(&[Token::String(reason.to_string())]));
        data
    }

    #[test]
    fn test_decode_revert_reason() {
        let data = revert_payload("Not enough balance");
        assert_eq!(
            decode_revert_reason(&data),
            Some("Not enough balance".to_string())
        );
        assert_eq!(decode_revert_reason(&[0x01, 0x02]), None);
        assert_eq!(decode_revert_reason(&[0xde, 0xad, 0xbe, 0xef, 0x00]), None);
    }

    #[test]
    fn test_reason_from_json_rpc_nested_message() {
        let response = JsonRpcError {
            code: -32000,
            message: "execution failed".to_string(),
            data: Some(json!({ "message": "sender is not a citizen" })),
        };
        let reason = reason_from_json_rpc(&response);
        assert_eq!(reason.render(), "sender is not a citizen");
        assert_eq!(reason.message.as_deref(), Some("execution failed"));
    }

    #[test]
    fn test_reason_from_json_rpc_plain_message() {
        let response = JsonRpcError {
            code: -32000,
            message: "Boom".to_string(),
            data: None,
        };
        assert_eq!(reason_from_json_rpc(&response).render(), "Boom");
    }

    #[test]
    fn test_reason_from_revert_error() {
        let data = revert_payload("Transfer not allowed");
        let err: ContractError<Provider<Http>> = ContractError::Revert(data.into());
        assert_eq!(
            reason_from_contract_error(&err).render(),
            "Transfer not allowed"
        );
    }

    #[test]
    fn test_reason_from_provider_error_without_response() {
        let err = ProviderError::CustomError("connection refused".to_string());
        let reason = reason_from_middleware_error(&err);
        assert!(reason.render().contains("connection refused"));
    }

    #[test]
    fn test_transaction_failed_label() {
        let err = transaction_failed("Burn Tokens", UpstreamReason::from_message("Boom"));
        assert_eq!(err.to_string(), "Burn Tokens Error: Boom");
    }
}
