//! Token contract access for the benefits token client.
//!
//! This crate provides the connection factories, the contract bindings and
//! the token operations (balance, role, attached data, transfer, burn).

pub mod accessor;
pub mod bindings;
pub mod errors;
pub mod tokens;

pub use tokens::{
    burn_tokens, get_citizen_benefit, get_merchant_name, get_party_permission, get_token_balance,
    send_tokens, TokenOperations, TransactionOutcome,
};
