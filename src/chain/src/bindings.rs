/// Contract bindings for the benefits token.
use ethers::{
    abi::{Abi, AbiError},
    contract::{Contract, ContractCall},
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use lazy_static::lazy_static;
use std::sync::Arc;

lazy_static! {
    static ref IZ_TOKEN_ABI: Abi = serde_json::from_str(include_str!("../contracts/IzToken.abi"))
        .expect("Invalid IzToken ABI");
}

/// The IzToken contract interface
pub struct TokenContract<M: Middleware> {
    contract: Contract<M>,
}

impl<M: Middleware> TokenContract<M> {
    /// Creates a new instance of the contract
    pub fn new(address: Address, client: impl Into<Arc<M>>) -> Self {
        let contract = Contract::new(address, IZ_TOKEN_ABI.clone(), client.into());
        Self { contract }
    }

    /// Address the binding points to
    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Gets the token balance of an account
    pub fn balance_of(&self, account: Address) -> Result<ContractCall<M, U256>, AbiError> {
        self.contract.method("balanceOf", (account,))
    }

    /// Gets the role a party holds at the given timestamp
    pub fn party_permission(
        &self,
        party: Address,
        timestamp: U256,
    ) -> Result<ContractCall<M, u8>, AbiError> {
        self.contract.method("partyPermission", (party, timestamp))
    }

    /// Gets the metadata attached to a party
    pub fn get_attached_data(&self, party: Address) -> Result<ContractCall<M, Bytes>, AbiError> {
        self.contract.method("getAttachedData", (party,))
    }

    /// Transfers tokens from the signer, recording `data` with the transfer
    pub fn transfer_with_data(
        &self,
        to: Address,
        amount: U256,
        data: Bytes,
    ) -> Result<ContractCall<M, ()>, AbiError> {
        self.contract.method("transferWithData", (to, amount, data))
    }

    /// Burns tokens held by `from`
    pub fn redeem_from(
        &self,
        from: Address,
        amount: U256,
        data: Bytes,
    ) -> Result<ContractCall<M, ()>, AbiError> {
        self.contract.method("redeemFrom", (from, amount, data))
    }
}
