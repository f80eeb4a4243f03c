//! Typed action outputs.

use serde::{Deserialize, Serialize};
use shared_types::Address;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub sender_balance: u64,
    pub receiver_balance: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiResult {
    pub greeting: Vec<u8>,
    pub balance: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDomainResult {
    pub amount_paid: u64,
}

/// `owner` is the zero address when the domain is unclaimed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisResult {
    pub found: bool,
    pub owner: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenResult {
    pub address: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTokenAddressResult {
    pub address: Address,
    /// Whether a token is registered at `address`.
    pub registered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLiquidityPoolResult {
    pub pool_address: Address,
    pub pool_token_address: Address,
}

/// Output of any action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutput {
    Transfer(TransferResult),
    Hi(HiResult),
    ClaimDomain(ClaimDomainResult),
    Whois(WhoisResult),
    CreateToken(CreateTokenResult),
    GetTokenAddress(GetTokenAddressResult),
    CreateLiquidityPool(CreateLiquidityPoolResult),
}

macro_rules! impl_from_result {
    ($($variant:ident => $result:ty),* $(,)?) => {
        $(
            impl From<$result> for ActionOutput {
                fn from(result: $result) -> Self {
                    ActionOutput::$variant(result)
                }
            }
        )*
    };
}

impl_from_result! {
    Transfer => TransferResult,
    Hi => HiResult,
    ClaimDomain => ClaimDomainResult,
    Whois => WhoisResult,
    CreateToken => CreateTokenResult,
    GetTokenAddress => GetTokenAddressResult,
    CreateLiquidityPool => CreateLiquidityPoolResult,
}
