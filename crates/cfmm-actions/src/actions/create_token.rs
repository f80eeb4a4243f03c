use cfmm_state::storage::{set_token_info, token_exists};
use cfmm_state::{
    token_address, token_info_key, AccessMode, MutableState, StateKeys, TokenInfo,
    MAX_TOKEN_DECIMALS, MAX_TOKEN_METADATA_SIZE, MAX_TOKEN_NAME_SIZE, MAX_TOKEN_SYMBOL_SIZE,
};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::{ActionHandler, CREATE_TOKEN_ID};
use crate::config::LedgerParams;
use crate::domain::errors::ActionError;
use crate::domain::results::CreateTokenResult;

/// Bounds shared by user tokens and the native coin.
pub fn validate_token_fields(
    name: &[u8],
    symbol: &[u8],
    metadata: &[u8],
    decimals: u8,
) -> Result<(), ActionError> {
    if name.is_empty() {
        return Err(ActionError::EmptyTokenName);
    }
    if name.len() > MAX_TOKEN_NAME_SIZE {
        return Err(ActionError::TokenNameTooLarge {
            len: name.len(),
            max: MAX_TOKEN_NAME_SIZE,
        });
    }
    if symbol.is_empty() {
        return Err(ActionError::EmptyTokenSymbol);
    }
    if symbol.len() > MAX_TOKEN_SYMBOL_SIZE {
        return Err(ActionError::TokenSymbolTooLarge {
            len: symbol.len(),
            max: MAX_TOKEN_SYMBOL_SIZE,
        });
    }
    if metadata.len() > MAX_TOKEN_METADATA_SIZE {
        return Err(ActionError::TokenMetadataTooLarge {
            len: metadata.len(),
            max: MAX_TOKEN_METADATA_SIZE,
        });
    }
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(ActionError::TooManyDecimals {
            decimals,
            max: MAX_TOKEN_DECIMALS,
        });
    }
    Ok(())
}

/// Register a fungible token owned by the actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateToken {
    pub name: Vec<u8>,
    pub symbol: Vec<u8>,
    pub metadata: Vec<u8>,
    pub decimals: u8,
}

impl CreateToken {
    pub fn new(
        name: impl AsRef<[u8]>,
        symbol: impl AsRef<[u8]>,
        metadata: impl AsRef<[u8]>,
        decimals: u8,
    ) -> Self {
        Self {
            name: name.as_ref().to_vec(),
            symbol: symbol.as_ref().to_vec(),
            metadata: metadata.as_ref().to_vec(),
            decimals,
        }
    }

    pub fn address(&self) -> Address {
        token_address(&self.name, &self.symbol, &self.metadata)
    }
}

impl ActionHandler for CreateToken {
    const TYPE_ID: u8 = CREATE_TOKEN_ID;
    const NAME: &'static str = "create_token";
    const COMPUTE_UNITS: u64 = 1;

    type Output = CreateTokenResult;

    fn state_keys(&self, _actor: &Address) -> StateKeys {
        StateKeys::new().with(token_info_key(&self.address()), AccessMode::Allocate)
    }

    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        actor: &Address,
        _params: &LedgerParams,
    ) -> Result<CreateTokenResult, ActionError> {
        validate_token_fields(&self.name, &self.symbol, &self.metadata, self.decimals)?;

        let address = self.address();
        if token_exists(state, &address)? {
            return Err(ActionError::TokenAlreadyExists { token: address });
        }

        let info = TokenInfo {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            metadata: self.metadata.clone(),
            decimals: self.decimals,
            owner: *actor,
        };
        set_token_info(state, &address, &info)?;

        Ok(CreateTokenResult { address })
    }
}
