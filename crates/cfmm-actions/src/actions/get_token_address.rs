use cfmm_state::storage::token_exists;
use cfmm_state::{token_address, token_info_key, AccessMode, MutableState, StateKeys};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::{ActionHandler, GET_TOKEN_ADDRESS_ID};
use crate::config::LedgerParams;
use crate::domain::errors::ActionError;
use crate::domain::results::GetTokenAddressResult;

/// Derive a token address without registering anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTokenAddress {
    pub name: Vec<u8>,
    pub symbol: Vec<u8>,
    pub metadata: Vec<u8>,
}

impl GetTokenAddress {
    pub fn new(name: impl AsRef<[u8]>, symbol: impl AsRef<[u8]>, metadata: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
            symbol: symbol.as_ref().to_vec(),
            metadata: metadata.as_ref().to_vec(),
        }
    }

    fn address(&self) -> Address {
        token_address(&self.name, &self.symbol, &self.metadata)
    }
}

impl ActionHandler for GetTokenAddress {
    const TYPE_ID: u8 = GET_TOKEN_ADDRESS_ID;
    const NAME: &'static str = "get_token_address";
    const COMPUTE_UNITS: u64 = 0;

    type Output = GetTokenAddressResult;

    fn state_keys(&self, _actor: &Address) -> StateKeys {
        StateKeys::new().with(token_info_key(&self.address()), AccessMode::Read)
    }

    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        _actor: &Address,
        _params: &LedgerParams,
    ) -> Result<GetTokenAddressResult, ActionError> {
        let address = self.address();
        let registered = token_exists(state, &address)?;
        Ok(GetTokenAddressResult {
            address,
            registered,
        })
    }
}
