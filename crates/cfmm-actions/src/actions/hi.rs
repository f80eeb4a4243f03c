use cfmm_state::storage::get_balance;
use cfmm_state::{balance_key, AccessMode, MutableState, StateKeys};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::{ActionHandler, HI_ID};
use crate::config::LedgerParams;
use crate::domain::errors::ActionError;
use crate::domain::results::HiResult;

pub const MAX_NAME_SIZE: usize = 256;

/// Greet `name` and report the caller's balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hi {
    pub name: Vec<u8>,
}

impl Hi {
    pub fn new(name: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
        }
    }
}

impl ActionHandler for Hi {
    const TYPE_ID: u8 = HI_ID;
    const NAME: &'static str = "hi";
    const COMPUTE_UNITS: u64 = 1;

    type Output = HiResult;

    fn state_keys(&self, actor: &Address) -> StateKeys {
        StateKeys::new().with(balance_key(actor), AccessMode::Read)
    }

    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        actor: &Address,
        _params: &LedgerParams,
    ) -> Result<HiResult, ActionError> {
        if self.name.len() > MAX_NAME_SIZE {
            return Err(ActionError::NameTooLarge {
                len: self.name.len(),
                max: MAX_NAME_SIZE,
            });
        }

        let balance = get_balance(state, actor)?;
        let mut greeting = b"Hi, ".to_vec();
        greeting.extend_from_slice(&self.name);
        Ok(HiResult { greeting, balance })
    }
}
