use cfmm_state::storage::{get_balance, set_balance};
use cfmm_state::{balance_key, AccessMode, MutableState, StateKeys};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::balance::add_balance;
use super::{ActionHandler, TRANSFER_ID};
use crate::config::LedgerParams;
use crate::domain::errors::ActionError;
use crate::domain::results::TransferResult;

pub const MAX_MEMO_SIZE: usize = 256;

/// Move native coin from the actor to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub to: Address,
    pub value: u64,
    pub memo: Vec<u8>,
}

impl Transfer {
    pub fn new(to: Address, value: u64) -> Self {
        Self {
            to,
            value,
            memo: Vec::new(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<Vec<u8>>) -> Self {
        self.memo = memo.into();
        self
    }
}

impl ActionHandler for Transfer {
    const TYPE_ID: u8 = TRANSFER_ID;
    const NAME: &'static str = "transfer";
    const COMPUTE_UNITS: u64 = 1;

    type Output = TransferResult;

    fn state_keys(&self, actor: &Address) -> StateKeys {
        // The recipient record may not exist yet.
        StateKeys::new()
            .with(balance_key(actor), AccessMode::Write)
            .with(balance_key(&self.to), AccessMode::Allocate)
    }

    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        actor: &Address,
        _params: &LedgerParams,
    ) -> Result<TransferResult, ActionError> {
        if self.value == 0 {
            return Err(ActionError::ZeroTransfer);
        }
        if self.memo.len() > MAX_MEMO_SIZE {
            return Err(ActionError::MemoTooLarge {
                len: self.memo.len(),
                max: MAX_MEMO_SIZE,
            });
        }

        let available = get_balance(state, actor)?;
        let sender_balance = available
            .checked_sub(self.value)
            .ok_or(ActionError::InsufficientFunds {
                required: self.value,
                available,
            })?;

        if *actor == self.to {
            return Ok(TransferResult {
                sender_balance: available,
                receiver_balance: available,
            });
        }

        // Overflow is checked before either write.
        let receiver_balance = add_balance(state, &self.to, self.value)?;
        set_balance(state, actor, sender_balance)?;

        Ok(TransferResult {
            sender_balance,
            receiver_balance,
        })
    }
}
