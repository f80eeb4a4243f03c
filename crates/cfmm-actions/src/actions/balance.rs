//! Checked balance arithmetic.
//!
//! Both helpers read, check, then write; on error nothing is written.

use cfmm_state::storage::{get_balance, set_balance};
use cfmm_state::MutableState;
use shared_types::Address;

use crate::domain::errors::ActionError;

/// Debit `amount` from `account`. Returns the new balance.
pub fn sub_balance<S: MutableState + ?Sized>(
    state: &mut S,
    account: &Address,
    amount: u64,
) -> Result<u64, ActionError> {
    let available = get_balance(state, account)?;
    let remaining = available
        .checked_sub(amount)
        .ok_or(ActionError::InsufficientFunds {
            required: amount,
            available,
        })?;
    set_balance(state, account, remaining)?;
    Ok(remaining)
}

/// Credit `amount` to `account`. Returns the new balance.
pub fn add_balance<S: MutableState + ?Sized>(
    state: &mut S,
    account: &Address,
    amount: u64,
) -> Result<u64, ActionError> {
    let current = get_balance(state, account)?;
    let updated = current
        .checked_add(amount)
        .ok_or(ActionError::BalanceOverflow)?;
    set_balance(state, account, updated)?;
    Ok(updated)
}
