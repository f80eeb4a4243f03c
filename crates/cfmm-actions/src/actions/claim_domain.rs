use cfmm_state::storage::{get_domain_owner, set_domain_owner};
use cfmm_state::{balance_key, domain_key, AccessMode, MutableState, StateKeys};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::balance::sub_balance;
use super::{ActionHandler, CLAIM_DOMAIN_ID};
use crate::config::LedgerParams;
use crate::domain::errors::ActionError;
use crate::domain::results::ClaimDomainResult;

pub const MIN_DOMAIN_LENGTH: usize = 2;
pub const MAX_DOMAIN_LENGTH: usize = 10;

/// Price of a domain of `len` bytes: `10^(11 - len)`.
///
/// `None` outside `MIN_DOMAIN_LENGTH..=MAX_DOMAIN_LENGTH`.
pub fn domain_price(len: usize) -> Option<u64> {
    if !(MIN_DOMAIN_LENGTH..=MAX_DOMAIN_LENGTH).contains(&len) {
        return None;
    }
    10u64.checked_pow((11 - len) as u32)
}

/// Register a domain to the actor. The payment is burned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDomain {
    pub domain: String,
}

impl ClaimDomain {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

impl ActionHandler for ClaimDomain {
    const TYPE_ID: u8 = CLAIM_DOMAIN_ID;
    const NAME: &'static str = "claim_domain";
    const COMPUTE_UNITS: u64 = 2;

    type Output = ClaimDomainResult;

    fn state_keys(&self, actor: &Address) -> StateKeys {
        StateKeys::new()
            .with(balance_key(actor), AccessMode::Write)
            .with(domain_key(&self.domain), AccessMode::Allocate)
    }

    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        actor: &Address,
        _params: &LedgerParams,
    ) -> Result<ClaimDomainResult, ActionError> {
        let len = self.domain.len();
        if len < MIN_DOMAIN_LENGTH {
            return Err(ActionError::DomainTooShort {
                len,
                min: MIN_DOMAIN_LENGTH,
            });
        }
        if len > MAX_DOMAIN_LENGTH {
            return Err(ActionError::DomainTooLong {
                len,
                max: MAX_DOMAIN_LENGTH,
            });
        }

        if get_domain_owner(state, &self.domain)?.is_some() {
            return Err(ActionError::DomainAlreadyTaken {
                domain: self.domain.clone(),
            });
        }

        // In range by the checks above.
        let price = domain_price(len).unwrap_or(u64::MAX);
        sub_balance(state, actor, price)?;
        set_domain_owner(state, &self.domain, actor)?;

        Ok(ClaimDomainResult { amount_paid: price })
    }
}
