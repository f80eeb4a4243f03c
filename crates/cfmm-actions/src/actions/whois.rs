use cfmm_state::storage::get_domain_owner;
use cfmm_state::{domain_key, AccessMode, MutableState, StateKeys};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::{ActionHandler, WHOIS_ID};
use crate::config::LedgerParams;
use crate::domain::errors::ActionError;
use crate::domain::results::WhoisResult;

/// Look up a domain's owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whois {
    pub domain: String,
}

impl Whois {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

impl ActionHandler for Whois {
    const TYPE_ID: u8 = WHOIS_ID;
    const NAME: &'static str = "whois";
    // read only
    const COMPUTE_UNITS: u64 = 0;

    type Output = WhoisResult;

    fn state_keys(&self, _actor: &Address) -> StateKeys {
        StateKeys::new().with(domain_key(&self.domain), AccessMode::Read)
    }

    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        _actor: &Address,
        _params: &LedgerParams,
    ) -> Result<WhoisResult, ActionError> {
        let owner = get_domain_owner(state, &self.domain)?;
        Ok(WhoisResult {
            found: owner.is_some(),
            owner: owner.unwrap_or(Address::ZERO),
        })
    }
}
