//! Genesis
//!
//! One-time state initialisation: registers the native coin and credits the
//! initial allocations. Runs directly against a [`MutableState`], outside
//! any scoped view.

use std::collections::BTreeSet;

use cfmm_state::storage::{set_balance, set_token_info};
use cfmm_state::MutableState;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::info;

use crate::config::{LedgerConfig, LedgerParams};
use crate::domain::errors::GenesisError;

/// Initial coin balance of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub address: Address,
    pub balance: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    pub ledger: LedgerConfig,
    pub allocations: Vec<Allocation>,
}

impl GenesisConfig {
    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        serde_json::from_str(json).map_err(|e| GenesisError::Parse(e.to_string()))
    }

    /// Sum of all allocations.
    pub fn total_supply(&self) -> Result<u64, GenesisError> {
        self.allocations
            .iter()
            .try_fold(0u64, |acc, a| acc.checked_add(a.balance))
            .ok_or(GenesisError::SupplyOverflow)
    }
}

/// A validated genesis, ready to be written.
#[derive(Clone, Debug)]
pub struct Genesis {
    params: LedgerParams,
    allocations: Vec<Allocation>,
    total_supply: u64,
}

impl Genesis {
    pub fn new(config: &GenesisConfig) -> Result<Self, GenesisError> {
        let params = config.ledger.initialize()?;
        let total_supply = config.total_supply()?;

        let mut seen = BTreeSet::new();
        for allocation in &config.allocations {
            if !seen.insert(allocation.address) {
                return Err(GenesisError::DuplicateAllocation(allocation.address));
            }
        }

        Ok(Self {
            params,
            allocations: config.allocations.clone(),
            total_supply,
        })
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Write the coin record and every allocation.
    pub fn initialize_state<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
    ) -> Result<(), GenesisError> {
        set_token_info(state, &self.params.coin(), self.params.coin_info())?;
        for allocation in &self.allocations {
            set_balance(state, &allocation.address, allocation.balance)?;
        }

        info!(
            coin = %self.params.coin(),
            accounts = self.allocations.len(),
            total_supply = self.total_supply,
            "Genesis state initialized"
        );
        Ok(())
    }
}
