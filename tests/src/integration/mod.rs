//! Cross-crate integration scenarios.

pub mod ledger_flows;
pub mod parallel_execution;

// =============================================================================
// TEST FIXTURES (only compiled during tests)
// =============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use cfmm_actions::{Allocation, ExecutionService, Genesis, GenesisConfig};
    use cfmm_state::InMemoryStateDb;
    use shared_types::{Address, AddressKind};

    pub const FUNDING: u64 = 1_000_000_000_000;

    /// A user account derived from one byte.
    pub fn account(b: u8) -> Address {
        Address::create(AddressKind::Ed25519, [b; 32])
    }

    pub fn genesis_for(accounts: &[Address]) -> Genesis {
        let config = GenesisConfig {
            allocations: accounts
                .iter()
                .map(|&address| Allocation {
                    address,
                    balance: FUNDING,
                })
                .collect(),
            ..GenesisConfig::default()
        };
        Genesis::new(&config).unwrap()
    }

    /// Fresh store initialised from `genesis`, wrapped in a service.
    pub fn ledger(genesis: &Genesis) -> ExecutionService<InMemoryStateDb> {
        let mut db = InMemoryStateDb::new();
        genesis.initialize_state(&mut db).unwrap();
        ExecutionService::new(Arc::new(db), genesis.params().clone())
    }

    pub fn funded_ledger(accounts: &[Address]) -> ExecutionService<InMemoryStateDb> {
        ledger(&genesis_for(accounts))
    }
}
