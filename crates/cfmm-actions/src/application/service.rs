//! Action Execution Service
//!
//! Runs one action at a time against a shared [`StateStore`]:
//! 1. Compute the declared keys
//! 2. Execute against a [`ScopedState`] restricted to them
//! 3. Commit the buffered writes atomically, or drop them on error

use std::sync::Arc;

use cfmm_state::{ScopedState, StateError, StateStore};
use cfmm_telemetry::{metric_inc, ACTIONS_EXECUTED, ACTIONS_REJECTED, ACTION_DURATION, STATE_FAULTS};
use shared_types::Address;
use tracing::{debug, error, warn};

use crate::actions::Action;
use crate::config::LedgerParams;
use crate::domain::errors::{ActionError, ExecutionError};
use crate::domain::results::ActionOutput;
use crate::ports::inbound::ActionExecutionApi;
use crate::registry::ActionRegistry;

pub struct ExecutionService<S: StateStore> {
    store: Arc<S>,
    params: LedgerParams,
    registry: ActionRegistry,
}

impl<S: StateStore> ExecutionService<S> {
    pub fn new(store: Arc<S>, params: LedgerParams) -> Self {
        Self {
            store,
            params,
            registry: ActionRegistry::new(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    fn fault(&self, action: &'static str, actor: &Address, err: StateError) -> ExecutionError {
        error!(action, actor = %actor, error = %err, "Fatal state fault during execution");
        metric_inc!(STATE_FAULTS);
        ExecutionError::Fatal(err)
    }

    fn run(&self, actor: &Address, action: &Action) -> Result<ActionOutput, ExecutionError> {
        let name = action.name();
        let keys = action.state_keys(actor);
        let mut view = ScopedState::new(self.store.as_ref(), &keys);

        match action.execute(&mut view, actor, &self.params) {
            Ok(output) => {
                let changes = view.into_changes();
                let writes = changes.len();
                self.store
                    .commit(changes)
                    .map_err(|e| self.fault(name, actor, e))?;

                debug!(action = name, actor = %actor, writes, "Action executed");
                metric_inc!(ACTIONS_EXECUTED, &[name]);
                Ok(output)
            }
            Err(ActionError::State(err)) => Err(self.fault(name, actor, err)),
            Err(err) => {
                warn!(action = name, actor = %actor, error = %err, "Action rejected");
                metric_inc!(ACTIONS_REJECTED, &[name]);
                Err(ExecutionError::Rejected(err))
            }
        }
    }
}

impl<S: StateStore> ActionExecutionApi for ExecutionService<S> {
    fn execute(&self, actor: &Address, action: &Action) -> Result<ActionOutput, ExecutionError> {
        let timer = ACTION_DURATION
            .with_label_values(&[action.name()])
            .start_timer();
        let result = self.run(actor, action);
        timer.observe_duration();
        result
    }

    fn execute_encoded(
        &self,
        actor: &Address,
        bytes: &[u8],
    ) -> Result<ActionOutput, ExecutionError> {
        let action = self.registry.decode(bytes).map_err(|e| {
            warn!(actor = %actor, error = %e, "Undecodable action");
            e
        })?;
        self.execute(actor, &action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ClaimDomain, Transfer, Whois};
    use crate::config::LedgerConfig;
    use crate::domain::errors::WireError;
    use crate::domain::results::{ClaimDomainResult, TransferResult, WhoisResult};
    use cfmm_state::storage::{get_balance, get_domain_owner, set_balance};
    use cfmm_state::{balance_key, InMemoryStateDb, MutableState};
    use shared_types::AddressKind;

    fn account(b: u8) -> Address {
        Address::create(AddressKind::Ed25519, [b; 32])
    }

    fn service_with(balances: &[(Address, u64)]) -> ExecutionService<InMemoryStateDb> {
        let mut db = InMemoryStateDb::new();
        for (account, amount) in balances {
            set_balance(&mut db, account, *amount).unwrap();
        }
        let params = LedgerConfig::default().initialize().unwrap();
        ExecutionService::new(Arc::new(db), params)
    }

    #[test]
    fn test_execute_commits() {
        let (alice, bob) = (account(1), account(2));
        let service = service_with(&[(alice, 100)]);

        let output = service
            .execute(&alice, &Transfer::new(bob, 40).into())
            .unwrap();
        assert_eq!(
            output,
            ActionOutput::Transfer(TransferResult {
                sender_balance: 60,
                receiver_balance: 40
            })
        );
        assert_eq!(get_balance(service.store().as_ref(), &bob).unwrap(), 40);
    }

    #[test]
    fn test_rejection_commits_nothing() {
        let (alice, bob) = (account(1), account(2));
        let service = service_with(&[(alice, 10)]);
        let before = service.store().dump();

        let err = service
            .execute(&alice, &Transfer::new(bob, 11).into())
            .unwrap_err();
        assert_eq!(
            err,
            ExecutionError::Rejected(ActionError::InsufficientFunds {
                required: 11,
                available: 10
            })
        );
        assert!(!err.is_fatal());
        assert_eq!(service.store().dump(), before);
    }

    #[test]
    fn test_execute_encoded() {
        let alice = account(1);
        let service = service_with(&[(alice, 10_000_000)]);

        let bytes = Action::from(ClaimDomain::new("test")).encode().unwrap();
        let output = service.execute_encoded(&alice, &bytes).unwrap();
        assert_eq!(
            output,
            ActionOutput::ClaimDomain(ClaimDomainResult {
                amount_paid: 10_000_000
            })
        );
        assert_eq!(
            get_domain_owner(service.store().as_ref(), "test").unwrap(),
            Some(alice)
        );

        let lookup = Action::from(Whois::new("test")).encode().unwrap();
        assert_eq!(
            service.execute_encoded(&account(9), &lookup).unwrap(),
            ActionOutput::Whois(WhoisResult {
                found: true,
                owner: alice
            })
        );
    }

    #[test]
    fn test_unknown_action_type() {
        let service = service_with(&[]);
        assert_eq!(
            service.execute_encoded(&account(1), &[77]).unwrap_err(),
            ExecutionError::Decode(WireError::UnknownActionType(77))
        );
    }

    #[test]
    fn test_corrupt_balance_is_fatal() {
        let alice = account(1);
        let mut db = InMemoryStateDb::new();
        db.insert(&balance_key(&alice), vec![1, 2, 3]).unwrap();
        let params = LedgerConfig::default().initialize().unwrap();
        let service = ExecutionService::new(Arc::new(db), params);

        let faults_before = STATE_FAULTS.get();
        let err = service
            .execute(&alice, &Transfer::new(account(2), 1).into())
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            ExecutionError::Fatal(StateError::CorruptValue { .. })
        ));
        assert!(STATE_FAULTS.get() > faults_before);
    }

    #[test]
    fn test_rejections_are_counted() {
        let service = service_with(&[]);
        let before = ACTIONS_REJECTED.with_label_values(&["transfer"]).get();
        let _ = service.execute(&account(1), &Transfer::new(account(2), 0).into());
        assert!(ACTIONS_REJECTED.with_label_values(&["transfer"]).get() > before);
    }
}
