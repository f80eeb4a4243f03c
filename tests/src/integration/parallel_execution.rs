//! # Parallel Execution Tests
//!
//! Batches scheduled by `cfmm-ordering` and executed against one shared
//! store must end in the same state, with the same per-action results, as
//! running the batch one action at a time in submission order.

#[cfg(test)]
mod tests {
    use cfmm_actions::{
        Action, ActionError, ActionExecutionApi, ClaimDomain, CreateLiquidityPool, CreateToken,
        ExecutionError, ExecutionService, Hi, Transfer, Whois,
    };
    use cfmm_ordering::{ActionOrderingApi, BatchEntry, OrderingConfig, OrderingService};
    use cfmm_state::{token_address, InMemoryStateDb};
    use shared_types::Address;

    use crate::integration::fixtures::{account, funded_ledger};

    fn eager_scheduler() -> OrderingService {
        OrderingService::with_config(OrderingConfig {
            parallel_threshold: 1,
            conflict_threshold_percent: 100,
            ..OrderingConfig::default()
        })
    }

    fn accounts() -> Vec<Address> {
        (1..=6).map(account).collect()
    }

    fn sequential(
        service: &ExecutionService<InMemoryStateDb>,
        entries: &[BatchEntry],
    ) -> Vec<Result<cfmm_actions::ActionOutput, ExecutionError>> {
        entries
            .iter()
            .map(|e| service.execute(&e.actor, &e.action))
            .collect()
    }

    fn assert_equivalent(entries: Vec<BatchEntry>) {
        let parallel = funded_ledger(&accounts());
        let outcomes = eager_scheduler()
            .execute_batch(&parallel, entries.clone())
            .unwrap();

        let reference = funded_ledger(&accounts());
        let expected = sequential(&reference, &entries);

        let results: Vec<_> = outcomes.into_iter().map(|o| o.result).collect();
        assert_eq!(results, expected);
        assert_eq!(parallel.store().dump(), reference.store().dump());
    }

    fn mixed_batch() -> Vec<BatchEntry> {
        let gold = token_address(b"Gold", b"GLD", b"");
        let silver = token_address(b"Silver", b"SLV", b"");
        let actions: Vec<(u8, Action)> = vec![
            (1, CreateToken::new("Gold", "GLD", "", 8).into()),
            (2, CreateToken::new("Silver", "SLV", "", 8).into()),
            (3, ClaimDomain::new("alpha").into()),
            (4, ClaimDomain::new("alpha").into()),
            (5, Whois::new("alpha").into()),
            (1, Transfer::new(account(2), 10).into()),
            (2, Transfer::new(account(1), 20).into()),
            (6, CreateLiquidityPool::new(1, gold, silver, 30).into()),
            (5, CreateLiquidityPool::new(1, silver, gold, 30).into()),
            (6, Hi::new("six").into()),
            (3, Transfer::new(account(9), 1).into()),
        ];
        actions
            .into_iter()
            .enumerate()
            .map(|(i, (actor, action))| BatchEntry::new(i, account(actor), action))
            .collect()
    }

    #[test]
    fn test_mixed_batch_matches_sequential() {
        assert_equivalent(mixed_batch());
    }

    #[test]
    fn test_first_submission_wins_races() {
        let service = funded_ledger(&accounts());
        let outcomes = eager_scheduler()
            .execute_batch(&service, mixed_batch())
            .unwrap();

        // Domain race: entry 2 before entry 3
        assert!(outcomes[2].is_success());
        assert_eq!(
            outcomes[3].result,
            Err(ExecutionError::Rejected(ActionError::DomainAlreadyTaken {
                domain: "alpha".to_string()
            }))
        );

        // Pool race: entry 7 before entry 8
        assert!(outcomes[7].is_success());
        assert!(matches!(
            outcomes[8].result,
            Err(ExecutionError::Rejected(
                ActionError::LiquidityPoolAlreadyExists { .. }
            ))
        ));
    }

    #[test]
    fn test_payment_ring_schedule() {
        // 1 -> 2 -> 3 -> 1 shares one balance per neighbouring pair.
        let entries = vec![
            BatchEntry::new(0, account(1), Transfer::new(account(2), 5)),
            BatchEntry::new(1, account(2), Transfer::new(account(3), 5)),
            BatchEntry::new(2, account(3), Transfer::new(account(1), 5)),
            BatchEntry::new(3, account(4), Transfer::new(account(5), 5)),
        ];
        let schedule = eager_scheduler().schedule(&entries).unwrap();
        assert_eq!(schedule.parallel_groups[0].indices, vec![0, 3]);
        assert_eq!(schedule.parallel_groups[1].indices, vec![1]);
        assert_eq!(schedule.parallel_groups[2].indices, vec![2]);

        assert_equivalent(entries);
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(32))]

        #[test]
        fn prop_random_transfers_match_sequential(
            transfers in proptest::collection::vec((1u8..=6, 1u8..=8, 1u64..1_000), 1..40)
        ) {
            let entries: Vec<BatchEntry> = transfers
                .into_iter()
                .enumerate()
                .map(|(i, (from, to, value))| {
                    BatchEntry::new(i, account(from), Transfer::new(account(to), value))
                })
                .collect();
            assert_equivalent(entries);
        }
    }
}
