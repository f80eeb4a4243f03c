//! # Ledger Flow Tests
//!
//! Single-threaded flows through the execution service:
//!
//! 1. **Bootstrap**: JSON genesis, native coin registration
//! 2. **Token Economy**: transfer, token registration, pool creation
//! 3. **Domain Registry**: paid, exactly-once claims
//! 4. **Wire Format**: encoded actions through the registry
//! 5. **Telemetry**: counters exported in Prometheus text format

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cfmm_actions::{
        Action, ActionError, ActionExecutionApi, ActionOutput, ClaimDomain, CreateLiquidityPool,
        CreateToken, ExecutionError, ExecutionService, GetTokenAddress, Genesis, GenesisConfig,
        Hi, Transfer, WireError, Whois,
    };
    use cfmm_state::storage::{
        get_balance, get_domain_owner, get_liquidity_pool, get_token_info,
    };
    use cfmm_state::{liquidity_pool_address, token_address, InMemoryStateDb, TokenInfo};
    use shared_types::Address;

    use crate::integration::fixtures::{account, funded_ledger, ledger, FUNDING};

    fn created_token(output: ActionOutput) -> Address {
        match output {
            ActionOutput::CreateToken(result) => result.address,
            other => panic!("unexpected output {other:?}"),
        }
    }

    // =========================================================================
    // BOOTSTRAP
    // =========================================================================

    #[test]
    fn test_json_genesis_bootstrap() {
        let (alice, bob) = (account(1), account(2));
        let json = format!(
            r#"{{
                "ledger": {{
                    "coin_name": "Dollar",
                    "coin_symbol": "USD",
                    "coin_metadata": "test coin",
                    "coin_decimals": 6,
                    "pricing_models": [{{ "id": 7, "label": "curve" }}]
                }},
                "allocations": [
                    {{ "address": "{alice}", "balance": 1000 }},
                    {{ "address": "{bob}", "balance": 250 }}
                ]
            }}"#
        );
        let genesis = Genesis::new(&GenesisConfig::from_json(&json).unwrap()).unwrap();
        let service = ledger(&genesis);
        let store = service.store().as_ref();

        assert_eq!(genesis.total_supply(), 1250);
        assert_eq!(get_balance(store, &alice).unwrap(), 1000);
        assert_eq!(get_balance(store, &bob).unwrap(), 250);

        let coin = genesis.params().coin();
        assert_eq!(coin, token_address(b"Dollar", b"USD", b"test coin"));
        let info = get_token_info(store, &coin).unwrap().unwrap();
        assert_eq!(info.decimals, 6);
        assert!(info.owner.is_zero());

        assert!(genesis.params().pricing_models().contains(7));
        assert!(!genesis.params().pricing_models().contains(1));
    }

    // =========================================================================
    // TOKEN ECONOMY
    // =========================================================================

    #[test]
    fn test_token_economy_flow() {
        let (alice, bob) = (account(1), account(2));
        let service = funded_ledger(&[alice, bob]);
        let coin = service.params().coin();

        // Transfer
        let output = service
            .execute(&alice, &Transfer::new(bob, 500).with_memo(b"lunch".to_vec()).into())
            .unwrap();
        match output {
            ActionOutput::Transfer(result) => {
                assert_eq!(result.sender_balance, FUNDING - 500);
                assert_eq!(result.receiver_balance, FUNDING + 500);
            }
            other => panic!("unexpected output {other:?}"),
        }

        // Tokens
        let gold = created_token(
            service
                .execute(&alice, &CreateToken::new("Gold", "GLD", "shiny", 8).into())
                .unwrap(),
        );
        let silver = created_token(
            service
                .execute(&bob, &CreateToken::new("Silver", "SLV", "", 8).into())
                .unwrap(),
        );
        let store = service.store().as_ref();
        assert_eq!(get_token_info(store, &gold).unwrap().unwrap().owner, alice);

        match service
            .execute(&bob, &GetTokenAddress::new("Gold", "GLD", "shiny").into())
            .unwrap()
        {
            ActionOutput::GetTokenAddress(result) => {
                assert_eq!(result.address, gold);
                assert!(result.registered);
            }
            other => panic!("unexpected output {other:?}"),
        }

        // Pools: one user pair, one against the native coin
        let pool = match service
            .execute(&bob, &CreateLiquidityPool::new(1, silver, gold, 30).into())
            .unwrap()
        {
            ActionOutput::CreateLiquidityPool(result) => result,
            other => panic!("unexpected output {other:?}"),
        };
        assert_eq!(pool.pool_address, liquidity_pool_address(&gold, &silver));

        let record = get_liquidity_pool(store, &pool.pool_address).unwrap().unwrap();
        assert_eq!(record.fee_to, bob);
        assert_eq!(record.lp_token, pool.pool_token_address);
        assert_eq!(
            get_token_info(store, &pool.pool_token_address).unwrap(),
            Some(TokenInfo::liquidity_pool_token(pool.pool_address))
        );

        assert!(service
            .execute(&alice, &CreateLiquidityPool::new(0, coin, gold, 5).into())
            .is_ok());

        // Same pair again, reversed
        let err = service
            .execute(&alice, &CreateLiquidityPool::new(1, gold, silver, 30).into())
            .unwrap_err();
        assert_eq!(
            err,
            ExecutionError::Rejected(ActionError::LiquidityPoolAlreadyExists {
                pool: pool.pool_address
            })
        );

        // Token registration and pool creation are free.
        assert_eq!(get_balance(store, &alice).unwrap(), FUNDING - 500);
    }

    #[test]
    fn test_hi_reports_balance() {
        let alice = account(1);
        let service = funded_ledger(&[alice]);
        match service.execute(&alice, &Hi::new("Alice").into()).unwrap() {
            ActionOutput::Hi(result) => {
                assert_eq!(result.greeting, b"Hi, Alice");
                assert_eq!(result.balance, FUNDING);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    // =========================================================================
    // DOMAIN REGISTRY
    // =========================================================================

    #[test]
    fn test_claim_domain_scenario() {
        let (alice, bob) = (account(1), account(2));
        let mut db = InMemoryStateDb::new();
        let config = GenesisConfig {
            allocations: vec![
                cfmm_actions::Allocation {
                    address: alice,
                    balance: 10_000_000,
                },
                cfmm_actions::Allocation {
                    address: bob,
                    balance: 1_000_000_000,
                },
            ],
            ..GenesisConfig::default()
        };
        let genesis = Genesis::new(&config).unwrap();
        genesis.initialize_state(&mut db).unwrap();
        let service = ExecutionService::new(Arc::new(db), genesis.params().clone());

        let paid = service
            .execute(&alice, &ClaimDomain::new("test").into())
            .unwrap();
        assert_eq!(
            paid,
            ActionOutput::ClaimDomain(cfmm_actions::ClaimDomainResult {
                amount_paid: 10_000_000
            })
        );

        let before = service.store().dump();
        let err = service
            .execute(&bob, &ClaimDomain::new("test").into())
            .unwrap_err();
        assert_eq!(
            err,
            ExecutionError::Rejected(ActionError::DomainAlreadyTaken {
                domain: "test".to_string()
            })
        );
        assert_eq!(service.store().dump(), before);

        let store = service.store().as_ref();
        assert_eq!(get_domain_owner(store, "test").unwrap(), Some(alice));
        assert_eq!(get_balance(store, &alice).unwrap(), 0);
        assert_eq!(get_balance(store, &bob).unwrap(), 1_000_000_000);

        match service.execute(&bob, &Whois::new("test").into()).unwrap() {
            ActionOutput::Whois(result) => {
                assert!(result.found);
                assert_eq!(result.owner, alice);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    // =========================================================================
    // WIRE FORMAT
    // =========================================================================

    #[test]
    fn test_encoded_actions() {
        let (alice, bob) = (account(1), account(2));
        let service = funded_ledger(&[alice]);

        let bytes = Action::from(Transfer::new(bob, 42)).encode().unwrap();
        assert_eq!(bytes[0], 0);
        service.execute_encoded(&alice, &bytes).unwrap();
        assert_eq!(get_balance(service.store().as_ref(), &bob).unwrap(), 42);

        assert_eq!(
            service.execute_encoded(&alice, &[0xFE, 0]).unwrap_err(),
            ExecutionError::Decode(WireError::UnknownActionType(0xFE))
        );
        assert!(matches!(
            service.execute_encoded(&alice, &[0, 1, 2]).unwrap_err(),
            ExecutionError::Decode(WireError::Malformed {
                action: "transfer",
                ..
            })
        ));
    }

    // =========================================================================
    // TELEMETRY
    // =========================================================================

    #[test]
    fn test_metrics_exported() {
        cfmm_telemetry::register_metrics().unwrap();
        let alice = account(1);
        let service = funded_ledger(&[alice]);
        service.execute(&alice, &Hi::new("metrics").into()).unwrap();

        let text = cfmm_telemetry::encode_metrics().unwrap();
        assert!(text.contains("cfmm_actions_executed_total"));
        assert!(text.contains("action=\"hi\""));
    }
}
