use cfmm_state::storage::{liquidity_pool_exists, set_liquidity_pool, set_token_info, token_exists};
use cfmm_state::{
    liquidity_pool_address, liquidity_pool_key, liquidity_pool_token_address, token_info_key,
    AccessMode, LiquidityPool, MutableState, StateKeys, TokenInfo,
};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use super::{ActionHandler, CREATE_LIQUIDITY_POOL_ID};
use crate::config::LedgerParams;
use crate::domain::errors::ActionError;
use crate::domain::results::CreateLiquidityPoolResult;

/// Open an empty pool between two registered tokens, together with its LP
/// token. The actor becomes the fee recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLiquidityPool {
    pub function_id: u8,
    pub token_x: Address,
    pub token_y: Address,
    pub fee: u64,
}

impl CreateLiquidityPool {
    pub fn new(function_id: u8, token_x: Address, token_y: Address, fee: u64) -> Self {
        Self {
            function_id,
            token_x,
            token_y,
            fee,
        }
    }

    pub fn pool_address(&self) -> Address {
        liquidity_pool_address(&self.token_x, &self.token_y)
    }
}

impl ActionHandler for CreateLiquidityPool {
    const TYPE_ID: u8 = CREATE_LIQUIDITY_POOL_ID;
    const NAME: &'static str = "create_liquidity_pool";
    const COMPUTE_UNITS: u64 = 1;

    type Output = CreateLiquidityPoolResult;

    fn state_keys(&self, _actor: &Address) -> StateKeys {
        let pool = self.pool_address();
        StateKeys::new()
            .with(token_info_key(&self.token_x), AccessMode::Read)
            .with(token_info_key(&self.token_y), AccessMode::Read)
            .with(liquidity_pool_key(&pool), AccessMode::Allocate)
            .with(
                token_info_key(&liquidity_pool_token_address(&pool)),
                AccessMode::Allocate,
            )
    }

    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        actor: &Address,
        params: &LedgerParams,
    ) -> Result<CreateLiquidityPoolResult, ActionError> {
        if self.fee == 0 {
            return Err(ActionError::InvalidFee);
        }
        if !token_exists(state, &self.token_x)? {
            return Err(ActionError::TokenXDoesNotExist);
        }
        if !token_exists(state, &self.token_y)? {
            return Err(ActionError::TokenYDoesNotExist);
        }
        if !params.pricing_models().contains(self.function_id) {
            return Err(ActionError::FunctionDoesNotExist {
                function_id: self.function_id,
            });
        }

        let pool_address = self.pool_address();
        if liquidity_pool_exists(state, &pool_address)? {
            return Err(ActionError::LiquidityPoolAlreadyExists { pool: pool_address });
        }

        let lp_token = liquidity_pool_token_address(&pool_address);
        set_token_info(
            state,
            &lp_token,
            &TokenInfo::liquidity_pool_token(pool_address),
        )?;

        let pool = LiquidityPool::new(
            self.function_id,
            self.token_x,
            self.token_y,
            self.fee,
            *actor,
            lp_token,
        );
        set_liquidity_pool(state, &pool_address, &pool)?;

        Ok(CreateLiquidityPoolResult {
            pool_address,
            pool_token_address: lp_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfmm_state::storage::{get_liquidity_pool, get_token_info};
    use cfmm_state::{token_address, InMemoryStateDb, ScopedState, StateStore};
    use shared_types::AddressKind;

    struct Fixture {
        db: InMemoryStateDb,
        params: LedgerParams,
        x: Address,
        y: Address,
        actor: Address,
    }

    impl Fixture {
        fn new() -> Self {
            let mut db = InMemoryStateDb::new();
            let x = token_address(b"TokenX", b"X", b"");
            let y = token_address(b"TokenY", b"Y", b"");
            for (address, name, symbol) in [(x, "TokenX", "X"), (y, "TokenY", "Y")] {
                let info = TokenInfo {
                    name: name.as_bytes().to_vec(),
                    symbol: symbol.as_bytes().to_vec(),
                    metadata: vec![],
                    decimals: 9,
                    owner: Address::ZERO,
                };
                set_token_info(&mut db, &address, &info).unwrap();
            }

            Self {
                db,
                params: crate::config::LedgerConfig::default().initialize().unwrap(),
                x,
                y,
                actor: Address::create(AddressKind::Ed25519, [7; 32]),
            }
        }

        fn run(
            &self,
            action: &CreateLiquidityPool,
        ) -> Result<CreateLiquidityPoolResult, ActionError> {
            let keys = action.state_keys(&self.actor);
            let mut view = ScopedState::new(&self.db, &keys);
            let result = action.execute(&mut view, &self.actor, &self.params)?;
            self.db.commit(view.into_changes()).unwrap();
            Ok(result)
        }
    }

    fn unknown_token() -> Address {
        Address::create(AddressKind::Token, [0xEE; 32])
    }

    #[test]
    fn test_create_pool() {
        let f = Fixture::new();
        let result = f.run(&CreateLiquidityPool::new(1, f.x, f.y, 30)).unwrap();

        assert_eq!(result.pool_address, liquidity_pool_address(&f.x, &f.y));
        assert_eq!(
            result.pool_token_address,
            liquidity_pool_token_address(&result.pool_address)
        );

        let pool = get_liquidity_pool(&f.db, &result.pool_address)
            .unwrap()
            .unwrap();
        assert_eq!(pool.function_id, 1);
        assert_eq!(pool.token_x, f.x);
        assert_eq!(pool.token_y, f.y);
        assert_eq!(pool.fee, 30);
        assert_eq!(pool.fee_to, f.actor);
        assert_eq!((pool.reserve_x, pool.reserve_y, pool.k_last), (0, 0, 0));
        assert_eq!(pool.lp_token, result.pool_token_address);

        let lp = get_token_info(&f.db, &result.pool_token_address)
            .unwrap()
            .unwrap();
        assert_eq!(lp, TokenInfo::liquidity_pool_token(result.pool_address));
    }

    #[test]
    fn test_reversed_pair_is_same_pool() {
        let f = Fixture::new();
        f.run(&CreateLiquidityPool::new(1, f.x, f.y, 30)).unwrap();
        let err = f
            .run(&CreateLiquidityPool::new(1, f.y, f.x, 30))
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::LiquidityPoolAlreadyExists {
                pool: liquidity_pool_address(&f.x, &f.y)
            }
        );
    }

    #[test]
    fn test_fee_checked_first() {
        let f = Fixture::new();
        // Every later check would also fail.
        let action = CreateLiquidityPool::new(99, unknown_token(), unknown_token(), 0);
        assert_eq!(f.run(&action).unwrap_err(), ActionError::InvalidFee);
    }

    #[test]
    fn test_same_unregistered_token_fails_on_token_x() {
        let f = Fixture::new();
        let token = unknown_token();
        assert_eq!(
            f.run(&CreateLiquidityPool::new(1, token, token, 30)).unwrap_err(),
            ActionError::TokenXDoesNotExist
        );
    }

    #[test]
    fn test_same_registered_token_opens_pool() {
        let f = Fixture::new();
        let action = CreateLiquidityPool::new(1, f.x, f.x, 30);
        assert_eq!(action.state_keys(&f.actor).len(), 3);

        let result = f.run(&action).unwrap();
        assert_eq!(result.pool_address, liquidity_pool_address(&f.x, &f.x));
        let pool = get_liquidity_pool(&f.db, &result.pool_address)
            .unwrap()
            .unwrap();
        assert_eq!((pool.token_x, pool.token_y), (f.x, f.x));
    }

    #[test]
    fn test_token_x_checked_before_token_y() {
        let f = Fixture::new();
        let action = CreateLiquidityPool::new(99, unknown_token(), f.x, 30);
        assert_eq!(f.run(&action).unwrap_err(), ActionError::TokenXDoesNotExist);
    }

    #[test]
    fn test_token_y_checked_before_function() {
        let f = Fixture::new();
        let action = CreateLiquidityPool::new(99, f.x, unknown_token(), 30);
        assert_eq!(f.run(&action).unwrap_err(), ActionError::TokenYDoesNotExist);
    }

    #[test]
    fn test_function_checked_before_existence() {
        let f = Fixture::new();
        f.run(&CreateLiquidityPool::new(1, f.x, f.y, 30)).unwrap();
        let action = CreateLiquidityPool::new(99, f.x, f.y, 30);
        assert_eq!(
            f.run(&action).unwrap_err(),
            ActionError::FunctionDoesNotExist { function_id: 99 }
        );
    }

    #[test]
    fn test_failed_creation_leaves_state_unchanged() {
        let f = Fixture::new();
        let before = f.db.dump();
        assert!(f.run(&CreateLiquidityPool::new(99, f.x, f.y, 30)).is_err());
        assert_eq!(f.db.dump(), before);
    }

    #[test]
    fn test_declared_keys() {
        let f = Fixture::new();
        let action = CreateLiquidityPool::new(1, f.x, f.y, 30);
        let pool = action.pool_address();
        let keys = action.state_keys(&f.actor);

        assert_eq!(keys.len(), 4);
        assert_eq!(keys.get(&token_info_key(&f.x)), Some(AccessMode::Read));
        assert_eq!(keys.get(&token_info_key(&f.y)), Some(AccessMode::Read));
        assert_eq!(keys.get(&liquidity_pool_key(&pool)), Some(AccessMode::Allocate));
        assert_eq!(
            keys.get(&token_info_key(&liquidity_pool_token_address(&pool))),
            Some(AccessMode::Allocate)
        );
    }
}
