//! Typed accessors over the raw state ports.
//!
//! Missing balances read as zero. Undecodable values surface as
//! [`StateError::CorruptValue`].

use shared_types::Address;

use crate::domain::{
    balance_key, decode_balance, domain_key, encode_balance, liquidity_pool_key, token_info_key,
    CodecError, DomainRecord, FixedRecord, LiquidityPool, StateError, StateKey, TokenInfo,
};
use crate::ports::{ImmutableState, MutableState};

fn corrupt(key: &StateKey) -> impl FnOnce(CodecError) -> StateError + '_ {
    move |source| StateError::CorruptValue {
        key: key.clone(),
        source,
    }
}

fn read<S, T>(
    state: &S,
    key: &StateKey,
    decode: impl FnOnce(&[u8]) -> Result<T, CodecError>,
) -> Result<Option<T>, StateError>
where
    S: ImmutableState + ?Sized,
{
    match state.get_value(key)? {
        Some(bytes) => decode(&bytes).map(Some).map_err(corrupt(key)),
        None => Ok(None),
    }
}

// =============================================================================
// Balances
// =============================================================================

pub fn get_balance<S: ImmutableState + ?Sized>(
    state: &S,
    account: &Address,
) -> Result<u64, StateError> {
    Ok(read(state, &balance_key(account), decode_balance)?.unwrap_or(0))
}

pub fn set_balance<S: MutableState + ?Sized>(
    state: &mut S,
    account: &Address,
    amount: u64,
) -> Result<(), StateError> {
    state.insert(&balance_key(account), encode_balance(amount))
}

// =============================================================================
// Token Info
// =============================================================================

pub fn get_token_info<S: ImmutableState + ?Sized>(
    state: &S,
    token: &Address,
) -> Result<Option<TokenInfo>, StateError> {
    read(state, &token_info_key(token), TokenInfo::decode)
}

pub fn token_exists<S: ImmutableState + ?Sized>(
    state: &S,
    token: &Address,
) -> Result<bool, StateError> {
    Ok(state.get_value(&token_info_key(token))?.is_some())
}

pub fn set_token_info<S: MutableState + ?Sized>(
    state: &mut S,
    token: &Address,
    info: &TokenInfo,
) -> Result<(), StateError> {
    let key = token_info_key(token);
    let bytes = info.encode().map_err(corrupt(&key))?;
    state.insert(&key, bytes)
}

// =============================================================================
// Domains
// =============================================================================

pub fn get_domain_owner<S: ImmutableState + ?Sized>(
    state: &S,
    domain: &str,
) -> Result<Option<Address>, StateError> {
    let record = read(state, &domain_key(domain), DomainRecord::decode)?;
    Ok(record.map(|r| r.owner))
}

pub fn set_domain_owner<S: MutableState + ?Sized>(
    state: &mut S,
    domain: &str,
    owner: &Address,
) -> Result<(), StateError> {
    let key = domain_key(domain);
    let bytes = DomainRecord { owner: *owner }
        .encode()
        .map_err(corrupt(&key))?;
    state.insert(&key, bytes)
}

// =============================================================================
// Liquidity Pools
// =============================================================================

pub fn get_liquidity_pool<S: ImmutableState + ?Sized>(
    state: &S,
    pool: &Address,
) -> Result<Option<LiquidityPool>, StateError> {
    read(state, &liquidity_pool_key(pool), LiquidityPool::decode)
}

pub fn liquidity_pool_exists<S: ImmutableState + ?Sized>(
    state: &S,
    pool: &Address,
) -> Result<bool, StateError> {
    Ok(state.get_value(&liquidity_pool_key(pool))?.is_some())
}

pub fn set_liquidity_pool<S: MutableState + ?Sized>(
    state: &mut S,
    pool_address: &Address,
    pool: &LiquidityPool,
) -> Result<(), StateError> {
    let key = liquidity_pool_key(pool_address);
    let bytes = pool.encode().map_err(corrupt(&key))?;
    state.insert(&key, bytes)
}
