//! Content-addressed identifier derivation.
//!
//! Addresses are `kind ‖ sha256(payload)`. The kind byte separates entity
//! types; the payload is canonical so derivation is a pure function of the
//! entity's defining fields and registration is idempotent.

use shared_types::{to_id, Address, AddressKind, ADDRESS_LEN};

/// Hash `payload` under `kind`.
pub fn derive_address(kind: AddressKind, payload: &[u8]) -> Address {
    Address::create(kind, to_id(payload))
}

/// Address of the token defined by `(name, symbol, metadata)`.
///
/// Each segment is length-prefixed so shifting bytes between fields cannot
/// produce the same payload.
pub fn token_address(name: &[u8], symbol: &[u8], metadata: &[u8]) -> Address {
    let mut payload = Vec::with_capacity(6 + name.len() + symbol.len() + metadata.len());
    for segment in [name, symbol, metadata] {
        // Segments longer than u16::MAX never pass validation; saturate so
        // derivation itself stays total.
        let len = u16::try_from(segment.len()).unwrap_or(u16::MAX);
        payload.extend_from_slice(&len.to_be_bytes());
        payload.extend_from_slice(segment);
    }
    derive_address(AddressKind::Token, &payload)
}

/// Order two addresses with the lexicographically larger one first.
pub fn canonical_order(a: Address, b: Address) -> (Address, Address) {
    if a >= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Address of the pool trading `token_x` against `token_y`.
///
/// Commutative: `liquidity_pool_address(a, b) == liquidity_pool_address(b, a)`.
pub fn liquidity_pool_address(token_x: &Address, token_y: &Address) -> Address {
    let (first, second) = canonical_order(*token_x, *token_y);
    let mut payload = [0u8; 2 * ADDRESS_LEN];
    payload[..ADDRESS_LEN].copy_from_slice(first.as_bytes());
    payload[ADDRESS_LEN..].copy_from_slice(second.as_bytes());
    derive_address(AddressKind::LiquidityPool, &payload)
}

/// Address of the LP token minted by `pool`.
pub fn liquidity_pool_token_address(pool: &Address) -> Address {
    derive_address(AddressKind::LiquidityPoolToken, pool.as_bytes())
}
