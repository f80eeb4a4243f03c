//! Key Codec
//!
//! Every key is `prefix ‖ identifier-segment ‖ max-chunks:u16`. Prefixes are
//! unique per entity type, so keys of two types can never be equal. Within a
//! type the suffix is a per-type constant, so a key maps back to exactly one
//! identifier even when the identifier is variable-width (domains).

use std::fmt;

use shared_types::{Address, ADDRESS_LEN};

/// Size of one storage chunk in bytes.
pub const CHUNK_SIZE: usize = 64;

/// Length of the trailing chunk hint.
pub const CHUNK_HINT_LEN: usize = 2;

// Key prefixes. 0x01..=0x03 belong to the host and are never built here.
pub const BALANCE_PREFIX: u8 = 0x00;
pub const HEIGHT_PREFIX: u8 = 0x01;
pub const TIMESTAMP_PREFIX: u8 = 0x02;
pub const FEE_PREFIX: u8 = 0x03;
pub const TOKEN_INFO_PREFIX: u8 = 0x04;
pub const TOKEN_ACCOUNT_BALANCE_PREFIX: u8 = 0x05;
pub const LIQUIDITY_POOL_PREFIX: u8 = 0x06;
pub const DOMAIN_PREFIX: u8 = 0x07;

// Maximum chunks per value.
pub const BALANCE_CHUNKS: u16 = 1;
pub const TOKEN_INFO_CHUNKS: u16 = 6;
pub const LIQUIDITY_POOL_CHUNKS: u16 = 3;
pub const DOMAIN_CHUNKS: u16 = 1;

/// Entity type owning a key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Balance,
    TokenInfo,
    LiquidityPool,
    Domain,
    /// A prefix reserved for the host framework or for future records.
    Reserved(u8),
}

impl KeyKind {
    pub fn from_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            BALANCE_PREFIX => Some(Self::Balance),
            TOKEN_INFO_PREFIX => Some(Self::TokenInfo),
            LIQUIDITY_POOL_PREFIX => Some(Self::LiquidityPool),
            DOMAIN_PREFIX => Some(Self::Domain),
            HEIGHT_PREFIX | TIMESTAMP_PREFIX | FEE_PREFIX | TOKEN_ACCOUNT_BALANCE_PREFIX => {
                Some(Self::Reserved(prefix))
            }
            _ => None,
        }
    }
}

/// A canonical byte-string key into the state store.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Vec<u8>);

impl StateKey {
    /// Wrap raw key bytes, e.g. as handed back by the host store.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    fn build(prefix: u8, segment: &[u8], chunks: u16) -> Self {
        let mut bytes = Vec::with_capacity(1 + segment.len() + CHUNK_HINT_LEN);
        bytes.push(prefix);
        bytes.extend_from_slice(segment);
        bytes.extend_from_slice(&chunks.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn prefix(&self) -> Option<u8> {
        self.0.first().copied()
    }

    pub fn kind(&self) -> Option<KeyKind> {
        self.prefix().and_then(KeyKind::from_prefix)
    }

    /// Identifier bytes between the prefix and the chunk hint.
    pub fn segment(&self) -> &[u8] {
        if self.0.len() < 1 + CHUNK_HINT_LEN {
            return &[];
        }
        &self.0[1..self.0.len() - CHUNK_HINT_LEN]
    }

    /// Chunk hint decoded from the key suffix; zero for malformed keys.
    pub fn max_chunks(&self) -> u16 {
        if self.0.len() < 1 + CHUNK_HINT_LEN {
            return 0;
        }
        let n = self.0.len();
        u16::from_be_bytes([self.0[n - 2], self.0[n - 1]])
    }

    /// Largest value the key may hold, in bytes.
    pub fn max_value_len(&self) -> usize {
        self.max_chunks() as usize * CHUNK_SIZE
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateKey({self})")
    }
}

impl AsRef<[u8]> for StateKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// `0x00 ‖ account ‖ 1`
pub fn balance_key(account: &Address) -> StateKey {
    StateKey::build(BALANCE_PREFIX, account.as_bytes(), BALANCE_CHUNKS)
}

/// `0x04 ‖ token ‖ 6`
pub fn token_info_key(token: &Address) -> StateKey {
    StateKey::build(TOKEN_INFO_PREFIX, token.as_bytes(), TOKEN_INFO_CHUNKS)
}

/// `0x06 ‖ pool ‖ 3`
pub fn liquidity_pool_key(pool: &Address) -> StateKey {
    StateKey::build(LIQUIDITY_POOL_PREFIX, pool.as_bytes(), LIQUIDITY_POOL_CHUNKS)
}

/// `0x07 ‖ domain bytes ‖ 1`
pub fn domain_key(domain: &str) -> StateKey {
    StateKey::build(DOMAIN_PREFIX, domain.as_bytes(), DOMAIN_CHUNKS)
}

/// Recover the address of an address-keyed entity.
pub fn address_from_key(key: &StateKey) -> Option<Address> {
    let segment = key.segment();
    if segment.len() != ADDRESS_LEN {
        return None;
    }
    Address::from_slice(segment).ok()
}
