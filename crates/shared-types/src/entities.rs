//! # Core Primitives
//!
//! Addresses, hashes and the kind bytes that partition the address space.
//!
//! ## Address Layout
//!
//! ```text
//! [0]      kind byte (AddressKind)
//! [1..33]  32-byte identifier (SHA-256 of the defining payload)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::errors::AddressError;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// Length of an identifier inside an address.
pub const ID_LEN: usize = 32;

/// Length of a serialized address (kind byte + identifier).
pub const ADDRESS_LEN: usize = 1 + ID_LEN;

/// Hash arbitrary bytes into a 32-byte identifier.
pub fn to_id(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Kind byte stored in the first position of every address.
///
/// Account kinds mirror the external auth schemes; derived kinds are owned by
/// the ledger and never produced by a key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AddressKind {
    /// Ed25519 account.
    Ed25519 = 0x00,
    /// secp256r1 account.
    Secp256r1 = 0x01,
    /// BLS account.
    Bls = 0x02,
    /// Content-derived fungible token.
    Token = 0x10,
    /// Content-derived liquidity pool.
    LiquidityPool = 0x11,
    /// Token minted to liquidity providers of a pool.
    LiquidityPoolToken = 0x12,
}

impl AddressKind {
    /// Convert to the raw kind byte.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert from a raw kind byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Ed25519),
            0x01 => Some(Self::Secp256r1),
            0x02 => Some(Self::Bls),
            0x10 => Some(Self::Token),
            0x11 => Some(Self::LiquidityPool),
            0x12 => Some(Self::LiquidityPoolToken),
            _ => None,
        }
    }

    /// Whether addresses of this kind are derived by the ledger.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            Self::Token | Self::LiquidityPool | Self::LiquidityPoolToken
        )
    }
}

/// A fixed-width 33-byte address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address. Used as "no owner" and as the not-found value.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address from a kind byte and a 32-byte identifier.
    pub fn create(kind: AddressKind, id: Hash) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = kind.to_u8();
        bytes[1..].copy_from_slice(&id);
        Self(bytes)
    }

    /// Parse from a byte slice of exactly [`ADDRESS_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let array: [u8; ADDRESS_LEN] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength {
                expected: ADDRESS_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// The kind byte, if it names a known kind.
    pub fn kind(&self) -> Option<AddressKind> {
        AddressKind::from_u8(self.0[0])
    }

    /// The 32-byte identifier after the kind byte.
    pub fn id(&self) -> &[u8] {
        &self.0[1..]
    }

    /// Whether this is [`Address::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::ZERO
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

// Hex string for human-readable formats (JSON genesis files), raw bytes for
// binary formats (action wire encoding).
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

struct AddressVisitor;

impl<'de> Visitor<'de> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {ADDRESS_LEN}-byte address as hex string or bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Address::from_slice(v).map_err(E::custom)
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        self.visit_bytes(&v)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut bytes = Vec::with_capacity(ADDRESS_LEN);
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Address::from_slice(&bytes).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(AddressVisitor)
        } else {
            deserializer.deserialize_bytes(AddressVisitor)
        }
    }
}
