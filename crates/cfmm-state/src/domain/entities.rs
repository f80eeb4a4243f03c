//! Stored records and their value encodings.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ADDRESS_LEN};

use super::errors::CodecError;
use super::schema::{Field, FieldCursor, FieldKind, FieldValue, FixedRecord, RecordSchema};

pub const MAX_TOKEN_NAME_SIZE: usize = 64;
pub const MAX_TOKEN_SYMBOL_SIZE: usize = 8;
pub const MAX_TOKEN_METADATA_SIZE: usize = 256;
pub const MAX_TOKEN_DECIMALS: u8 = 18;

// Every LP token carries the same descriptive data.
pub const LIQUIDITY_POOL_TOKEN_NAME: &str = "CFMM-Pair";
pub const LIQUIDITY_POOL_TOKEN_SYMBOL: &str = "CFMMP";
pub const LIQUIDITY_POOL_TOKEN_METADATA: &str = "A liquidity pool";
pub const LIQUIDITY_POOL_TOKEN_DECIMALS: u8 = 0;

// =============================================================================
// Balance
// =============================================================================

pub const BALANCE_LEN: usize = 8;

pub fn encode_balance(amount: u64) -> Vec<u8> {
    amount.to_be_bytes().to_vec()
}

pub fn decode_balance(bytes: &[u8]) -> Result<u64, CodecError> {
    let array: [u8; BALANCE_LEN] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
        record: "balance",
        expected: BALANCE_LEN,
        actual: bytes.len(),
    })?;
    Ok(u64::from_be_bytes(array))
}

// =============================================================================
// Domain Record
// =============================================================================

/// Owner of a claimed domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub owner: Address,
}

impl FixedRecord for DomainRecord {
    const SCHEMA: RecordSchema =
        RecordSchema::new("domain", &[Field::new("owner", FieldKind::Address)]);

    fn to_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::Address(self.owner)]
    }

    fn from_values(values: &[FieldValue]) -> Result<Self, CodecError> {
        let mut cursor = FieldCursor::new(&Self::SCHEMA, values);
        Ok(Self {
            owner: cursor.address()?,
        })
    }
}

// =============================================================================
// Liquidity Pool
// =============================================================================

/// An AMM pool between two tokens.
///
/// Layout (165 bytes, big-endian):
///
/// ```text
/// [0]   function_id:1   [1]   token_x:33   [34]  token_y:33
/// [67]  fee:8           [75]  fee_to:33    [108] reserve_x:8
/// [116] reserve_y:8     [124] lp_token:33  [157] k_last:8
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPool {
    pub function_id: u8,
    pub token_x: Address,
    pub token_y: Address,
    pub fee: u64,
    pub fee_to: Address,
    pub reserve_x: u64,
    pub reserve_y: u64,
    pub lp_token: Address,
    pub k_last: u64,
}

pub const LIQUIDITY_POOL_FIELDS: &[Field] = &[
    Field::new("function_id", FieldKind::U8),
    Field::new("token_x", FieldKind::Address),
    Field::new("token_y", FieldKind::Address),
    Field::new("fee", FieldKind::U64),
    Field::new("fee_to", FieldKind::Address),
    Field::new("reserve_x", FieldKind::U64),
    Field::new("reserve_y", FieldKind::U64),
    Field::new("lp_token", FieldKind::Address),
    Field::new("k_last", FieldKind::U64),
];

impl LiquidityPool {
    /// A freshly created pool: zero reserves, zero `k_last`.
    pub fn new(
        function_id: u8,
        token_x: Address,
        token_y: Address,
        fee: u64,
        fee_to: Address,
        lp_token: Address,
    ) -> Self {
        Self {
            function_id,
            token_x,
            token_y,
            fee,
            fee_to,
            reserve_x: 0,
            reserve_y: 0,
            lp_token,
            k_last: 0,
        }
    }
}

impl FixedRecord for LiquidityPool {
    const SCHEMA: RecordSchema = RecordSchema::new("liquidity_pool", LIQUIDITY_POOL_FIELDS);

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::U8(self.function_id),
            FieldValue::Address(self.token_x),
            FieldValue::Address(self.token_y),
            FieldValue::U64(self.fee),
            FieldValue::Address(self.fee_to),
            FieldValue::U64(self.reserve_x),
            FieldValue::U64(self.reserve_y),
            FieldValue::Address(self.lp_token),
            FieldValue::U64(self.k_last),
        ]
    }

    fn from_values(values: &[FieldValue]) -> Result<Self, CodecError> {
        let mut c = FieldCursor::new(&Self::SCHEMA, values);
        Ok(Self {
            function_id: c.u8()?,
            token_x: c.address()?,
            token_y: c.address()?,
            fee: c.u64()?,
            fee_to: c.address()?,
            reserve_x: c.u64()?,
            reserve_y: c.u64()?,
            lp_token: c.address()?,
            k_last: c.u64()?,
        })
    }
}

// =============================================================================
// Token Info
// =============================================================================

/// Registry entry for a fungible token.
///
/// Layout:
///
/// ```text
/// name_len:u16 ‖ name ‖ symbol_len:u16 ‖ symbol ‖ metadata_len:u16 ‖ metadata
///   ‖ decimals:u8 ‖ owner:33
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: Vec<u8>,
    pub symbol: Vec<u8>,
    pub metadata: Vec<u8>,
    pub decimals: u8,
    /// Mint authority.
    pub owner: Address,
}

impl TokenInfo {
    /// The LP token record created alongside `pool`.
    pub fn liquidity_pool_token(pool: Address) -> Self {
        Self {
            name: LIQUIDITY_POOL_TOKEN_NAME.as_bytes().to_vec(),
            symbol: LIQUIDITY_POOL_TOKEN_SYMBOL.as_bytes().to_vec(),
            metadata: LIQUIDITY_POOL_TOKEN_METADATA.as_bytes().to_vec(),
            decimals: LIQUIDITY_POOL_TOKEN_DECIMALS,
            owner: pool,
        }
    }

    pub fn encoded_len(&self) -> usize {
        3 * 2 + self.name.len() + self.symbol.len() + self.metadata.len() + 1 + ADDRESS_LEN
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for (field, segment, max) in [
            ("name", &self.name, MAX_TOKEN_NAME_SIZE),
            ("symbol", &self.symbol, MAX_TOKEN_SYMBOL_SIZE),
            ("metadata", &self.metadata, MAX_TOKEN_METADATA_SIZE),
        ] {
            if segment.len() > max {
                return Err(CodecError::SegmentTooLong {
                    field,
                    len: segment.len(),
                    max,
                });
            }
            // max sizes are all below u16::MAX
            out.extend_from_slice(&(segment.len() as u16).to_be_bytes());
            out.extend_from_slice(segment);
        }
        out.push(self.decimals);
        out.extend_from_slice(self.owner.as_bytes());
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = ByteReader::new("token_info", bytes);
        let name = reader.segment("name", MAX_TOKEN_NAME_SIZE)?;
        let symbol = reader.segment("symbol", MAX_TOKEN_SYMBOL_SIZE)?;
        let metadata = reader.segment("metadata", MAX_TOKEN_METADATA_SIZE)?;
        let decimals = reader.take(1)?[0];
        let owner = Address::from_slice(reader.take(ADDRESS_LEN)?).map_err(|_| {
            CodecError::FieldMismatch {
                field: "owner",
                expected: "address",
            }
        })?;
        reader.finish()?;

        Ok(Self {
            name,
            symbol,
            metadata,
            decimals,
            owner,
        })
    }
}

struct ByteReader<'a> {
    record: &'static str,
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(record: &'static str, bytes: &'a [u8]) -> Self {
        Self {
            record,
            bytes,
            offset: 0,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(CodecError::Truncated {
                record: self.record,
                offset: self.offset,
                needed: n,
            })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn segment(&mut self, field: &'static str, max: usize) -> Result<Vec<u8>, CodecError> {
        let len_bytes = self.take(2)?;
        let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
        if len > max {
            return Err(CodecError::SegmentTooLong { field, len, max });
        }
        Ok(self.take(len)?.to_vec())
    }

    fn finish(self) -> Result<(), CodecError> {
        let extra = self.bytes.len() - self.offset;
        if extra != 0 {
            return Err(CodecError::TrailingBytes {
                record: self.record,
                extra,
            });
        }
        Ok(())
    }
}
