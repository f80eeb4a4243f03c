//! Fixed-width record schemas.
//!
//! A record layout is declared once as an ordered list of named fields; the
//! single [`RecordSchema::encode`]/[`RecordSchema::decode`] pair walks that
//! list. Integers are big-endian.

use shared_types::{Address, ADDRESS_LEN};

use super::errors::CodecError;

/// Encoding of one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U64,
    Address,
}

impl FieldKind {
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U8 => 1,
            FieldKind::U64 => 8,
            FieldKind::Address => ADDRESS_LEN,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            FieldKind::U8 => "u8",
            FieldKind::U64 => "u64",
            FieldKind::Address => "address",
        }
    }
}

/// A named field in a schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A decoded field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue {
    U8(u8),
    U64(u64),
    Address(Address),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::U8(_) => FieldKind::U8,
            FieldValue::U64(_) => FieldKind::U64,
            FieldValue::Address(_) => FieldKind::Address,
        }
    }
}

/// Ordered field list describing a fixed-width record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl RecordSchema {
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }

    /// Encoded size in bytes.
    pub const fn encoded_len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].kind.width();
            i += 1;
        }
        total
    }

    /// Byte offset of `field`, or `None` if the schema has no such field.
    pub fn offset_of(&self, field: &str) -> Option<usize> {
        let mut offset = 0;
        for f in self.fields {
            if f.name == field {
                return Some(offset);
            }
            offset += f.kind.width();
        }
        None
    }

    pub fn encode(&self, values: &[FieldValue]) -> Result<Vec<u8>, CodecError> {
        if values.len() != self.fields.len() {
            return Err(CodecError::InvalidLength {
                record: self.name,
                expected: self.fields.len(),
                actual: values.len(),
            });
        }

        let mut out = Vec::with_capacity(self.encoded_len());
        for (field, value) in self.fields.iter().zip(values) {
            match (field.kind, value) {
                (FieldKind::U8, FieldValue::U8(v)) => out.push(*v),
                (FieldKind::U64, FieldValue::U64(v)) => out.extend_from_slice(&v.to_be_bytes()),
                (FieldKind::Address, FieldValue::Address(a)) => out.extend_from_slice(a.as_bytes()),
                _ => {
                    return Err(CodecError::FieldMismatch {
                        field: field.name,
                        expected: field.kind.label(),
                    })
                }
            }
        }
        Ok(out)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<FieldValue>, CodecError> {
        if bytes.len() != self.encoded_len() {
            return Err(CodecError::InvalidLength {
                record: self.name,
                expected: self.encoded_len(),
                actual: bytes.len(),
            });
        }

        let mut values = Vec::with_capacity(self.fields.len());
        let mut offset = 0;
        for field in self.fields {
            let width = field.kind.width();
            let raw = &bytes[offset..offset + width];
            let value = match field.kind {
                FieldKind::U8 => FieldValue::U8(raw[0]),
                FieldKind::U64 => {
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(raw);
                    FieldValue::U64(u64::from_be_bytes(buf))
                }
                FieldKind::Address => {
                    let address = Address::from_slice(raw).map_err(|_| CodecError::FieldMismatch {
                        field: field.name,
                        expected: "address",
                    })?;
                    FieldValue::Address(address)
                }
            };
            values.push(value);
            offset += width;
        }
        Ok(values)
    }
}

/// Sequential typed access to decoded values.
pub struct FieldCursor<'a> {
    schema: &'a RecordSchema,
    values: &'a [FieldValue],
    position: usize,
}

impl<'a> FieldCursor<'a> {
    pub fn new(schema: &'a RecordSchema, values: &'a [FieldValue]) -> Self {
        Self {
            schema,
            values,
            position: 0,
        }
    }

    fn next(&mut self) -> Result<(&'static str, FieldKind, FieldValue), CodecError> {
        let truncated = CodecError::Truncated {
            record: self.schema.name,
            offset: self.position,
            needed: 1,
        };
        let field = self.schema.fields.get(self.position).ok_or(truncated.clone())?;
        let value = self.values.get(self.position).copied().ok_or(truncated)?;
        self.position += 1;
        Ok((field.name, field.kind, value))
    }

    pub fn u8(&mut self) -> Result<u8, CodecError> {
        match self.next()? {
            (_, FieldKind::U8, FieldValue::U8(v)) => Ok(v),
            (name, _, _) => Err(CodecError::FieldMismatch {
                field: name,
                expected: "u8",
            }),
        }
    }

    pub fn u64(&mut self) -> Result<u64, CodecError> {
        match self.next()? {
            (_, FieldKind::U64, FieldValue::U64(v)) => Ok(v),
            (name, _, _) => Err(CodecError::FieldMismatch {
                field: name,
                expected: "u64",
            }),
        }
    }

    pub fn address(&mut self) -> Result<Address, CodecError> {
        match self.next()? {
            (_, FieldKind::Address, FieldValue::Address(v)) => Ok(v),
            (name, _, _) => Err(CodecError::FieldMismatch {
                field: name,
                expected: "address",
            }),
        }
    }
}

/// A record with a fixed-width schema.
pub trait FixedRecord: Sized {
    const SCHEMA: RecordSchema;

    /// Field values in schema order.
    fn to_values(&self) -> Vec<FieldValue>;

    fn from_values(values: &[FieldValue]) -> Result<Self, CodecError>;

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Self::SCHEMA.encode(&self.to_values())
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let values = Self::SCHEMA.decode(bytes)?;
        Self::from_values(&values)
    }
}
