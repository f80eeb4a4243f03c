use thiserror::Error;

use super::access::AccessMode;
use super::keys::StateKey;

/// A stored value that could not be decoded.
///
/// Always a sign of upstream storage corruption, never of a bad action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid length for {record}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Truncated {record}: needed {needed} bytes at offset {offset}")]
    Truncated {
        record: &'static str,
        offset: usize,
        needed: usize,
    },

    #[error("Trailing bytes in {record}: {extra} unread")]
    TrailingBytes { record: &'static str, extra: usize },

    #[error("Field {field} does not match schema: expected {expected}")]
    FieldMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Segment {field} too long: {len} > {max}")]
    SegmentTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Internal-consistency faults raised by state access.
///
/// None of these are user errors: an executor that hits one is either
/// touching a key it never declared or reading corrupted storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Key {key} was not declared")]
    UndeclaredKey { key: StateKey },

    #[error("Key {key} declared {declared:?}, operation requires {required:?}")]
    PermissionDenied {
        key: StateKey,
        declared: AccessMode,
        required: AccessMode,
    },

    #[error("Value for {key} is {len} bytes, key allows at most {max}")]
    ValueTooLarge { key: StateKey, len: usize, max: usize },

    #[error("Corrupt value under {key}: {source}")]
    CorruptValue {
        key: StateKey,
        #[source]
        source: CodecError,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),
}
