//! Error types for action execution
//!
//! User errors leave state untouched and are reported back to the caller.
//! [`StateError`]s are internal faults: an executor touched an undeclared
//! key or the store returned garbage.

use cfmm_state::StateError;
use shared_types::Address;
use thiserror::Error;

/// Coarse grouping of [`ActionError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Malformed parameters, detectable without reading state.
    Validation,
    /// Something that must (not) exist does (not).
    Existence,
    /// The actor cannot pay.
    Resource,
    /// Internal-consistency fault.
    Fatal,
}

/// Errors returned by an action executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    // === Validation ===
    #[error("Transfer value must be non-zero")]
    ZeroTransfer,

    #[error("Memo is too large: {len} > {max} bytes")]
    MemoTooLarge { len: usize, max: usize },

    #[error("Name is too large: {len} > {max} bytes")]
    NameTooLarge { len: usize, max: usize },

    #[error("Domain is too short: {len} < {min}")]
    DomainTooShort { len: usize, min: usize },

    #[error("Domain is too long: {len} > {max}")]
    DomainTooLong { len: usize, max: usize },

    #[error("Token name must be non-empty")]
    EmptyTokenName,

    #[error("Token name is too large: {len} > {max} bytes")]
    TokenNameTooLarge { len: usize, max: usize },

    #[error("Token symbol must be non-empty")]
    EmptyTokenSymbol,

    #[error("Token symbol is too large: {len} > {max} bytes")]
    TokenSymbolTooLarge { len: usize, max: usize },

    #[error("Token metadata is too large: {len} > {max} bytes")]
    TokenMetadataTooLarge { len: usize, max: usize },

    #[error("Token decimals out of range: {decimals} > {max}")]
    TooManyDecimals { decimals: u8, max: u8 },

    #[error("Pool fee must be non-zero")]
    InvalidFee,

    // === Existence ===
    #[error("Domain {domain} is already taken")]
    DomainAlreadyTaken { domain: String },

    #[error("Token {token} already exists")]
    TokenAlreadyExists { token: Address },

    #[error("Token X does not exist")]
    TokenXDoesNotExist,

    #[error("Token Y does not exist")]
    TokenYDoesNotExist,

    #[error("Pricing model {function_id} does not exist")]
    FunctionDoesNotExist { function_id: u8 },

    #[error("Liquidity pool {pool} already exists")]
    LiquidityPoolAlreadyExists { pool: Address },

    // === Resource ===
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Balance overflow")]
    BalanceOverflow,

    // === Fatal ===
    #[error("State fault: {0}")]
    State(#[from] StateError),
}

impl ActionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ActionError::ZeroTransfer
            | ActionError::MemoTooLarge { .. }
            | ActionError::NameTooLarge { .. }
            | ActionError::DomainTooShort { .. }
            | ActionError::DomainTooLong { .. }
            | ActionError::EmptyTokenName
            | ActionError::TokenNameTooLarge { .. }
            | ActionError::EmptyTokenSymbol
            | ActionError::TokenSymbolTooLarge { .. }
            | ActionError::TokenMetadataTooLarge { .. }
            | ActionError::TooManyDecimals { .. }
            | ActionError::InvalidFee => ErrorClass::Validation,

            ActionError::DomainAlreadyTaken { .. }
            | ActionError::TokenAlreadyExists { .. }
            | ActionError::TokenXDoesNotExist
            | ActionError::TokenYDoesNotExist
            | ActionError::FunctionDoesNotExist { .. }
            | ActionError::LiquidityPoolAlreadyExists { .. } => ErrorClass::Existence,

            ActionError::InsufficientFunds { .. } | ActionError::BalanceOverflow => {
                ErrorClass::Resource
            }

            ActionError::State(_) => ErrorClass::Fatal,
        }
    }

    /// Whether the error signals a broken invariant rather than a bad action.
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Fatal
    }
}

/// Action wire-format errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("Empty action payload")]
    Empty,

    #[error("Unknown action type: {0}")]
    UnknownActionType(u8),

    #[error("Malformed {action} payload: {reason}")]
    Malformed {
        action: &'static str,
        reason: String,
    },

    #[error("Failed to encode {action}: {reason}")]
    Encode {
        action: &'static str,
        reason: String,
    },
}

/// Errors surfaced by the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The action was refused; state is unchanged.
    #[error("Action rejected: {0}")]
    Rejected(ActionError),

    /// State access broke an invariant; the caller must halt.
    #[error("Fatal state fault: {0}")]
    Fatal(StateError),

    #[error("Decode failed: {0}")]
    Decode(#[from] WireError),
}

impl ExecutionError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExecutionError::Fatal(_))
    }
}

impl From<ActionError> for ExecutionError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::State(state) => ExecutionError::Fatal(state),
            other => ExecutionError::Rejected(other),
        }
    }
}

impl From<StateError> for ExecutionError {
    fn from(err: StateError) -> Self {
        ExecutionError::Fatal(err)
    }
}

/// Ledger configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid native coin: {0}")]
    InvalidCoin(ActionError),

    #[error("Duplicate pricing model id: {0}")]
    DuplicatePricingModel(u8),
}

/// Genesis initialisation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("Failed to parse genesis: {0}")]
    Parse(String),

    #[error("Invalid ledger config: {0}")]
    Config(#[from] ConfigError),

    #[error("Duplicate allocation for {0}")]
    DuplicateAllocation(Address),

    #[error("Total supply overflows u64")]
    SupplyOverflow,

    #[error("State error: {0}")]
    State(#[from] StateError),
}
