//! Action executors.
//!
//! Every action is a parameter struct implementing [`ActionHandler`]. The
//! closed [`Action`] enum dispatches over them and owns the wire format:
//!
//! ```text
//! type_id:u8 ‖ bincode(params)
//! ```

pub mod balance;
pub mod claim_domain;
pub mod create_liquidity_pool;
pub mod create_token;
pub mod get_token_address;
pub mod hi;
pub mod transfer;
pub mod whois;

pub use claim_domain::ClaimDomain;
pub use create_liquidity_pool::CreateLiquidityPool;
pub use create_token::CreateToken;
pub use get_token_address::GetTokenAddress;
pub use hi::Hi;
pub use transfer::Transfer;
pub use whois::Whois;

use bincode::Options;
use cfmm_state::{MutableState, StateKeys};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use crate::config::LedgerParams;
use crate::domain::errors::{ActionError, WireError};
use crate::domain::results::ActionOutput;
use crate::domain::value_objects::ValidityWindow;

// Wire type ids. Append only.
pub const TRANSFER_ID: u8 = 0;
pub const HI_ID: u8 = 1;
pub const CLAIM_DOMAIN_ID: u8 = 2;
pub const WHOIS_ID: u8 = 3;
pub const CREATE_TOKEN_ID: u8 = 4;
pub const GET_TOKEN_ADDRESS_ID: u8 = 5;
pub const CREATE_LIQUIDITY_POOL_ID: u8 = 6;

/// A deterministic state transition.
///
/// `state_keys` must name every key `execute` touches, with at least the
/// access it needs; it is computed without reading state.
pub trait ActionHandler {
    const TYPE_ID: u8;
    const NAME: &'static str;
    const COMPUTE_UNITS: u64;

    type Output: Into<ActionOutput>;

    fn state_keys(&self, actor: &Address) -> StateKeys;

    fn valid_range(&self) -> ValidityWindow {
        ValidityWindow::ALWAYS
    }

    /// Run against a view of the declared keys. All fallible checks run
    /// before the first write.
    fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        actor: &Address,
        params: &LedgerParams,
    ) -> Result<Self::Output, ActionError>;
}

/// Any action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Transfer(Transfer),
    Hi(Hi),
    ClaimDomain(ClaimDomain),
    Whois(Whois),
    CreateToken(CreateToken),
    GetTokenAddress(GetTokenAddress),
    CreateLiquidityPool(CreateLiquidityPool),
}

macro_rules! dispatch {
    ($action:expr, $inner:ident => $body:expr) => {
        match $action {
            Action::Transfer($inner) => $body,
            Action::Hi($inner) => $body,
            Action::ClaimDomain($inner) => $body,
            Action::Whois($inner) => $body,
            Action::CreateToken($inner) => $body,
            Action::GetTokenAddress($inner) => $body,
            Action::CreateLiquidityPool($inner) => $body,
        }
    };
}

fn type_id_of<T: ActionHandler>(_: &T) -> u8 {
    T::TYPE_ID
}

/// Fixed-width little-endian bincode. Decoding rejects trailing bytes, so
/// every action has exactly one encoding.
pub(crate) fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

fn name_of<T: ActionHandler>(_: &T) -> &'static str {
    T::NAME
}

fn compute_units_of<T: ActionHandler>(_: &T) -> u64 {
    T::COMPUTE_UNITS
}

impl Action {
    pub fn type_id(&self) -> u8 {
        dispatch!(self, a => type_id_of(a))
    }

    pub fn name(&self) -> &'static str {
        dispatch!(self, a => name_of(a))
    }

    pub fn compute_units(&self) -> u64 {
        dispatch!(self, a => compute_units_of(a))
    }

    pub fn state_keys(&self, actor: &Address) -> StateKeys {
        dispatch!(self, a => a.state_keys(actor))
    }

    pub fn valid_range(&self) -> ValidityWindow {
        dispatch!(self, a => a.valid_range())
    }

    pub fn execute<S: MutableState + ?Sized>(
        &self,
        state: &mut S,
        actor: &Address,
        params: &LedgerParams,
    ) -> Result<ActionOutput, ActionError> {
        dispatch!(self, a => a.execute(state, actor, params).map(Into::into))
    }

    /// `type_id ‖ bincode(params)`.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut out = vec![self.type_id()];
        let name = self.name();
        dispatch!(self, a => wire_options().serialize_into(&mut out, a)).map_err(|e| {
            WireError::Encode {
                action: name,
                reason: e.to_string(),
            }
        })?;
        Ok(out)
    }
}

macro_rules! impl_from_action {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Action {
                fn from(action: $variant) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_action!(
    Transfer,
    Hi,
    ClaimDomain,
    Whois,
    CreateToken,
    GetTokenAddress,
    CreateLiquidityPool,
);
