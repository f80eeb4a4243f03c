//! Action registry
//!
//! Maps wire type ids to decoders. Built once; new actions are appended,
//! never renumbered.

use std::collections::BTreeMap;
use std::fmt;

use bincode::Options;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::actions::{
    wire_options, Action, ActionHandler, ClaimDomain, CreateLiquidityPool, CreateToken,
    GetTokenAddress, Hi, Transfer, Whois,
};
use crate::domain::errors::WireError;

type Decoder = fn(&[u8]) -> Result<Action, WireError>;

fn decode_as<T>(payload: &[u8]) -> Result<Action, WireError>
where
    T: ActionHandler + DeserializeOwned + Into<Action>,
{
    wire_options()
        .deserialize::<T>(payload)
        .map(Into::into)
        .map_err(|e| WireError::Malformed {
            action: T::NAME,
            reason: e.to_string(),
        })
}

#[derive(Clone)]
pub struct ActionRegistry {
    decoders: BTreeMap<u8, (&'static str, Decoder)>,
}

impl ActionRegistry {
    /// Registry with every built-in action.
    pub fn new() -> Self {
        let mut registry = Self {
            decoders: BTreeMap::new(),
        };
        registry.register::<Transfer>();
        registry.register::<Hi>();
        registry.register::<ClaimDomain>();
        registry.register::<Whois>();
        registry.register::<CreateToken>();
        registry.register::<GetTokenAddress>();
        registry.register::<CreateLiquidityPool>();
        registry
    }

    fn register<T>(&mut self)
    where
        T: ActionHandler + DeserializeOwned + Into<Action>,
    {
        self.decoders.insert(T::TYPE_ID, (T::NAME, decode_as::<T>));
    }

    /// Decode `type_id ‖ bincode(params)`.
    pub fn decode(&self, bytes: &[u8]) -> Result<Action, WireError> {
        let (&type_id, payload) = bytes.split_first().ok_or(WireError::Empty)?;
        let (name, decoder) = self
            .decoders
            .get(&type_id)
            .ok_or(WireError::UnknownActionType(type_id))?;
        debug!(type_id, action = name, len = payload.len(), "Decoding action");
        decoder(payload)
    }

    pub fn name_of(&self, type_id: u8) -> Option<&'static str> {
        self.decoders.get(&type_id).map(|(name, _)| *name)
    }

    /// Registered ids in ascending order.
    pub fn type_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.decoders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.decoders.iter().map(|(id, (name, _))| (id, name)))
            .finish()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
