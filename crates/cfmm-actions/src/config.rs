//! Ledger configuration
//!
//! `LedgerConfig` is what operators write; [`LedgerConfig::initialize`]
//! validates it once and yields the immutable [`LedgerParams`] every
//! executor receives.

use std::collections::BTreeMap;

use cfmm_state::{token_address, TokenInfo};
use serde::{Deserialize, Serialize};
use shared_types::Address;

use crate::actions::create_token::validate_token_fields;
use crate::domain::errors::ConfigError;

/// A registered pricing curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingModelConfig {
    pub id: u8,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Native coin name
    pub coin_name: String,
    /// Native coin ticker
    pub coin_symbol: String,
    /// Native coin description
    pub coin_metadata: String,
    /// Native coin decimals
    pub coin_decimals: u8,
    /// Pricing models pools may reference
    pub pricing_models: Vec<PricingModelConfig>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            coin_name: "CFMMVM".to_string(),
            coin_symbol: "CVM".to_string(),
            coin_metadata: "A constant-function market-maker VM implementation".to_string(),
            coin_decimals: 9,
            pricing_models: vec![
                PricingModelConfig {
                    id: 0,
                    label: "constant-sum".to_string(),
                },
                PricingModelConfig {
                    id: 1,
                    label: "constant-product".to_string(),
                },
            ],
        }
    }
}

impl LedgerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate and derive the runtime parameters.
    pub fn initialize(&self) -> Result<LedgerParams, ConfigError> {
        validate_token_fields(
            self.coin_name.as_bytes(),
            self.coin_symbol.as_bytes(),
            self.coin_metadata.as_bytes(),
            self.coin_decimals,
        )
        .map_err(ConfigError::InvalidCoin)?;

        let mut models = BTreeMap::new();
        for model in &self.pricing_models {
            if models.insert(model.id, model.label.clone()).is_some() {
                return Err(ConfigError::DuplicatePricingModel(model.id));
            }
        }

        let coin_info = TokenInfo {
            name: self.coin_name.as_bytes().to_vec(),
            symbol: self.coin_symbol.as_bytes().to_vec(),
            metadata: self.coin_metadata.as_bytes().to_vec(),
            decimals: self.coin_decimals,
            owner: Address::ZERO,
        };
        let coin = token_address(&coin_info.name, &coin_info.symbol, &coin_info.metadata);

        Ok(LedgerParams {
            coin,
            coin_info,
            pricing_models: PricingModels(models),
        })
    }
}

/// Pricing model id to label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PricingModels(BTreeMap<u8, String>);

impl PricingModels {
    pub fn contains(&self, id: u8) -> bool {
        self.0.contains_key(&id)
    }

    pub fn label(&self, id: u8) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable parameters handed to every executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerParams {
    coin: Address,
    coin_info: TokenInfo,
    pricing_models: PricingModels,
}

impl LedgerParams {
    /// Address of the native coin.
    pub fn coin(&self) -> Address {
        self.coin
    }

    /// Token record written for the native coin at genesis.
    pub fn coin_info(&self) -> &TokenInfo {
        &self.coin_info
    }

    pub fn pricing_models(&self) -> &PricingModels {
        &self.pricing_models
    }
}
