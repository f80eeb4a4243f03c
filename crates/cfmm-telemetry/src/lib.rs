//! # CFMM Telemetry
//!
//! Logging and metrics for the CFMM ledger crates.
//!
//! Library crates only emit `tracing` events and bump the counters in
//! [`metrics`]; binaries and test harnesses call [`init_telemetry`] once to
//! install a subscriber and register the counters.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cfmm_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _metrics = init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CFMM_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CFMM_JSON_LOGS` | `false` | JSON log lines instead of pretty output |
//! | `CFMM_SERVICE_NAME` | `cfmm-ledger` | Service name attached to startup logs |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ACTIONS_EXECUTED, ACTIONS_REJECTED,
    ACTION_DURATION, BATCHES_SCHEDULED, STATE_FAULTS,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics and install the global subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<MetricsHandle, TelemetryError> {
    let metrics = register_metrics()?;
    init_tracing(config)?;
    Ok(metrics)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
