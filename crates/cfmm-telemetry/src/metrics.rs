//! Prometheus metrics for the CFMM ledger.
//!
//! All metrics follow the naming convention: `cfmm_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // EXECUTION METRICS
    // =========================================================================

    /// Actions that executed and committed, by action name
    pub static ref ACTIONS_EXECUTED: IntCounterVec = IntCounterVec::new(
        Opts::new("cfmm_actions_executed_total", "Actions executed and committed"),
        &["action"]
    ).expect("metric creation failed");

    /// Actions rejected with a user-facing error, by action name
    pub static ref ACTIONS_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("cfmm_actions_rejected_total", "Actions rejected without state change"),
        &["action"]
    ).expect("metric creation failed");

    /// Internal state faults (undeclared keys, corrupt values, backend errors)
    pub static ref STATE_FAULTS: IntCounter = IntCounter::new(
        "cfmm_state_faults_total",
        "Fatal state-access faults raised during execution"
    ).expect("metric creation failed");

    /// Executor wall time, by action name
    pub static ref ACTION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "cfmm_action_duration_seconds",
            "Time spent executing one action"
        ).buckets(exponential_buckets(0.000_001, 2.0, 16).expect("valid buckets")),
        &["action"]
    ).expect("metric creation failed");

    // =========================================================================
    // ORDERING METRICS
    // =========================================================================

    /// Batches scheduled into parallel groups
    pub static ref BATCHES_SCHEDULED: IntCounter = IntCounter::new(
        "cfmm_ordering_batches_scheduled_total",
        "Action batches scheduled by the reference scheduler"
    ).expect("metric creation failed");
}

/// Proof that the metrics are registered.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _registered: (),
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(ACTIONS_EXECUTED.clone()),
        Box::new(ACTIONS_REJECTED.clone()),
        Box::new(STATE_FAULTS.clone()),
        Box::new(ACTION_DURATION.clone()),
        Box::new(BATCHES_SCHEDULED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _registered: () })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
