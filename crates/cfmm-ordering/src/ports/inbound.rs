//! Inbound Ports (Driving Ports / API)

use cfmm_actions::ActionExecutionApi;

use crate::domain::entities::ExecutionSchedule;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{ActionOutcome, BatchEntry};

/// Primary batch scheduling API.
pub trait ActionOrderingApi: Send + Sync {
    /// Group a batch into parallel groups from declared keys alone.
    ///
    /// Pure: reads no state.
    fn schedule(&self, entries: &[BatchEntry]) -> Result<ExecutionSchedule, OrderingError>;

    /// Schedule, then execute each group through `executor`.
    ///
    /// Outcomes come back sorted by submission index. A fatal state fault
    /// stops execution after the group it occurred in.
    fn execute_batch<E: ActionExecutionApi>(
        &self,
        executor: &E,
        entries: Vec<BatchEntry>,
    ) -> Result<Vec<ActionOutcome>, OrderingError>;
}
