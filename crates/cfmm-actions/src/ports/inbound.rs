//! Inbound Ports (Driving Ports / API)

use cfmm_state::StateKeys;
use shared_types::Address;

use crate::actions::Action;
use crate::domain::errors::ExecutionError;
use crate::domain::results::ActionOutput;

/// Primary action execution API.
pub trait ActionExecutionApi: Send + Sync {
    /// Execute one action and commit its writes atomically.
    ///
    /// On any error nothing is committed.
    fn execute(&self, actor: &Address, action: &Action) -> Result<ActionOutput, ExecutionError>;

    /// Decode `type_id ‖ bincode(params)` and execute.
    fn execute_encoded(
        &self,
        actor: &Address,
        bytes: &[u8],
    ) -> Result<ActionOutput, ExecutionError>;

    /// Keys the action will touch, computed without reading state.
    fn declared_keys(&self, actor: &Address, action: &Action) -> StateKeys {
        action.state_keys(actor)
    }
}
