//! History error types.

use onto_store::StoreError;
use thiserror::Error;

use crate::command::{CommandKind, Direction};
use crate::log::CommandId;

/// Result type for undo/redo operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors raised while replaying a command.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The store rejected a replayed operation. When `retained` is true the
    /// command is back on the stack it came from and can be retried;
    /// otherwise it has been dropped from history.
    #[error("{direction} of {kind} command {id} failed: {source}")]
    ReplayFailed {
        id: CommandId,
        kind: CommandKind,
        direction: Direction,
        retained: bool,
        source: StoreError,
    },
}

impl HistoryError {
    /// The command that failed.
    pub fn command_id(&self) -> CommandId {
        match self {
            HistoryError::ReplayFailed { id, .. } => *id,
        }
    }

    /// Returns true if the failed command is still in history.
    pub fn is_retained(&self) -> bool {
        match self {
            HistoryError::ReplayFailed { retained, .. } => *retained,
        }
    }
}
