//! Ontograph History
//!
//! Reversible command log for structural graph edits.
//!
//! Responsibilities:
//! - Wrap each committed mutation in a reversible [`Command`]
//! - Maintain the undo and redo stacks
//! - Replay commands in either direction directly against the store
//! - Keep snapshots pointing at live identities after re-inserts
//!
//! Re-inserting a deleted node or edge yields a fresh identity. Every such
//! change is reported as an [`IdChange`] and propagated to every command the
//! log still holds, so a long undo/redo sequence keeps replaying against
//! rows that exist.

mod command;
mod error;
mod log;
mod remap;

pub use command::{Command, CommandKind, Direction, IdChange};
pub use error::{HistoryError, HistoryResult};
pub use log::{CommandId, CommandLog, LogEntry, ReplayFailurePolicy};
pub use remap::{remap_edges, remap_node};
