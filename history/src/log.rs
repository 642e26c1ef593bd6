//! The two-stack command log.

use onto_store::EntityStore;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::command::{ApplyFailure, Command, CommandKind, Direction, IdChange};
use crate::error::{HistoryError, HistoryResult};

/// Identifier of a recorded command, unique within one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// What happens to a command whose replay the store rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayFailurePolicy {
    /// Drop it from history.
    #[default]
    Drop,
    /// Put it back on the stack it was popped from so it can be retried.
    /// Commands that modified the store before failing are dropped anyway.
    Retain,
}

/// A command held by the log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: CommandId,
    pub command: Command,
}

/// Undo/redo history.
///
/// Both stacks keep their most recent entry at the back.
#[derive(Debug, Default)]
pub struct CommandLog {
    undo: VecDeque<LogEntry>,
    redo: Vec<LogEntry>,
    next_id: u64,
    limit: Option<usize>,
    policy: ReplayFailurePolicy,
}

impl CommandLog {
    /// Create an unbounded log that drops failed commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of undoable commands. The oldest are evicted first.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.set_limit(limit);
        self
    }

    pub fn with_policy(mut self, policy: ReplayFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.evict();
    }

    pub fn policy(&self) -> ReplayFailurePolicy {
        self.policy
    }

    /// Record a committed mutation. Starts a new branch of history, so
    /// everything that could have been redone is discarded.
    pub fn record(&mut self, command: Command) -> CommandId {
        self.next_id += 1;
        let id = CommandId(self.next_id);

        self.redo.clear();
        self.undo.push_back(LogEntry { id, command });
        self.evict();
        id
    }

    /// Revert the most recent command. Returns `Ok(None)` if there is
    /// nothing to undo.
    pub fn undo<S: EntityStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> HistoryResult<Option<CommandKind>> {
        let Some(entry) = self.undo.pop_back() else {
            return Ok(None);
        };
        self.replay(store, entry, Direction::Reverse).map(Some)
    }

    /// Re-apply the most recently undone command. Returns `Ok(None)` if
    /// there is nothing to redo.
    pub fn redo<S: EntityStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> HistoryResult<Option<CommandKind>> {
        let Some(entry) = self.redo.pop() else {
            return Ok(None);
        };
        self.replay(store, entry, Direction::Forward).map(Some)
    }

    fn replay<S: EntityStore + ?Sized>(
        &mut self,
        store: &mut S,
        mut entry: LogEntry,
        direction: Direction,
    ) -> HistoryResult<CommandKind> {
        let kind = entry.command.kind();

        match entry.command.apply(store, direction) {
            Ok(changes) => {
                self.apply_id_changes(&changes);
                tracing::debug!(id = %entry.id, %kind, %direction, "replayed command");
                match direction {
                    Direction::Reverse => self.redo.push(entry),
                    Direction::Forward => self.undo.push_back(entry),
                }
                Ok(kind)
            }
            Err(ApplyFailure {
                error,
                changes,
                progressed,
            }) => {
                self.apply_id_changes(&changes);
                let retained = self.policy == ReplayFailurePolicy::Retain && !progressed;
                let id = entry.id;

                if retained {
                    tracing::warn!(%id, %kind, %direction, %error, "replay failed, command retained");
                    match direction {
                        Direction::Reverse => self.undo.push_back(entry),
                        Direction::Forward => self.redo.push(entry),
                    }
                } else {
                    tracing::warn!(%id, %kind, %direction, %error, progressed, "replay failed, command dropped");
                }

                Err(HistoryError::ReplayFailed {
                    id,
                    kind,
                    direction,
                    retained,
                    source: error,
                })
            }
        }
    }

    /// Rewrite every held command to the identities that replaced old ones.
    ///
    /// Replays call this themselves. Callers use it for re-inserts that
    /// happen outside the log, such as relationships restored after an
    /// aborted cascade.
    pub fn apply_id_changes(&mut self, changes: &[IdChange]) {
        for change in changes {
            for entry in self.undo.iter_mut().chain(self.redo.iter_mut()) {
                entry.command.remap(*change);
            }
        }
    }

    fn evict(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.undo.len() > limit {
            if let Some(evicted) = self.undo.pop_front() {
                tracing::debug!(id = %evicted.id, kind = %evicted.command.kind(), "evicted from history");
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// The command the next `undo` would revert.
    pub fn peek_undo(&self) -> Option<&LogEntry> {
        self.undo.back()
    }

    /// The command the next `redo` would re-apply.
    pub fn peek_redo(&self) -> Option<&LogEntry> {
        self.redo.last()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
