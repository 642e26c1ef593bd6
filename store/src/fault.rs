//! Failure injection for the in-memory store.

use std::collections::HashMap;

use crate::error::{StoreError, StoreOp, StoreResult};

/// Armed one-shot failures, keyed by operation.
///
/// An entry `op -> n` lets `n` more calls of `op` succeed and fails the one
/// after. The entry is disarmed once it fires.
#[derive(Debug, Default)]
pub struct FaultPlan {
    pending: HashMap<StoreOp, usize>,
}

impl FaultPlan {
    pub fn arm(&mut self, op: StoreOp, successes_before: usize) {
        self.pending.insert(op, successes_before);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn check(&mut self, op: StoreOp) -> StoreResult<()> {
        let Some(remaining) = self.pending.get_mut(&op) else {
            return Ok(());
        };
        if *remaining == 0 {
            self.pending.remove(&op);
            tracing::debug!(%op, "firing injected store failure");
            return Err(StoreError::Injected { op });
        }
        *remaining -= 1;
        Ok(())
    }
}
