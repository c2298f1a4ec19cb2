//! Per-record workflow lock.
//!
//! Only one multi-step workflow may run on a record at a time. A second
//! attempt is rejected immediately instead of queueing behind the first.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use dh_core::RecordId;

use crate::error::{SheetError, SheetResult};

/// The set of records with a workflow in flight.
#[derive(Debug, Default)]
pub struct WorkflowLocks {
    active: Mutex<HashSet<RecordId>>,
}

impl WorkflowLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a record. The claim is released when the guard drops.
    pub fn acquire(&self, record: RecordId) -> SheetResult<WorkflowGuard<'_>> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(record) {
            return Err(SheetError::WorkflowBusy(record));
        }
        Ok(WorkflowGuard {
            locks: self,
            record,
        })
    }

    /// Whether a workflow is running on the record.
    pub fn is_locked(&self, record: RecordId) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&record)
    }
}

/// Holds a record's workflow claim.
#[derive(Debug)]
pub struct WorkflowGuard<'a> {
    locks: &'a WorkflowLocks,
    record: RecordId,
}

impl Drop for WorkflowGuard<'_> {
    fn drop(&mut self) {
        self.locks
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.record);
    }
}
