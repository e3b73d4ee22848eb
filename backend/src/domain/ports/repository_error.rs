//! Failures shared by every persistence port.

use crate::domain::{LimitExceeded, LimitKind};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A capped creation was refused inside the store's critical section.
        LimitExceeded { kind: LimitKind } => "{kind} limit reached",
        /// The parent row vanished before the write landed.
        ParentMissing { resource: String } => "parent {resource} no longer exists",
        /// The row being updated no longer exists.
        Missing { resource: String } => "{resource} no longer exists",
        /// A uniqueness constraint was violated.
        Duplicate { message: String } => "duplicate record: {message}",
    }
}

impl From<LimitExceeded> for RepositoryError {
    fn from(value: LimitExceeded) -> Self {
        Self::limit_exceeded(value.kind)
    }
}
