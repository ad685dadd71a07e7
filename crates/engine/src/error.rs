// VDB - Visual Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error and warning types of the session model.
//!
//! Only loading a trace can fail. Everything downstream degrades: malformed
//! records become [`IntegrityWarning`]s, out-of-range navigation is clamped and
//! an empty trace simply yields empty views.

use thiserror::Error;
use vdb_common::types::CallId;

/// Recoverable failure while obtaining a session payload
#[derive(Debug, Error)]
pub enum SessionError {
    /// The tracer reported failure or shipped no payload
    #[error("trace unavailable: {message}")]
    TraceUnavailable {
        /// Upstream message, or a generic one when the backend sent none
        message: String,
    },
    /// The payload is not valid JSON for the expected shape
    #[error("malformed trace payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Data-integrity problem found in a trace; the offending record is skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityWarning {
    /// A call id occurs more than once; the first record is kept
    #[error("duplicate call id {call_id} (record #{record}); keeping the first occurrence")]
    DuplicateCallId {
        /// Repeated id
        call_id: CallId,
        /// Position of the skipped record
        record: usize,
    },
    /// Following parent pointers from `call_id` revisits an id
    #[error("parent chain of {call_id} loops back through {revisited}")]
    ParentCycle {
        /// Call whose parent chain loops
        call_id: CallId,
        /// Id that would have been visited twice
        revisited: CallId,
    },
    /// A call names a parent that is not in the hierarchy
    #[error("call {call_id} names unknown parent {parent_id}; treating it as a root")]
    UnknownParent {
        /// Orphaned call
        call_id: CallId,
        /// Missing parent
        parent_id: CallId,
    },
    /// A return step references a call that is not in the hierarchy
    #[error("return step {step} references unknown call {call_id}")]
    UnknownReturnCall {
        /// Step index of the return event
        step: usize,
        /// Unknown id
        call_id: CallId,
    },
    /// A step carries an index that disagrees with its position
    #[error("step at position {position} claims index {claimed}; using the position")]
    StepIndexMismatch {
        /// Actual position in the trace
        position: usize,
        /// Index shipped by the tracer
        claimed: usize,
    },
    /// A call's reported stack depth disagrees with its position in the rebuilt tree
    #[error("call {call_id} reports stack depth {reported} but sits at depth {expected}")]
    StackDepthMismatch {
        /// Call id
        call_id: CallId,
        /// Depth shipped by the tracer
        reported: usize,
        /// Depth implied by the parent chain
        expected: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages_name_the_ids() {
        let warning = IntegrityWarning::ParentCycle {
            call_id: CallId::from("a"),
            revisited: CallId::from("b"),
        };
        assert_eq!(warning.to_string(), "parent chain of a loops back through b");

        let err = SessionError::TraceUnavailable { message: "No code provided".into() };
        assert!(err.to_string().contains("No code provided"));
    }
}
