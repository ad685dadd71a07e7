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

//! Trace store: the immutable payload of one debug run.
//!
//! The store owns the step list and the call records and builds the lookup
//! indices every derived view needs (call id → record, call id → first step,
//! call id → first return step). It is populated once per run and never
//! mutated afterwards.

use std::collections::HashMap;

use tracing::{info, warn};
use vdb_common::types::{
    CallId, CallRecord, ComplexityReport, DebugPayload, DebugResponse, StepEvent,
};

use crate::{IntegrityWarning, SessionError};

/// Value of a return step that ships no `returnValue` at all
static NO_RETURN_VALUE: serde_json::Value = serde_json::Value::Null;

/// Source text of the traced program, addressed by 1-based line number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    /// Split `text` into lines
    pub fn new(text: &str) -> Self {
        Self { lines: text.lines().map(str::to_string).collect() }
    }

    /// Text of a 1-based line, if it exists
    pub fn line(&self, number: u32) -> Option<&str> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there is no text at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Immutable session payload plus lookup indices
#[derive(Debug, Clone, Default)]
pub struct TraceStore {
    steps: Vec<StepEvent>,
    calls: Vec<CallRecord>,
    /// Call id to position of its first record
    call_index: HashMap<CallId, usize>,
    /// Call id to index of the first step that belongs to it
    first_step: HashMap<CallId, usize>,
    /// Call id to index of its first return step
    return_step: HashMap<CallId, usize>,
    external_complexity: Option<ComplexityReport>,
    source: Option<SourceText>,
    warnings: Vec<IntegrityWarning>,
}

impl TraceStore {
    /// Build a store from a backend response; a non-success response builds nothing
    pub fn from_response(response: DebugResponse) -> Result<Self, SessionError> {
        if !response.success {
            let message =
                response.error.unwrap_or_else(|| "debugging failed on the backend".to_string());
            return Err(SessionError::TraceUnavailable { message });
        }
        let payload = response.debug_states.ok_or_else(|| SessionError::TraceUnavailable {
            message: "response carries no debug states".to_string(),
        })?;
        Ok(Self::from_payload(payload))
    }

    /// Parse a backend response from JSON text and build a store
    pub fn from_json_str(text: &str) -> Result<Self, SessionError> {
        Self::from_response(DebugResponse::from_json_str(text)?)
    }

    /// Build a store from a payload
    pub fn from_payload(payload: DebugPayload) -> Self {
        let DebugPayload { debug_states: mut steps, call_hierarchy: calls, complexity, source } =
            payload;
        let mut warnings = Vec::new();

        for (position, step) in steps.iter_mut().enumerate() {
            if let Some(claimed) = step.index.filter(|claimed| *claimed != position) {
                warnings.push(IntegrityWarning::StepIndexMismatch { position, claimed });
            }
            step.index = Some(position);
        }

        let mut call_index = HashMap::with_capacity(calls.len());
        for (position, call) in calls.iter().enumerate() {
            // Duplicates are reported by the tree builder; lookups keep the first record.
            call_index.entry(call.call_id.clone()).or_insert(position);
        }

        let mut first_step = HashMap::new();
        let mut return_step = HashMap::new();
        for (index, step) in steps.iter().enumerate() {
            let Some(call_id) = &step.call_id else { continue };
            first_step.entry(call_id.clone()).or_insert(index);
            if step.is_return() {
                if call_index.contains_key(call_id) {
                    return_step.entry(call_id.clone()).or_insert(index);
                } else {
                    warnings.push(IntegrityWarning::UnknownReturnCall {
                        step: index,
                        call_id: call_id.clone(),
                    });
                }
            }
        }

        for warning in &warnings {
            warn!("{warning}");
        }
        info!("Loaded trace with {} steps and {} call records", steps.len(), calls.len());

        Self {
            steps,
            calls,
            call_index,
            first_step,
            return_step,
            external_complexity: complexity,
            source: source.as_deref().map(SourceText::new),
            warnings,
        }
    }

    /// Replace the program source text (e.g. supplied by the caller rather than the tracer)
    pub fn with_source(mut self, text: &str) -> Self {
        self.source = Some(SourceText::new(text));
        self
    }

    /// All step events in order
    pub fn steps(&self) -> &[StepEvent] {
        &self.steps
    }

    /// Step at `index`
    pub fn step(&self, index: usize) -> Option<&StepEvent> {
        self.steps.get(index)
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All call records in discovery order, duplicates included
    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    /// First record with the given id
    pub fn call(&self, call_id: &CallId) -> Option<&CallRecord> {
        self.call_index.get(call_id).and_then(|&position| self.calls.get(position))
    }

    /// Index of the first step belonging to `call_id`
    pub fn first_step_of(&self, call_id: &CallId) -> Option<usize> {
        self.first_step.get(call_id).copied()
    }

    /// Index of the first return step of `call_id`
    pub fn return_step_of(&self, call_id: &CallId) -> Option<usize> {
        self.return_step.get(call_id).copied()
    }

    /// Return value of `call_id`, present whenever the call has a return step
    ///
    /// A return step without a value (a function returning nothing) yields `null`.
    pub fn return_value_of(&self, call_id: &CallId) -> Option<&serde_json::Value> {
        self.return_step_of(call_id)
            .and_then(|index| self.steps.get(index))
            .map(|step| step.return_value.as_ref().unwrap_or(&NO_RETURN_VALUE))
    }

    /// Complexity report shipped by the tracer, if any
    pub fn external_complexity(&self) -> Option<&ComplexityReport> {
        self.external_complexity.as_ref()
    }

    /// Program source text, if known
    pub fn source(&self) -> Option<&SourceText> {
        self.source.as_ref()
    }

    /// Integrity warnings found while loading
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vdb_common::types::EventType;

    fn factorial_payload() -> DebugPayload {
        DebugPayload::new(
            vec![
                StepEvent::new("fact", EventType::Step).with_call(1u64).with_line(2),
                StepEvent::new("fact", EventType::Step).with_call(2u64).with_line(2),
                StepEvent::new("fact", EventType::Return)
                    .with_call(2u64)
                    .with_return_value(json!(1)),
                StepEvent::new("fact", EventType::Return)
                    .with_call(1u64)
                    .with_return_value(json!(2)),
            ],
            vec![
                CallRecord::new(1u64, "fact", None, 0),
                CallRecord::new(2u64, "fact", Some(CallId::from(1u64)), 1),
            ],
        )
    }

    #[test]
    fn test_indices_are_assigned() {
        let store = TraceStore::from_payload(factorial_payload());
        let indices: Vec<_> = store.steps().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3)]);
        assert!(store.warnings().is_empty());
    }

    #[test]
    fn test_lookups() {
        let store = TraceStore::from_payload(factorial_payload());
        let two = CallId::from(2u64);
        assert_eq!(store.first_step_of(&two), Some(1));
        assert_eq!(store.return_step_of(&two), Some(2));
        assert_eq!(store.return_value_of(&two), Some(&json!(1)));
        assert_eq!(store.call(&two).map(|c| c.stack_depth), Some(1));
        assert_eq!(store.first_step_of(&CallId::from("missing")), None);
    }

    #[test]
    fn test_mismatched_index_is_replaced() {
        let mut payload = factorial_payload();
        payload.debug_states[1].index = Some(7);
        let store = TraceStore::from_payload(payload);
        assert_eq!(store.step(1).and_then(|s| s.index), Some(1));
        assert_eq!(
            store.warnings(),
            &[IntegrityWarning::StepIndexMismatch { position: 1, claimed: 7 }]
        );
    }

    #[test]
    fn test_return_for_unknown_call_is_ignored() {
        let mut payload = factorial_payload();
        payload.debug_states.push(
            StepEvent::new("ghost", EventType::Return).with_call("ghost").with_return_value(json!(0)),
        );
        let store = TraceStore::from_payload(payload);
        assert_eq!(store.return_step_of(&CallId::from("ghost")), None);
        assert!(matches!(store.warnings(), [IntegrityWarning::UnknownReturnCall { step: 4, .. }]));
    }

    #[test]
    fn test_failed_response_builds_nothing() {
        let err = TraceStore::from_response(DebugResponse::failure("Unsupported language: js"))
            .unwrap_err();
        assert!(matches!(err, SessionError::TraceUnavailable { ref message } if message.contains("js")));

        let err = TraceStore::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
    }

    #[test]
    fn test_source_lines_are_one_based() {
        let source = SourceText::new("def f(n):\n    for i in range(n):\n        pass\n");
        assert_eq!(source.line(2), Some("    for i in range(n):"));
        assert_eq!(source.line(0), None);
        assert_eq!(source.line(9), None);
        assert_eq!(source.len(), 3);
    }
}
