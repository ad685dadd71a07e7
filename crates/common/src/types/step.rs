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

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};

use super::CallId;

/// Kind of instant a step event records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// A line executed inside a frame
    #[default]
    #[display("step")]
    Step,
    /// A function was entered
    #[display("call")]
    Call,
    /// A function returned
    #[display("return")]
    Return,
    /// An exception was raised
    #[display("exception")]
    Exception,
}

/// One frame of the call stack at a given step, outermost first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// Function executing in this frame
    pub function: String,
    /// Line in this frame (entry line for the tracer's frames)
    #[serde(default, deserialize_with = "deserialize_line")]
    pub line: Option<u32>,
    /// Call this frame belongs to
    #[serde(default, alias = "call_id", skip_serializing_if = "Option::is_none")]
    pub call_id: Option<CallId>,
    /// Parent call of this frame
    #[serde(default, alias = "parent_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CallId>,
}

/// One observed instant of execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEvent {
    /// Ordinal position in the trace. Tracers usually omit it; the store assigns it.
    #[serde(default)]
    pub index: Option<usize>,
    /// Executing function
    #[serde(default, alias = "functionName")]
    pub function: String,
    /// Source line at this instant; values below 1 are treated as absent
    #[serde(default, alias = "lineNumber", deserialize_with = "deserialize_line")]
    pub line: Option<u32>,
    /// Kind of event
    #[serde(default)]
    pub event_type: EventType,
    /// Call record this step belongs to (None for module-level steps)
    #[serde(default, alias = "call_id")]
    pub call_id: Option<CallId>,
    /// The tracer's copy of the owning call's parent
    #[serde(default, alias = "parent_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CallId>,
    /// Depth of the call stack at this instant
    #[serde(default, alias = "stack_depth")]
    pub stack_depth: usize,
    /// Variable name to value snapshot
    #[serde(default)]
    pub variables: serde_json::Map<String, serde_json::Value>,
    /// Frames of the call stack, outermost first
    #[serde(default)]
    pub call_stack: Vec<StackFrame>,
    /// Value returned, only on return events. A present `null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "deserialize_present")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<serde_json::Value>,
    /// Text printed while this step ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Whether this step carries an exception
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    /// Exception message when `error` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StepEvent {
    /// Create a plain step event
    pub fn new(function: impl Into<String>, event_type: EventType) -> Self {
        Self {
            index: None,
            function: function.into(),
            line: None,
            event_type,
            call_id: None,
            parent_id: None,
            stack_depth: 0,
            variables: serde_json::Map::new(),
            call_stack: Vec::new(),
            return_value: None,
            output: None,
            error: false,
            error_message: None,
        }
    }

    /// Set the owning call
    pub fn with_call(mut self, call_id: impl Into<CallId>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    /// Set the source line
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the stack depth
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    /// Set the return value
    pub fn with_return_value(mut self, value: serde_json::Value) -> Self {
        self.return_value = Some(value);
        self
    }

    /// Add a variable snapshot
    pub fn with_variable(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Whether this is a return event
    pub fn is_return(&self) -> bool {
        self.event_type == EventType::Return
    }

    /// Whether this step reports an exception
    pub fn is_exception(&self) -> bool {
        self.error || self.event_type == EventType::Exception
    }
}

/// Accept any integer line; values below 1 (the tracer uses -1) mean "no line"
fn deserialize_line<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|line| *line >= 1).and_then(|line| u32::try_from(line).ok()))
}

/// Keep a present `null` apart from a missing field
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
