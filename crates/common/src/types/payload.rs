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

use serde::{Deserialize, Serialize};

use super::{CallRecord, ComplexityReport, StepEvent};

/// Session payload of one debug run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugPayload {
    /// Sequential step events
    #[serde(default)]
    pub debug_states: Vec<StepEvent>,
    /// Call records in discovery (call) order
    #[serde(default, alias = "call_hierarchy")]
    pub call_hierarchy: Vec<CallRecord>,
    /// Authoritative complexity analysis shipped by the tracer, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<ComplexityReport>,
    /// Source text of the traced program, if the tracer echoes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl DebugPayload {
    /// Create a payload from steps and call records
    pub fn new(debug_states: Vec<StepEvent>, call_hierarchy: Vec<CallRecord>) -> Self {
        Self { debug_states, call_hierarchy, complexity: None, source: None }
    }

    /// Attach an authoritative complexity report
    pub fn with_complexity(mut self, report: ComplexityReport) -> Self {
        self.complexity = Some(report);
        self
    }

    /// Attach the traced program's source text
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Response envelope returned by the tracer backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    /// Whether the backend produced a trace
    #[serde(default)]
    pub success: bool,
    /// The session payload (only meaningful when `success` is set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_states: Option<DebugPayload>,
    /// Backend error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Backend request id, for correlating with its logs
    #[serde(default, alias = "request_id", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl DebugResponse {
    /// Wrap a payload in a successful response
    pub fn success(payload: DebugPayload) -> Self {
        Self { success: true, debug_states: Some(payload), error: None, request_id: None }
    }

    /// A failed response with a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, debug_states: None, error: Some(message.into()), request_id: None }
    }

    /// Parse a response from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
