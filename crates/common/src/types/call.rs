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

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identifier of one function invocation.
///
/// Tracers ship either strings (`"fact_2"`) or integers (`2`); both are
/// normalised to their textual form so `2` and `"2"` name the same call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(from = "RawCallId", into = "String")]
pub struct CallId(String);

impl CallId {
    /// Create a call id from any textual form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The textual form of this id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CallId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for CallId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<CallId> for String {
    fn from(id: CallId) -> Self {
        id.0
    }
}

/// Call id as it appears on the wire (string or number)
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCallId {
    Number(i64),
    String(String),
}

impl From<RawCallId> for CallId {
    fn from(raw: RawCallId) -> Self {
        match raw {
            RawCallId::Number(n) => Self(n.to_string()),
            RawCallId::String(s) => Self(s),
        }
    }
}

/// One function invocation as recorded by the tracer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Unique identifier, stable for the invocation's lifetime
    #[serde(alias = "call_id")]
    pub call_id: CallId,
    /// Function name
    pub function: String,
    /// Enclosing invocation (None for top-level calls)
    #[serde(default, alias = "parent_id")]
    pub parent_id: Option<CallId>,
    /// Parameter name to argument value, captured at call time
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub args: serde_json::Map<String, serde_json::Value>,
    /// Depth at which this call executes (0 = top level)
    #[serde(default, alias = "stack_depth")]
    pub stack_depth: usize,
    /// Source line where the invocation started
    #[serde(default, alias = "entry_line", skip_serializing_if = "Option::is_none")]
    pub entry_line: Option<i64>,
    /// The tracer's own child list; informational only, the tree is rebuilt from `parent_id`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CallId>,
}

impl CallRecord {
    /// Create a call record with no arguments
    pub fn new(
        call_id: impl Into<CallId>,
        function: impl Into<String>,
        parent_id: Option<CallId>,
        stack_depth: usize,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            function: function.into(),
            parent_id,
            args: serde_json::Map::new(),
            stack_depth,
            entry_line: None,
            children: Vec::new(),
        }
    }

    /// Attach an argument snapshot
    pub fn with_arg(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_id_accepts_numbers_and_strings() {
        let numeric: CallId = serde_json::from_value(json!(2)).unwrap();
        let textual: CallId = serde_json::from_value(json!("2")).unwrap();
        assert_eq!(numeric, textual);
        assert_eq!(numeric.as_str(), "2");

        let named: CallId = serde_json::from_value(json!("fact_2")).unwrap();
        assert_eq!(named.to_string(), "fact_2");
    }

    #[test]
    fn test_call_record_snake_case() {
        let record: CallRecord = serde_json::from_value(json!({
            "call_id": "fact_2",
            "parent_id": "<module>_1",
            "function": "fact",
            "entry_line": 1,
            "stack_depth": 1,
            "children": ["fact_3"]
        }))
        .unwrap();

        assert_eq!(record.call_id, CallId::from("fact_2"));
        assert_eq!(record.parent_id, Some(CallId::from("<module>_1")));
        assert_eq!(record.stack_depth, 1);
        assert_eq!(record.entry_line, Some(1));
        assert_eq!(record.children, vec![CallId::from("fact_3")]);
        assert!(record.args.is_empty());
    }

    #[test]
    fn test_call_record_camel_case_with_args() {
        let record: CallRecord = serde_json::from_value(json!({
            "callId": 1,
            "function": "fib",
            "parentId": null,
            "args": {"n": 5, "memo": null}
        }))
        .unwrap();

        assert_eq!(record.call_id, CallId::from(1u64));
        assert_eq!(record.parent_id, None);
        assert_eq!(record.stack_depth, 0);
        let names: Vec<&String> = record.args.keys().collect();
        assert_eq!(names, ["n", "memo"]);
    }
}
