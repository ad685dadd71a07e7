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
use serde::{Deserialize, Serialize};

/// Constant-time label
pub const CONSTANT: &str = "O(1)";
/// Linear label
pub const LINEAR: &str = "O(n)";
/// Exponential label
pub const EXPONENTIAL: &str = "O(2^n)";

/// Loop construct that introduced a loop detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopKind {
    /// `for` loop
    #[display("for")]
    For,
    /// `while` loop
    #[display("while")]
    While,
}

/// One loop-bearing line observed in the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopDetail {
    /// Raw source text of the line
    pub line: String,
    /// Nesting level (stack depth of the step, or the backend's own count)
    #[serde(alias = "nesting_level")]
    pub nesting_level: usize,
    /// Loop construct, when known
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<LoopKind>,
}

/// Coarse asymptotic classification of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    /// Time complexity label, e.g. "O(n)"
    pub time: String,
    /// Space complexity label, e.g. "O(1)"
    pub space: String,
    /// Whether any call recurses
    #[serde(default, alias = "has_recursion")]
    pub has_recursion: bool,
    /// Whether any loop was observed
    #[serde(default, alias = "has_loops")]
    pub has_loops: bool,
    /// Loop-bearing lines
    #[serde(default, alias = "loop_details")]
    pub loop_details: Vec<LoopDetail>,
}

impl Default for ComplexityReport {
    fn default() -> Self {
        Self {
            time: CONSTANT.to_string(),
            space: CONSTANT.to_string(),
            has_recursion: false,
            has_loops: false,
            loop_details: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_report_shape() {
        let report: ComplexityReport = serde_json::from_value(json!({
            "time": "O(n^2)",
            "space": "O(1)",
            "has_recursion": false,
            "has_loops": true,
            "loop_details": [
                {"type": "for", "line": "for i in range(n):", "nesting_level": 1},
                {"type": "while", "line": "    while j < i:", "nesting_level": 2}
            ]
        }))
        .unwrap();

        assert_eq!(report.time, "O(n^2)");
        assert!(report.has_loops);
        assert_eq!(report.loop_details[1].kind, Some(LoopKind::While));
        assert_eq!(report.loop_details[1].nesting_level, 2);
    }

    #[test]
    fn test_default_is_constant() {
        let report = ComplexityReport::default();
        assert_eq!(report.time, CONSTANT);
        assert_eq!(report.space, CONSTANT);
        assert!(!report.has_recursion);
        assert!(report.loop_details.is_empty());
    }
}
