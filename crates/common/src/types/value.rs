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

//! Display helpers for opaque value snapshots.
//!
//! Values are never type-inspected; they are serialized on display.

use serde_json::{Map, Value};

/// Render a value for display: strings verbatim, everything else as compact JSON
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Render argument values in insertion order joined by `", "`
pub fn render_args(args: &Map<String, Value>) -> String {
    args.values().map(render_value).collect::<Vec<_>>().join(", ")
}

/// Render a value, cutting it at `max_chars` characters with a trailing ellipsis
pub fn render_value_truncated(value: &Value, max_chars: usize) -> String {
    let rendered = render_value(value);
    if rendered.chars().count() <= max_chars {
        return rendered;
    }
    let mut cut: String = rendered.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
