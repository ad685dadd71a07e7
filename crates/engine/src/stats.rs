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

//! Whole-run execution statistics.

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use crate::TraceStore;

/// A function name with an occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCount {
    /// Function name
    pub function: String,
    /// Occurrences
    pub count: usize,
}

/// A value returned at some step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnEntry {
    /// Step index of the return event
    pub step: usize,
    /// Returning function
    pub function: String,
    /// Returned value
    pub value: Value,
}

/// Aggregate counters over one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatistics {
    /// Number of steps
    pub total_steps: usize,
    /// Deepest stack depth reached by any step
    pub max_depth: usize,
    /// Steps per function, most frequent first
    pub function_steps: Vec<FunctionCount>,
    /// Calls per function, most frequent first
    pub function_calls: Vec<FunctionCount>,
    /// Return events that carried a value, in step order
    pub returns: Vec<ReturnEntry>,
    /// Number of exception events
    pub exception_count: usize,
    /// `(step, stack depth)` for every step
    pub depth_series: Vec<(usize, usize)>,
}

impl ExecutionStatistics {
    /// Compute statistics for a run
    pub fn collect(store: &TraceStore) -> Self {
        let steps = store.steps();
        Self {
            total_steps: steps.len(),
            max_depth: steps.iter().map(|step| step.stack_depth).max().unwrap_or(0),
            function_steps: ranked(steps.iter().map(|step| step.function.as_str())),
            function_calls: ranked(
                store
                    .calls()
                    .iter()
                    .unique_by(|call| call.call_id.clone())
                    .map(|call| call.function.as_str()),
            ),
            returns: steps
                .iter()
                .enumerate()
                .filter(|(_, step)| step.is_return())
                .map(|(index, step)| ReturnEntry {
                    step: index,
                    function: step.function.clone(),
                    value: step.return_value.clone().unwrap_or(Value::Null),
                })
                .collect(),
            exception_count: steps.iter().filter(|step| step.is_exception()).count(),
            depth_series: steps.iter().enumerate().map(|(i, step)| (i, step.stack_depth)).collect(),
        }
    }

    /// Number of return values observed
    pub fn return_count(&self) -> usize {
        self.returns.len()
    }
}

fn ranked<'a>(names: impl Iterator<Item = &'a str>) -> Vec<FunctionCount> {
    names
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(function, count)| FunctionCount { function: function.to_string(), count })
        .collect()
}
