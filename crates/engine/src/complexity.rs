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

//! Coarse complexity classification of a run.
//!
//! The heuristic only looks at direct parent/child recursion in the call
//! forest and at loop keywords in the source lines the trace visited. A
//! report shipped by the tracer replaces the heuristic outright.
//!
//! | signal                                         | time     |
//! |------------------------------------------------|----------|
//! | a call has two or more same-named children     | `O(2^n)` |
//! | a call is a same-named child of its parent     | `O(n)`   |
//! | a loop keyword appears on an executed line     | `O(n)`   |
//! | nothing                                        | `O(1)`   |
//!
//! Space is `O(n)` exactly when recursion is present.

use tracing::debug;
use vdb_common::types::{
    ComplexityReport, EventType, LoopDetail, LoopKind, CONSTANT, EXPONENTIAL, LINEAR,
};

use crate::{CallTree, SessionConfig, TraceStore};

/// Where a run's complexity report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexitySource {
    /// Shipped by the tracer
    External,
    /// Computed locally
    Heuristic,
}

/// Pick the report for a run: the tracer's own if present, otherwise the heuristic
pub fn complexity_report(
    store: &TraceStore,
    tree: &CallTree,
    config: &SessionConfig,
) -> (ComplexityReport, ComplexitySource) {
    match store.external_complexity() {
        Some(report) => {
            debug!("Using complexity report shipped by the tracer: {}", report.time);
            (report.clone(), ComplexitySource::External)
        }
        None => (classify(store, tree, config), ComplexitySource::Heuristic),
    }
}

/// Classify a run from its call forest and visited source lines
pub fn classify(store: &TraceStore, tree: &CallTree, config: &SessionConfig) -> ComplexityReport {
    let mut has_recursion = false;
    let mut branching = false;
    for (slot, node) in tree.iter().enumerate() {
        let same_named = tree.children(slot).filter(|child| child.function == node.function).count();
        has_recursion |= same_named > 0;
        branching |= same_named >= 2;
    }

    let loop_details = detect_loops(store, config);
    let has_loops = !loop_details.is_empty();

    let time = if branching {
        EXPONENTIAL
    } else if has_recursion || has_loops {
        LINEAR
    } else {
        CONSTANT
    };
    let space = if has_recursion { LINEAR } else { CONSTANT };

    ComplexityReport {
        time: time.to_string(),
        space: space.to_string(),
        has_recursion,
        has_loops,
        loop_details,
    }
}

/// Every executed `step` event whose source line holds a loop keyword
fn detect_loops(store: &TraceStore, config: &SessionConfig) -> Vec<LoopDetail> {
    let Some(source) = store.source() else { return Vec::new() };
    store
        .steps()
        .iter()
        .filter(|step| step.event_type == EventType::Step)
        .filter_map(|step| {
            let text = source.line(step.line?)?;
            let keyword = loop_keyword(text, &config.loop_keywords)?;
            Some(LoopDetail {
                line: text.to_string(),
                nesting_level: step.stack_depth,
                kind: match keyword {
                    "for" => Some(LoopKind::For),
                    "while" => Some(LoopKind::While),
                    _ => None,
                },
            })
        })
        .collect()
}

/// First word of `text` that is one of `keywords`
fn loop_keyword<'a>(text: &'a str, keywords: &[String]) -> Option<&'a str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .find(|word| keywords.iter().any(|keyword| keyword == word))
}
