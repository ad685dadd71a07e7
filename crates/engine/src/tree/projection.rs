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

//! Per-cursor projection of the call tree.
//!
//! A projection decides, for one cursor position and view mode, which nodes
//! are shown, which return values are known and which nodes lie on the
//! active path. Nodes that are not shown (synthetic wrappers, or calls the
//! cursor has not reached yet in stepwise mode) are elided and their shown
//! descendants are spliced up to the nearest shown ancestor.

use serde::Serialize;
use serde_json::Value;
use vdb_common::types::CallId;

use super::{CallTree, NodeId};
use crate::{ActivePath, SessionConfig, TraceStore, ViewMode};

/// Label of the artificial root wrapping several true roots
pub const SYNTHETIC_ROOT_LABEL: &str = "root";

/// One node of the displayed tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    /// Call id, `None` only for the synthetic root
    pub id: Option<CallId>,
    /// Function name
    pub function: String,
    /// Display label
    pub label: String,
    /// Return value known at this projection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    /// Whether the node lies on the active path
    pub active: bool,
    /// Whether the node owns the step under the cursor
    pub current: bool,
    /// Shown children in call order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    /// Whether this is the artificial root
    pub fn is_synthetic_root(&self) -> bool {
        self.id.is_none()
    }

    /// Number of nodes in this subtree, synthetic root excluded
    pub fn count(&self) -> usize {
        let own = usize::from(!self.is_synthetic_root());
        own + self.children.iter().map(ViewNode::count).sum::<usize>()
    }

    /// Depth-first pre-order walk over the subtree
    pub fn walk(&self) -> Vec<&ViewNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Find a node by call id
    pub fn find(&self, call_id: &CallId) -> Option<&ViewNode> {
        self.walk().into_iter().find(|node| node.id.as_ref() == Some(call_id))
    }
}

/// Inputs of one projection
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    /// Base tree
    pub tree: &'a CallTree,
    /// Trace the tree was built from
    pub store: &'a TraceStore,
    /// Synthetic-node filter
    pub config: &'a SessionConfig,
    /// View mode
    pub mode: ViewMode,
    /// Cursor, `None` for an empty trace
    pub cursor: Option<usize>,
    /// Active path at the cursor
    pub active: &'a ActivePath,
}

impl Projection<'_> {
    /// Project the forest.
    ///
    /// Returns `None` when nothing is shown, the single shown root when
    /// there is exactly one, and a synthetic root otherwise.
    pub fn project(&self) -> Option<ViewNode> {
        let mut roots: Vec<ViewNode> =
            self.tree.roots().iter().flat_map(|&root| self.project_node(root)).collect();
        match roots.len() {
            0 => None,
            1 => roots.pop(),
            _ => Some(ViewNode {
                id: None,
                function: SYNTHETIC_ROOT_LABEL.to_string(),
                label: SYNTHETIC_ROOT_LABEL.to_string(),
                return_value: None,
                active: false,
                current: false,
                children: roots,
            }),
        }
    }

    /// Whether a call is visible in this projection
    pub fn is_shown(&self, slot: NodeId) -> bool {
        let Some(node) = self.tree.node(slot) else { return false };
        if self.config.is_synthetic(&node.function) {
            return false;
        }
        match self.mode {
            ViewMode::Full => true,
            ViewMode::Stepwise => match self.store.first_step_of(&node.id) {
                Some(first) => self.cursor.is_some_and(|cursor| first <= cursor),
                None => true,
            },
        }
    }

    /// Return value of a call known at this projection
    pub fn return_value(&self, call_id: &CallId) -> Option<&Value> {
        let index = self.store.return_step_of(call_id)?;
        if self.mode == ViewMode::Stepwise && self.cursor.is_none_or(|cursor| index > cursor) {
            return None;
        }
        self.store.return_value_of(call_id)
    }

    fn current_call(&self) -> Option<&CallId> {
        self.cursor.and_then(|cursor| self.store.step(cursor)).and_then(|step| step.call_id.as_ref())
    }

    /// The projected subtrees rooted at `slot`: one node when it is shown,
    /// otherwise its spliced shown descendants
    fn project_node(&self, slot: NodeId) -> Vec<ViewNode> {
        let Some(node) = self.tree.node(slot) else { return Vec::new() };
        let children: Vec<ViewNode> =
            node.children.iter().flat_map(|&child| self.project_node(child)).collect();
        if !self.is_shown(slot) {
            return children;
        }
        vec![ViewNode {
            id: Some(node.id.clone()),
            function: node.function.clone(),
            label: node.label.clone(),
            return_value: self.return_value(&node.id).cloned(),
            active: self.active.contains(&node.id),
            current: self.current_call() == Some(&node.id),
            children,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vdb_common::types::{CallRecord, DebugPayload, EventType, StepEvent};

    fn module_payload() -> DebugPayload {
        DebugPayload::new(
            vec![
                StepEvent::new("<module>", EventType::Step).with_call("m"),
                StepEvent::new("fact", EventType::Step).with_call("f1").with_depth(1),
                StepEvent::new("fact", EventType::Step).with_call("f2").with_depth(2),
                StepEvent::new("fact", EventType::Return)
                    .with_call("f2")
                    .with_depth(2)
                    .with_return_value(json!(1)),
                StepEvent::new("fact", EventType::Return)
                    .with_call("f1")
                    .with_depth(1)
                    .with_return_value(json!(2)),
                StepEvent::new("show", EventType::Step).with_call("s").with_depth(1),
            ],
            vec![
                CallRecord::new("m", "<module>", None, 0),
                CallRecord::new("f1", "fact", Some(CallId::from("m")), 1),
                CallRecord::new("f2", "fact", Some(CallId::from("f1")), 2),
                CallRecord::new("s", "show", Some(CallId::from("m")), 1),
            ],
        )
    }

    fn project(
        store: &TraceStore,
        config: &SessionConfig,
        mode: ViewMode,
        cursor: usize,
    ) -> Option<ViewNode> {
        let tree = CallTree::build(store.calls());
        let current = store.step(cursor).and_then(|step| step.call_id.as_ref());
        let active = ActivePath::resolve(store, current);
        Projection { tree: &tree, store, config, mode, cursor: Some(cursor), active: &active }
            .project()
    }

    #[test]
    fn test_synthetic_module_is_spliced() {
        let store = TraceStore::from_payload(module_payload());
        let root = project(&store, &SessionConfig::default(), ViewMode::Full, 5).unwrap();

        // `<module>` is elided, leaving `fact` and `show` as siblings under a synthetic root
        assert!(root.is_synthetic_root());
        let labels: Vec<_> = root.children.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["fact()", "show()"]);
        assert_eq!(root.count(), 3);
    }

    #[test]
    fn test_unfiltered_keeps_single_root() {
        let store = TraceStore::from_payload(module_payload());
        let config = SessionConfig::default().with_synthetic_filter(false);
        let root = project(&store, &config, ViewMode::Full, 0).unwrap();
        assert_eq!(root.id, Some(CallId::from("m")));
        assert_eq!(root.count(), 4);
    }

    #[test]
    fn test_stepwise_hides_unreached_calls_and_returns() {
        let store = TraceStore::from_payload(module_payload());
        let config = SessionConfig::default();

        let root = project(&store, &config, ViewMode::Stepwise, 2).unwrap();
        assert_eq!(root.id, Some(CallId::from("f1")));
        assert!(root.active);
        assert!(!root.current);
        let inner = root.find(&CallId::from("f2")).unwrap();
        assert!(inner.current);
        assert_eq!(inner.return_value, None);

        let root = project(&store, &config, ViewMode::Stepwise, 3).unwrap();
        assert_eq!(root.find(&CallId::from("f2")).and_then(|n| n.return_value.clone()), Some(json!(1)));
        assert_eq!(root.return_value, None);

        let root = project(&store, &config, ViewMode::Full, 2).unwrap();
        assert_eq!(root.find(&CallId::from("f1")).and_then(|n| n.return_value.clone()), Some(json!(2)));
        assert!(root.find(&CallId::from("s")).is_some());
    }

    #[test]
    fn test_null_return_is_attached() {
        let store = TraceStore::from_payload(DebugPayload::new(
            vec![
                StepEvent::new("main", EventType::Step).with_call("main_1"),
                StepEvent::new("main", EventType::Return).with_call("main_1"),
            ],
            vec![CallRecord::new("main_1", "main", None, 0)],
        ));
        let config = SessionConfig::default();

        assert_eq!(project(&store, &config, ViewMode::Stepwise, 0).unwrap().return_value, None);
        let root = project(&store, &config, ViewMode::Stepwise, 1).unwrap();
        assert_eq!(root.return_value, Some(Value::Null));
        let root = project(&store, &config, ViewMode::Full, 0).unwrap();
        assert_eq!(root.return_value, Some(Value::Null));
    }

    #[test]
    fn test_empty_forest_projects_to_nothing() {
        let store = TraceStore::from_payload(DebugPayload::new(
            vec![StepEvent::new("f", EventType::Step)],
            Vec::new(),
        ));
        assert_eq!(project(&store, &SessionConfig::default(), ViewMode::Full, 0), None);
    }
}
