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

//! Debug session: one loaded trace plus the navigation state over it.
//!
//! [`DebugSession`] owns the immutable [`TraceStore`], the call tree and the
//! complexity report computed once at load time, and the only mutable state
//! of the model: the timeline cursor and the view mode. Everything shown at a
//! cursor position is derived on demand by [`DebugSession::view`], so asking
//! twice without navigating in between yields equal views.

use serde::Serialize;
use tracing::{debug, info};
use vdb_common::types::{CallId, ComplexityReport, DebugPayload, DebugResponse, StepEvent};

use crate::{
    complexity_report, ActivePath, CallTree, ComplexitySource, ExecutionStatistics,
    IntegrityWarning, Projection, SessionConfig, SessionError, TimelineCursor, TraceStore,
    ViewMode, ViewNode,
};

/// Everything derived at one cursor position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Cursor position, `None` for an empty trace
    pub cursor: Option<usize>,
    /// Number of steps in the trace
    pub total_steps: usize,
    /// View mode the tree was projected with
    pub mode: ViewMode,
    /// Step under the cursor
    pub step: Option<StepEvent>,
    /// Calls enclosing the current step, current first
    pub active_path: ActivePath,
    /// Projected call tree
    pub tree: Option<ViewNode>,
}

/// A loaded trace and the cursor over it
#[derive(Debug, Clone)]
pub struct DebugSession {
    store: TraceStore,
    tree: CallTree,
    complexity: ComplexityReport,
    complexity_source: ComplexitySource,
    cursor: TimelineCursor,
    mode: ViewMode,
    config: SessionConfig,
}

impl DebugSession {
    /// Build a session over a loaded trace
    pub fn new(store: TraceStore, config: SessionConfig) -> Self {
        let tree = CallTree::build(store.calls());
        let (complexity, complexity_source) = complexity_report(&store, &tree, &config);
        let cursor = TimelineCursor::new(store.len());
        info!(
            "Session ready: {} steps, {} calls, time {} ({:?})",
            store.len(),
            tree.len(),
            complexity.time,
            complexity_source
        );
        Self { store, tree, complexity, complexity_source, cursor, mode: config.view_mode, config }
    }

    /// Build a session from a payload
    pub fn from_payload(payload: DebugPayload, config: SessionConfig) -> Self {
        Self::new(TraceStore::from_payload(payload), config)
    }

    /// Build a session from a backend response
    pub fn from_response(
        response: DebugResponse,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        Ok(Self::new(TraceStore::from_response(response)?, config))
    }

    /// Parse a backend response and build a session
    pub fn from_json_str(text: &str, config: SessionConfig) -> Result<Self, SessionError> {
        Ok(Self::new(TraceStore::from_json_str(text)?, config))
    }

    /// The loaded trace
    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    /// The rebuilt call tree
    pub fn tree(&self) -> &CallTree {
        &self.tree
    }

    /// Complexity report of the run
    pub fn complexity(&self) -> &ComplexityReport {
        &self.complexity
    }

    /// Whether the complexity report was shipped or computed
    pub fn complexity_source(&self) -> ComplexitySource {
        self.complexity_source
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current cursor position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor.position()
    }

    /// Current view mode
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Step under the cursor
    pub fn current_step(&self) -> Option<&StepEvent> {
        self.cursor.position().and_then(|index| self.store.step(index))
    }

    /// Call owning the step under the cursor
    pub fn current_call(&self) -> Option<&CallId> {
        self.current_step().and_then(|step| step.call_id.as_ref())
    }

    /// Active path at the cursor
    pub fn active_path(&self) -> ActivePath {
        ActivePath::resolve(&self.store, self.current_call())
    }

    /// Project the call tree at the cursor in the current mode
    pub fn projection(&self) -> Option<ViewNode> {
        let active = self.active_path();
        self.project_with(&active)
    }

    fn project_with(&self, active: &ActivePath) -> Option<ViewNode> {
        Projection {
            tree: &self.tree,
            store: &self.store,
            config: &self.config,
            mode: self.mode,
            cursor: self.cursor.position(),
            active,
        }
        .project()
    }

    /// Everything derived at the cursor
    pub fn view(&self) -> SessionView {
        let active_path = self.active_path();
        SessionView {
            cursor: self.cursor.position(),
            total_steps: self.store.len(),
            mode: self.mode,
            step: self.current_step().cloned(),
            tree: self.project_with(&active_path),
            active_path,
        }
    }

    /// Whole-run statistics
    pub fn statistics(&self) -> ExecutionStatistics {
        ExecutionStatistics::collect(&self.store)
    }

    /// Integrity warnings found while loading and building the tree
    pub fn integrity_warnings(&self) -> impl Iterator<Item = &IntegrityWarning> + '_ {
        self.store.warnings().iter().chain(self.tree.warnings())
    }

    /// Advance one step
    pub fn next(&mut self) -> Option<usize> {
        self.cursor.next()
    }

    /// Go back one step
    pub fn prev(&mut self) -> Option<usize> {
        self.cursor.prev()
    }

    /// Go to the first step
    pub fn first(&mut self) -> Option<usize> {
        self.cursor.first()
    }

    /// Go to the last step
    pub fn last(&mut self) -> Option<usize> {
        self.cursor.last()
    }

    /// Go to a step, clamping out-of-range indices
    pub fn jump_to_step(&mut self, index: i64) -> Option<usize> {
        self.cursor.jump_to(index)
    }

    /// Go to the first step of a call; no-op when the call owns no step
    pub fn jump_to_call(&mut self, call_id: &CallId) -> Option<usize> {
        match self.store.first_step_of(call_id) {
            Some(index) => {
                debug!("Jumping to first step {index} of call {call_id}");
                self.cursor.jump_to(i64::try_from(index).unwrap_or(i64::MAX))
            }
            None => {
                debug!("Call {call_id} owns no steps, cursor unchanged");
                self.cursor.position()
            }
        }
    }

    /// Switch the view mode
    pub fn set_mode(&mut self, mode: ViewMode) -> ViewMode {
        debug!("View mode {} -> {mode}", self.mode);
        self.mode = mode;
        mode
    }

    /// Flip between stepwise and full views
    pub fn toggle_mode(&mut self) -> ViewMode {
        self.set_mode(self.mode.toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vdb_common::types::{CallRecord, EventType};

    fn session() -> DebugSession {
        let payload = DebugPayload::new(
            vec![
                StepEvent::new("fact", EventType::Step).with_call(1u64).with_line(1),
                StepEvent::new("fact", EventType::Step).with_call(2u64).with_line(1).with_depth(1),
                StepEvent::new("fact", EventType::Return)
                    .with_call(2u64)
                    .with_depth(1)
                    .with_return_value(json!(1)),
                StepEvent::new("fact", EventType::Return)
                    .with_call(1u64)
                    .with_return_value(json!(2)),
            ],
            vec![
                CallRecord::new(1u64, "fact", None, 0).with_arg("n", json!(2)),
                CallRecord::new(2u64, "fact", Some(CallId::from(1u64)), 1).with_arg("n", json!(1)),
            ],
        );
        DebugSession::from_payload(payload, SessionConfig::default())
    }

    #[test]
    fn test_navigation() {
        let mut session = session();
        assert_eq!(session.cursor(), Some(0));
        assert_eq!(session.next(), Some(1));
        assert_eq!(session.current_call(), Some(&CallId::from(2u64)));
        assert_eq!(session.last(), Some(3));
        assert_eq!(session.jump_to_call(&CallId::from(2u64)), Some(1));
        assert_eq!(session.jump_to_call(&CallId::from("missing")), Some(1));
        assert_eq!(session.jump_to_step(-1), Some(0));
    }

    #[test]
    fn test_view_follows_cursor() {
        let mut session = session();
        session.jump_to_step(2);
        let view = session.view();
        assert_eq!(view.cursor, Some(2));
        assert_eq!(view.total_steps, 4);
        assert_eq!(view.active_path.len(), 2);

        let tree = view.tree.unwrap();
        assert_eq!(tree.label, "fact(2)");
        assert_eq!(tree.return_value, None);
        assert_eq!(tree.children[0].return_value, Some(json!(1)));
        assert!(tree.children[0].current);
    }

    #[test]
    fn test_mode_toggle_only_changes_projection() {
        let mut session = session();
        let before = session.view();
        assert_eq!(session.toggle_mode(), ViewMode::Full);
        let full = session.projection().unwrap();
        assert_eq!(full.return_value, Some(json!(2)));
        assert_eq!(session.cursor(), before.cursor);
        assert_eq!(session.tree().len(), 2);

        session.set_mode(ViewMode::Stepwise);
        assert_eq!(session.view(), before);
    }

    #[test]
    fn test_failed_response_is_recoverable() {
        let result = DebugSession::from_json_str(
            r#"{"success": false, "error": "No code provided"}"#,
            SessionConfig::default(),
        );
        assert!(matches!(result, Err(SessionError::TraceUnavailable { .. })));
    }
}
