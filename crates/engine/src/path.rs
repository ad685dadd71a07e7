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

//! Active path: the chain of calls enclosing the step under the cursor.
//!
//! The walk follows the call records' own parent pointers rather than the
//! rebuilt tree, and carries a visited set so a malformed chain ends in a
//! warning instead of a loop.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;
use vdb_common::types::CallId;

use crate::{IntegrityWarning, TraceStore};

/// Calls from the current one up to its root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivePath {
    /// Call ids ordered current → root
    chain: Vec<CallId>,
    /// Set when the parent chain revisited an id
    #[serde(skip)]
    cycle: Option<IntegrityWarning>,
}

impl ActivePath {
    /// Resolve the path starting at `current`
    pub fn resolve(store: &TraceStore, current: Option<&CallId>) -> Self {
        let mut path = Self::default();
        let Some(start) = current else { return path };

        let mut visited = HashSet::new();
        let mut next = Some(start.clone());
        while let Some(call_id) = next.take() {
            if !visited.insert(call_id.clone()) {
                let warning =
                    IntegrityWarning::ParentCycle { call_id: start.clone(), revisited: call_id };
                warn!("{warning}");
                path.cycle = Some(warning);
                break;
            }
            let Some(record) = store.call(&call_id) else { break };
            next = record.parent_id.clone();
            path.chain.push(call_id);
        }
        path
    }

    /// Whether `call_id` is on the path
    pub fn contains(&self, call_id: &CallId) -> bool {
        self.chain.contains(call_id)
    }

    /// The current call, if any
    pub fn current(&self) -> Option<&CallId> {
        self.chain.first()
    }

    /// The outermost call reached
    pub fn root(&self) -> Option<&CallId> {
        self.chain.last()
    }

    /// Ids ordered current → root
    pub fn iter(&self) -> impl Iterator<Item = &CallId> + '_ {
        self.chain.iter()
    }

    /// Number of calls on the path
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The cycle warning raised while walking, if any
    pub fn cycle(&self) -> Option<&IntegrityWarning> {
        self.cycle.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdb_common::types::{CallRecord, DebugPayload};

    fn store_of(records: Vec<CallRecord>) -> TraceStore {
        TraceStore::from_payload(DebugPayload::new(Vec::new(), records))
    }

    #[test]
    fn test_path_runs_to_root() {
        let store = store_of(vec![
            CallRecord::new("1", "main", None, 0),
            CallRecord::new("2", "f", Some(CallId::from("1")), 1),
            CallRecord::new("3", "g", Some(CallId::from("2")), 2),
        ]);
        let path = ActivePath::resolve(&store, Some(&CallId::from("3")));
        let ids: Vec<_> = path.iter().map(CallId::as_str).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(path.current().map(CallId::as_str), Some("3"));
        assert_eq!(path.root().map(CallId::as_str), Some("1"));
        assert!(path.cycle().is_none());
    }

    #[test]
    fn test_cycle_guard() {
        let store = store_of(vec![
            CallRecord::new("a", "f", Some(CallId::from("b")), 0),
            CallRecord::new("b", "g", Some(CallId::from("a")), 0),
        ]);
        let path = ActivePath::resolve(&store, Some(&CallId::from("a")));
        assert_eq!(path.len(), 2);
        assert_eq!(
            path.cycle(),
            Some(&IntegrityWarning::ParentCycle {
                call_id: CallId::from("a"),
                revisited: CallId::from("a"),
            })
        );

        let store = store_of(vec![CallRecord::new("s", "f", Some(CallId::from("s")), 0)]);
        let path = ActivePath::resolve(&store, Some(&CallId::from("s")));
        assert_eq!(path.len(), 1);
        assert!(path.cycle().is_some());
    }

    #[test]
    fn test_unknown_ids_stop_the_walk() {
        let store = store_of(vec![CallRecord::new("2", "f", Some(CallId::from("404")), 1)]);
        let path = ActivePath::resolve(&store, Some(&CallId::from("2")));
        assert_eq!(path.iter().collect::<Vec<_>>(), vec![&CallId::from("2")]);

        assert!(ActivePath::resolve(&store, Some(&CallId::from("nope"))).is_empty());
        assert!(ActivePath::resolve(&store, None).is_empty());
    }
}
