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

use std::collections::{hash_map::Entry, VecDeque};

use tracing::{debug, warn};
use vdb_common::types::{render_args, CallRecord};

use super::{CallTree, CallTreeNode, NodeId};
use crate::IntegrityWarning;

impl CallTree {
    /// Build the forest from call records in discovery order.
    ///
    /// Never fails. Duplicate ids, dangling parents and parent chains that
    /// would close a cycle are reported as warnings and the affected record
    /// is kept out of the structure (duplicates) or promoted to a root.
    pub fn build(records: &[CallRecord]) -> Self {
        let mut tree = Self::default();
        let mut kept: Vec<&CallRecord> = Vec::with_capacity(records.len());

        // First pass: one node per distinct call id
        for (position, record) in records.iter().enumerate() {
            match tree.index.entry(record.call_id.clone()) {
                Entry::Occupied(_) => {
                    tree.warnings.push(IntegrityWarning::DuplicateCallId {
                        call_id: record.call_id.clone(),
                        record: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(tree.nodes.len());
                    tree.nodes.push(CallTreeNode {
                        id: record.call_id.clone(),
                        function: record.function.clone(),
                        label: format!("{}({})", record.function, render_args(&record.args)),
                        depth: 0,
                        stack_depth: record.stack_depth,
                        parent: None,
                        children: Vec::new(),
                    });
                    kept.push(record);
                }
            }
        }

        // Second pass: attach children in record order
        for (child, record) in kept.iter().enumerate() {
            let Some(parent_id) = &record.parent_id else {
                tree.roots.push(child);
                continue;
            };
            let Some(parent) = tree.slot(parent_id) else {
                tree.warnings.push(IntegrityWarning::UnknownParent {
                    call_id: record.call_id.clone(),
                    parent_id: parent_id.clone(),
                });
                tree.roots.push(child);
                continue;
            };
            if tree.closes_cycle(child, parent) {
                tree.warnings.push(IntegrityWarning::ParentCycle {
                    call_id: record.call_id.clone(),
                    revisited: parent_id.clone(),
                });
                tree.roots.push(child);
                continue;
            }
            tree.nodes[child].parent = Some(parent);
            tree.nodes[parent].children.push(child);
        }

        tree.assign_depths();

        for warning in &tree.warnings {
            warn!("{warning}");
        }
        debug!("Built call tree with {} nodes and {} roots", tree.nodes.len(), tree.roots.len());
        tree
    }

    /// Whether making `parent` the parent of `child` would close a cycle.
    ///
    /// Only already-attached edges are followed, and those always form a
    /// forest, so the walk ends after at most one step per node.
    fn closes_cycle(&self, child: NodeId, parent: NodeId) -> bool {
        let mut cursor = Some(parent);
        let mut hops = 0;
        while let Some(slot) = cursor {
            if slot == child || hops > self.nodes.len() {
                return true;
            }
            cursor = self.nodes[slot].parent;
            hops += 1;
        }
        false
    }

    fn assign_depths(&mut self) {
        let mut queue: VecDeque<(NodeId, usize)> = self.roots.iter().map(|&r| (r, 0)).collect();
        while let Some((slot, depth)) = queue.pop_front() {
            let node = &mut self.nodes[slot];
            node.depth = depth;
            if node.stack_depth != depth {
                self.warnings.push(IntegrityWarning::StackDepthMismatch {
                    call_id: node.id.clone(),
                    reported: node.stack_depth,
                    expected: depth,
                });
            }
            queue.extend(self.nodes[slot].children.iter().map(|&child| (child, depth + 1)));
        }
    }
}
