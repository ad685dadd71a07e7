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

//! Call tree rebuilt from the flat call-record list.
//!
//! The forest lives in an arena ([`CallTree::nodes`]) addressed by [`NodeId`],
//! with a map from [`CallId`] to arena slot. Parent pointers are only ever
//! followed through the arena, so malformed input cannot produce a cycle.
//!
//! The base tree is built once per run. Per-cursor concerns (which nodes are
//! visible, which return values are known) are computed by
//! [`projection`] without touching it.

mod builder;
pub mod projection;

use std::collections::HashMap;
use std::ops::Deref;

use serde::Serialize;
use vdb_common::types::CallId;

use crate::IntegrityWarning;

pub use projection::{Projection, ViewNode, SYNTHETIC_ROOT_LABEL};

/// Arena slot of a call tree node
pub type NodeId = usize;

/// One invocation in the rebuilt forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallTreeNode {
    /// Call id
    pub id: CallId,
    /// Function name
    pub function: String,
    /// Display label, e.g. `fact(3)`
    pub label: String,
    /// Depth in the rebuilt forest (roots are 0)
    pub depth: usize,
    /// Depth reported by the tracer
    pub stack_depth: usize,
    /// Parent slot, `None` for roots
    pub parent: Option<NodeId>,
    /// Child slots in call order
    pub children: Vec<NodeId>,
}

impl CallTreeNode {
    /// Whether this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Forest of calls built from one run's call records
#[derive(Debug, Clone, Default)]
pub struct CallTree {
    nodes: Vec<CallTreeNode>,
    index: HashMap<CallId, NodeId>,
    roots: Vec<NodeId>,
    warnings: Vec<IntegrityWarning>,
}

impl Deref for CallTree {
    type Target = [CallTreeNode];

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl CallTree {
    /// Node in a given arena slot
    pub fn node(&self, id: NodeId) -> Option<&CallTreeNode> {
        self.nodes.get(id)
    }

    /// Arena slot of a call id
    pub fn slot(&self, call_id: &CallId) -> Option<NodeId> {
        self.index.get(call_id).copied()
    }

    /// Node for a call id
    pub fn get(&self, call_id: &CallId) -> Option<&CallTreeNode> {
        self.slot(call_id).and_then(|slot| self.nodes.get(slot))
    }

    /// Root slots in call order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of a node in call order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &CallTreeNode> + '_ {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(|&child| self.nodes.get(child))
    }

    /// Parent → child edges as call id pairs
    pub fn edges(&self) -> impl Iterator<Item = (&CallId, &CallId)> + '_ {
        self.nodes.iter().filter_map(|node| {
            let parent = self.nodes.get(node.parent?)?;
            Some((&parent.id, &node.id))
        })
    }

    /// Maximum structural depth, `None` for an empty forest
    pub fn max_depth(&self) -> Option<usize> {
        self.nodes.iter().map(|node| node.depth).max()
    }

    /// Integrity warnings raised while building
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }
}
