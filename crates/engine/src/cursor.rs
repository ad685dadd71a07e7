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

//! Timeline cursor over the step list.
//!
//! Every transition is total: the position always stays inside
//! `0..len`, and there is no position at all when the trace is empty.

use tracing::debug;

/// Position in a trace of `len` steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineCursor {
    position: Option<usize>,
    len: usize,
}

impl TimelineCursor {
    /// Cursor at the first step, or unset for an empty trace
    pub fn new(len: usize) -> Self {
        Self { position: (len > 0).then_some(0), len }
    }

    /// Current step index
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no steps to navigate
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Advance one step, stopping at the last
    pub fn next(&mut self) -> Option<usize> {
        if let Some(position) = self.position {
            self.move_to(position.saturating_add(1), "next");
        }
        self.position
    }

    /// Go back one step, stopping at the first
    pub fn prev(&mut self) -> Option<usize> {
        if let Some(position) = self.position {
            self.move_to(position.saturating_sub(1), "prev");
        }
        self.position
    }

    /// Go to the first step
    pub fn first(&mut self) -> Option<usize> {
        if self.position.is_some() {
            self.move_to(0, "first");
        }
        self.position
    }

    /// Go to the last step
    pub fn last(&mut self) -> Option<usize> {
        if self.position.is_some() {
            self.move_to(self.len - 1, "last");
        }
        self.position
    }

    /// Go to `index`, clamping anything outside the trace to its nearest end
    pub fn jump_to(&mut self, index: i64) -> Option<usize> {
        if self.position.is_some() {
            let target = usize::try_from(index.max(0)).unwrap_or(usize::MAX);
            self.move_to(target, "jump");
        }
        self.position
    }

    fn move_to(&mut self, target: usize, action: &str) {
        let clamped = target.min(self.len.saturating_sub(1));
        if clamped != target {
            debug!("Clamped {action} target {target} to {clamped}");
        }
        debug!("Cursor {action}: {:?} -> {clamped}", self.position);
        self.position = Some(clamped);
    }
}
