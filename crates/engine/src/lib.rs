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

//! Debug session model of VDB.
//!
//! Turns one recorded run (steps plus call records) into a call tree, an
//! active path, a complexity report and a navigable timeline.

pub mod command;
pub use command::*;

pub mod complexity;
pub use complexity::*;

pub mod config;
pub use config::*;

pub mod cursor;
pub use cursor::*;

pub mod error;
pub use error::*;

pub mod path;
pub use path::*;

pub mod session;
pub use session::*;

pub mod stats;
pub use stats::*;

pub mod store;
pub use store::*;

pub mod tree;
pub use tree::*;
