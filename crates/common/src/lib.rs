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

//! VDB Common - Shared functionality for VDB components
//!
//! This crate provides the wire types shipped by the tracer backend (steps,
//! call records, complexity reports and the response envelope) together with
//! the logging setup shared by the engine and the `vdb` binary.

/// Wire types of a debug run: step events, call records, complexity reports and the response envelope
pub mod types;

/// Logging setup and utilities for consistent logging across VDB components
pub mod logging;

pub use logging::*;
