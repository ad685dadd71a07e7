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

//! Wire types shipped by the tracer backend.
//!
//! The backend mixes camelCase (steps) and snake_case (call records and its
//! own complexity report); every type here accepts both spellings and
//! serializes in camelCase.

mod call;
mod complexity;
mod payload;
mod step;
mod value;

pub use call::*;
pub use complexity::*;
pub use payload::*;
pub use step::*;
pub use value::*;
