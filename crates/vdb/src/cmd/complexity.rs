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
//! `vdb complexity`: print the complexity report of a run.

use std::io::Write;

use clap::Args;
use eyre::Result;

use super::{write_json, Context, TraceArgs};

/// Arguments of `vdb complexity`
#[derive(Debug, Clone, Args)]
pub struct ComplexityArgs {
    #[command(flatten)]
    pub trace: TraceArgs,
}

/// Run `vdb complexity`
pub fn run(args: &ComplexityArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let session = args.trace.open(ctx)?;
    if ctx.json {
        return write_json(out, session.complexity());
    }
    let text = ctx.renderer.complexity(session.complexity(), session.complexity_source());
    write!(out, "{text}")?;
    Ok(())
}
