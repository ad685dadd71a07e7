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
//! `vdb tree`: print the call tree at a step.

use std::io::Write;

use clap::Args;
use eyre::Result;
use vdb_engine::ViewMode;

use super::{write_json, Context, TraceArgs};

/// Arguments of `vdb tree`
#[derive(Debug, Clone, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub trace: TraceArgs,

    /// Step to project the tree at (default: the last step)
    #[arg(long, allow_negative_numbers = true)]
    pub step: Option<i64>,

    /// Show every call and return value regardless of the step
    #[arg(long)]
    pub full: bool,
}

/// Run `vdb tree`
pub fn run(args: &TreeArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let mut session = args.trace.open(ctx)?;
    match args.step {
        Some(step) => session.jump_to_step(step),
        None => session.last(),
    };
    if args.full {
        session.set_mode(ViewMode::Full);
    }

    let view = session.view();
    if ctx.json {
        return write_json(out, &view.tree);
    }
    writeln!(out, "{}", ctx.renderer.status(&view))?;
    write!(out, "{}", ctx.renderer.tree(view.tree.as_ref()))?;
    Ok(())
}
