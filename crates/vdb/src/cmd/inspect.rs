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
//! `vdb inspect`: show the variables, call stack and active path at a step.

use std::io::Write;

use clap::Args;
use eyre::Result;
use vdb_common::types::CallId;

use super::{write_json, Context, TraceArgs};

/// Arguments of `vdb inspect`
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub trace: TraceArgs,

    /// Step to inspect
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, conflicts_with = "call")]
    pub step: i64,

    /// Inspect the first step of this call instead
    #[arg(long)]
    pub call: Option<String>,
}

/// Run `vdb inspect`
pub fn run(args: &InspectArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let mut session = args.trace.open(ctx)?;
    match &args.call {
        Some(call) => {
            let call_id = CallId::from(call.as_str());
            if session.store().first_step_of(&call_id).is_none() {
                eyre::bail!("call {call_id} owns no steps in this trace");
            }
            session.jump_to_call(&call_id)
        }
        None => session.jump_to_step(args.step),
    };

    let view = session.view();
    if ctx.json {
        return write_json(out, &view);
    }
    write!(out, "{}", ctx.renderer.inspect(&view))?;
    Ok(())
}
