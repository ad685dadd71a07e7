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
//! `vdb replay`: step through a trace interactively, one command per line.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Args;
use eyre::Result;
use tracing::debug;
use vdb_engine::{Command, DebugSession};

use super::{Context, TraceArgs};

const HELP: &str = "Commands:
  next | n             advance one step
  prev | p | back      go back one step
  goto N | g N         jump to step N
  call ID | c ID       jump to the first step of a call
  first | last         go to either end
  mode full|stepwise   switch the view mode (mode toggle flips it)
  tree                 print the call tree
  inspect | info       print variables and the call stack
  help                 show this help
  quit | q | exit      leave
";

/// Arguments of `vdb replay`
#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub trace: TraceArgs,
}

/// What the loop does after a line
enum Flow {
    Continue,
    Quit,
}

/// Run `vdb replay`, reading commands from stdin
pub fn run(args: &ReplayArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    if args.trace.reads_stdin() {
        eyre::bail!("replay reads commands from stdin, so the trace must be a file");
    }
    let mut session = args.trace.open(ctx)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    writeln!(out, "{}", ctx.renderer.status(&session.view()))?;
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(out, "(vdb) ")?;
            out.flush()?;
        }
        let Some(line) = lines.next().transpose()? else { break };
        if let Flow::Quit = execute(&mut session, ctx, line.trim(), out)? {
            break;
        }
    }
    Ok(())
}

fn execute(
    session: &mut DebugSession,
    ctx: &Context,
    line: &str,
    out: &mut dyn Write,
) -> Result<Flow> {
    match line {
        "" => {}
        "quit" | "q" | "exit" => return Ok(Flow::Quit),
        "help" | "h" | "?" => write!(out, "{HELP}")?,
        "tree" | "t" => write!(out, "{}", ctx.renderer.tree(session.projection().as_ref()))?,
        "inspect" | "info" | "i" => write!(out, "{}", ctx.renderer.inspect(&session.view()))?,
        _ => match line.parse::<Command>() {
            Ok(command) => {
                session.apply(&command);
                writeln!(out, "{}", ctx.renderer.status(&session.view()))?;
            }
            Err(err) => {
                debug!("Rejected command {line:?}: {err}");
                writeln!(out, "error: {err} (try 'help')")?;
            }
        },
    }
    Ok(Flow::Continue)
}
