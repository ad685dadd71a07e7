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

//! Subcommand implementations.

pub mod complexity;
pub mod inspect;
pub mod replay;
pub mod stats;
pub mod tree;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Args;
use eyre::{Context as _, Result};
use serde::Serialize;
use tracing::{info, warn};
use vdb_engine::{DebugSession, TraceStore};

use crate::{config::Config, render::Renderer};

/// Shared state of one CLI invocation
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Renderer for plain-text output
    pub renderer: Renderer,
    /// Emit JSON instead of text
    pub json: bool,
}

/// The trace to open
#[derive(Debug, Clone, Args)]
pub struct TraceArgs {
    /// Trace file written by the tracer backend (`-` reads stdin)
    pub trace: PathBuf,

    /// Program source, used for loop detection when the trace carries none
    #[arg(long)]
    pub source: Option<PathBuf>,
}

impl TraceArgs {
    /// Whether the trace is read from stdin
    pub fn reads_stdin(&self) -> bool {
        self.trace.as_os_str() == "-"
    }

    fn read_trace(&self) -> Result<String> {
        if self.reads_stdin() {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).wrap_err("Failed to read trace from stdin")?;
            return Ok(text);
        }
        fs::read_to_string(&self.trace)
            .with_context(|| format!("Failed to read trace file: {}", self.trace.display()))
    }

    /// Load the trace and build a session with the configured settings
    pub fn open(&self, ctx: &Context) -> Result<DebugSession> {
        let text = self.read_trace()?;
        let mut store = TraceStore::from_json_str(&text)
            .with_context(|| format!("Failed to load trace {}", self.trace.display()))?;
        if let Some(path) = &self.source {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read source file: {}", path.display()))?;
            store = store.with_source(&source);
        }

        let session = DebugSession::new(store, ctx.config.session.clone());
        let warnings = session.integrity_warnings().count();
        if warnings > 0 {
            warn!("Trace has {warnings} integrity warning(s); affected records were skipped");
        }
        info!("Opened {}", self.trace.display());
        Ok(session)
    }
}

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).wrap_err("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
