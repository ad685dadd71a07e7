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
//! VDB - Visual Debugger
//!
//! Loads a trace recorded by the tracer backend and shows its call tree,
//! step inspector, complexity report and statistics in the terminal.

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use eyre::Result;

mod cmd;
mod config;
mod render;

use cmd::{
    complexity::ComplexityArgs, inspect::InspectArgs, replay::ReplayArgs, stats::StatsArgs,
    tree::TreeArgs, Context,
};
use config::Config;
use render::{Palette, Renderer};

/// Command-line interface
#[derive(Debug, Parser)]
#[command(name = "vdb", version, about = "Visual Debugger - step through recorded program traces")]
pub struct Cli {
    /// Config file (default: ~/.vdb.toml)
    #[arg(long, global = true, env = "VDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write daily log files under the temp directory
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the call tree at a step
    Tree(TreeArgs),
    /// Show variables, call stack and active path at a step
    Inspect(InspectArgs),
    /// Report time and space complexity of the run
    Complexity(ComplexityArgs),
    /// Print execution statistics
    Stats(StatsArgs),
    /// Step through the trace with line commands read from stdin
    Replay(ReplayArgs),
}

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let directive = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    vdb_common::logging::init_logging("vdb", directive, cli.log_file)?;

    let config = Config::load(cli.config.as_deref())?;
    let color = !cli.plain && config.display.color;
    let renderer = Renderer::new(Palette::new(color), config.display.clone());
    let ctx = Context { config, renderer, json: cli.json };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Tree(args) => cmd::tree::run(args, &ctx, &mut out),
        Commands::Inspect(args) => cmd::inspect::run(args, &ctx, &mut out),
        Commands::Complexity(args) => cmd::complexity::run(args, &ctx, &mut out),
        Commands::Stats(args) => cmd::stats::run(args, &ctx, &mut out),
        Commands::Replay(args) => cmd::replay::run(args, &ctx, &mut out),
    }
}
