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

//! Configuration file for the `vdb` CLI.
//!
//! ```toml
//! [session]
//! view_mode = "stepwise"
//! filter_synthetic = true
//! hidden_functions = ["wrapper"]
//! loop_keywords = ["for", "while"]
//!
//! [display]
//! color = true
//! max_value_width = 60
//! show_call_stack = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vdb_engine::SessionConfig;

/// Name of the per-user config file in the home directory
pub const CONFIG_FILE_NAME: &str = ".vdb.toml";

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session model settings
    pub session: SessionConfig,
    /// Terminal rendering settings
    pub display: DisplayConfig,
}

/// Terminal rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use ANSI colors
    pub color: bool,
    /// Longest rendered value before it is cut
    pub max_value_width: usize,
    /// Print the call stack in the step inspector
    pub show_call_stack: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true, max_value_width: 60, show_call_stack: true }
    }
}

impl Config {
    /// Location of the per-user config file
    pub fn default_path() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| eyre::eyre!("Unable to determine home directory"))?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load `explicit` if given, else the per-user file, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            Ok(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => {
                debug!("{err}; using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Load a config file, failing if it is missing or malformed
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as TOML: {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
