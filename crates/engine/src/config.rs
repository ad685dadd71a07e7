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

//! Session configuration.
//!
//! [`SessionConfig`] controls the display-level knobs of a session: the view
//! mode, which functions are considered synthetic wrappers, and which words
//! introduce a loop for the complexity heuristic. None of them alter call
//! identity.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How return values and nodes are projected onto the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Only what is known at the cursor
    #[default]
    #[display("stepwise")]
    Stepwise,
    /// Everything in the trace, independent of the cursor
    #[display("full")]
    Full,
}

impl ViewMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Stepwise => Self::Full,
            Self::Full => Self::Stepwise,
        }
    }
}

/// Configuration for a debug session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial view mode
    pub view_mode: ViewMode,
    /// Elide synthetic wrappers (`<module>`, `__init__`, ...) from the displayed tree
    pub filter_synthetic: bool,
    /// Additional function names treated as synthetic
    pub hidden_functions: Vec<String>,
    /// Words that introduce a loop in a source line
    pub loop_keywords: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Stepwise,
            filter_synthetic: true,
            hidden_functions: Vec::new(),
            loop_keywords: vec!["for".to_string(), "while".to_string()],
        }
    }
}

impl SessionConfig {
    /// Set the initial view mode
    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Enable or disable eliding synthetic wrappers
    pub fn with_synthetic_filter(mut self, enabled: bool) -> Self {
        self.filter_synthetic = enabled;
        self
    }

    /// Treat another function name as synthetic
    pub fn with_hidden_function(mut self, name: impl Into<String>) -> Self {
        self.hidden_functions.push(name.into());
        self
    }

    /// Replace the loop keywords
    pub fn with_loop_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.loop_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `function` names a synthetic/internal wrapper that should be elided
    ///
    /// Angle-bracket names (`<module>`, `<listcomp>`) and dunder names
    /// (`__init__`) are synthetic, as is anything listed in `hidden_functions`.
    /// Always false when filtering is disabled.
    pub fn is_synthetic(&self, function: &str) -> bool {
        if !self.filter_synthetic {
            return false;
        }
        let bracketed = function.len() > 2 && function.starts_with('<') && function.ends_with('>');
        let dunder = function.len() > 4 && function.starts_with("__") && function.ends_with("__");
        bracketed || dunder || self.hidden_functions.iter().any(|name| name == function)
    }
}
