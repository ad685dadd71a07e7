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

//! Text navigation commands.
//!
//! | command                       | alias           | effect                        |
//! |-------------------------------|-----------------|-------------------------------|
//! | `next`                        | `n`             | advance one step              |
//! | `prev`                        | `p`, `back`     | go back one step              |
//! | `goto N`                      | `g N`           | jump to step N (clamped)      |
//! | `call ID`                     | `c ID`          | jump to the call's first step |
//! | `first` / `last`              | `start` / `end` | go to either end              |
//! | `mode full\|stepwise\|toggle` | `m ...`         | switch the view mode          |

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;
use vdb_common::types::CallId;

use crate::{DebugSession, ViewMode};

/// A parsed navigation command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Advance one step
    Next,
    /// Go back one step
    Prev,
    /// Go to the first step
    First,
    /// Go to the last step
    Last,
    /// Jump to a step index
    Goto(i64),
    /// Jump to the first step of a call
    Call(CallId),
    /// Set the view mode
    Mode(ViewMode),
    /// Flip the view mode
    ToggleMode,
}

/// Why a command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("empty command")]
    Empty,
    /// Unrecognised command word
    #[error("unknown command '{0}'")]
    Unknown(String),
    /// Command requires an argument
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    /// Step index is not an integer
    #[error("'{0}' is not a step index")]
    InvalidIndex(String),
    /// Unrecognised view mode
    #[error("unknown mode '{0}', expected full, stepwise or toggle")]
    InvalidMode(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else { return Err(CommandError::Empty) };
        let argument = words.next();

        match word.to_ascii_lowercase().as_str() {
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" | "back" => Ok(Self::Prev),
            "first" | "start" => Ok(Self::First),
            "last" | "end" => Ok(Self::Last),
            "goto" | "g" => {
                let raw = argument.ok_or(CommandError::MissingArgument("goto"))?;
                raw.parse().map(Self::Goto).map_err(|_| CommandError::InvalidIndex(raw.to_string()))
            }
            "call" | "c" => {
                let raw = argument.ok_or(CommandError::MissingArgument("call"))?;
                Ok(Self::Call(CallId::from(raw)))
            }
            "mode" | "m" => {
                let raw = argument.ok_or(CommandError::MissingArgument("mode"))?;
                match raw.to_ascii_lowercase().as_str() {
                    "full" => Ok(Self::Mode(ViewMode::Full)),
                    "stepwise" | "step" => Ok(Self::Mode(ViewMode::Stepwise)),
                    "toggle" => Ok(Self::ToggleMode),
                    _ => Err(CommandError::InvalidMode(raw.to_string())),
                }
            }
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

impl DebugSession {
    /// Run a command against the session and return the cursor afterwards
    pub fn apply(&mut self, command: &Command) -> Option<usize> {
        debug!("Applying command: {command:?}");
        match command {
            Command::Next => self.next(),
            Command::Prev => self.prev(),
            Command::First => self.first(),
            Command::Last => self.last(),
            Command::Goto(index) => self.jump_to_step(*index),
            Command::Call(call_id) => self.jump_to_call(call_id),
            Command::Mode(mode) => {
                self.set_mode(*mode);
                self.cursor()
            }
            Command::ToggleMode => {
                self.toggle_mode();
                self.cursor()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionConfig;
    use vdb_common::types::{DebugPayload, EventType, StepEvent};

    #[test]
    fn test_parse_commands() {
        assert_eq!("next".parse::<Command>(), Ok(Command::Next));
        assert_eq!("  P ".parse::<Command>(), Ok(Command::Prev));
        assert_eq!("goto -5".parse::<Command>(), Ok(Command::Goto(-5)));
        assert_eq!("c fact_2".parse::<Command>(), Ok(Command::Call(CallId::from("fact_2"))));
        assert_eq!("mode full".parse::<Command>(), Ok(Command::Mode(ViewMode::Full)));
        assert_eq!("m toggle".parse::<Command>(), Ok(Command::ToggleMode));
        assert_eq!("end".parse::<Command>(), Ok(Command::Last));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("jump".parse::<Command>(), Err(CommandError::Unknown("jump".into())));
        assert_eq!("goto".parse::<Command>(), Err(CommandError::MissingArgument("goto")));
        assert_eq!("goto x".parse::<Command>(), Err(CommandError::InvalidIndex("x".into())));
        assert_eq!("mode tree".parse::<Command>(), Err(CommandError::InvalidMode("tree".into())));
    }

    #[test]
    fn test_apply() {
        let steps = (0..5).map(|_| StepEvent::new("f", EventType::Step).with_call("f")).collect();
        let mut session =
            DebugSession::from_payload(DebugPayload::new(steps, Vec::new()), SessionConfig::default());

        assert_eq!(session.apply(&Command::Goto(999)), Some(4));
        assert_eq!(session.apply(&Command::Prev), Some(3));
        assert_eq!(session.apply(&Command::First), Some(0));
        assert_eq!(session.apply(&Command::ToggleMode), Some(0));
        assert_eq!(session.mode(), ViewMode::Full);
        assert_eq!(session.apply(&Command::Call(CallId::from("f"))), Some(0));
    }
}
