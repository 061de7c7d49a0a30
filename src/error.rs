// chat_scroll — Scroll anchoring and unread tracking for chat transcripts
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file {path}")]
    ConfigRead { path: String },
    #[error("Invalid config file {path}: {detail}")]
    ConfigParse { path: String, detail: String },
    #[error("Failed to read replay script {path}")]
    ScriptRead { path: String },
    #[error("Invalid replay script {path}: {detail}")]
    ScriptParse { path: String, detail: String },
    #[error("Terminal is not available")]
    TerminalUnavailable,
}

impl AppError {
    pub const CONFIG_READ_EXIT_CODE: i32 = 20;
    pub const CONFIG_PARSE_EXIT_CODE: i32 = 21;
    pub const SCRIPT_READ_EXIT_CODE: i32 = 22;
    pub const SCRIPT_PARSE_EXIT_CODE: i32 = 23;
    pub const TERMINAL_UNAVAILABLE_EXIT_CODE: i32 = 24;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigRead { .. } => Self::CONFIG_READ_EXIT_CODE,
            Self::ConfigParse { .. } => Self::CONFIG_PARSE_EXIT_CODE,
            Self::ScriptRead { .. } => Self::SCRIPT_READ_EXIT_CODE,
            Self::ScriptParse { .. } => Self::SCRIPT_PARSE_EXIT_CODE,
            Self::TerminalUnavailable => Self::TERMINAL_UNAVAILABLE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigRead { path } => {
                format!("Could not read config file `{path}`. Check that it exists and is readable.")
            }
            Self::ConfigParse { path, detail } => {
                format!("Config file `{path}` is not valid: {detail}")
            }
            Self::ScriptRead { path } => format!("Could not read replay script `{path}`."),
            Self::ScriptParse { path, detail } => {
                format!("Replay script `{path}` is not valid: {detail}")
            }
            Self::TerminalUnavailable => {
                "The viewer needs an interactive terminal. Use `replay` for headless runs."
                    .to_owned()
            }
        }
    }
}
