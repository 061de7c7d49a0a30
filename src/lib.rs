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

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod replay;
pub mod scroll;
pub mod ui;

use clap::{Parser, Subcommand};
use scroll::ScrollStrategy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chat-scroll", about = "Scroll anchoring and unread tracking for chat transcripts")]
pub struct Cli {
    /// Config file (defaults to <config dir>/chat-scroll/config.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Scroll implementation: legacy or rewritten (overrides config and env)
    #[arg(long, global = true)]
    pub strategy: Option<ScrollStrategy>,

    /// Write tracing diagnostics to a file (disabled unless explicitly set)
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (example: `info,chat_scroll::scroll=debug`)
    #[arg(long, value_name = "FILTER", global = true)]
    pub log_filter: Option<String>,

    /// Append to `--log-file` instead of truncating on startup
    #[arg(long, global = true)]
    pub log_append: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive transcript viewer
    View {
        /// Older messages available for paging in
        #[arg(long, default_value_t = 200)]
        history: usize,

        /// Interval between simulated live messages, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 2500)]
        incoming_ms: u64,

        /// Append restoration diagnostics to this file as JSON lines
        #[arg(long, value_name = "PATH")]
        diagnostics: Option<PathBuf>,
    },
    /// Run a JSON step script headlessly and print JSON lines
    Replay {
        script: PathBuf,

        /// Write output here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
