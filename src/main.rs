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

use anyhow::Context as _;
use chat_scroll::app::{App, SimulatedFeed};
use chat_scroll::config::ScrollConfig;
use chat_scroll::diagnostics::{JsonLinesSink, TracingSink};
use chat_scroll::error::AppError;
use chat_scroll::{Cli, Command, replay};
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, LineWriter, Write as _};
use std::time::Duration;

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = ScrollConfig::load(cli.config.as_deref())?
        .with_env()
        .with_strategy(cli.strategy);
    tracing::info!(strategy = config.strategy.as_str(), "configuration resolved");

    match &cli.command {
        Command::View { history, incoming_ms, diagnostics } => {
            let rt = tokio::runtime::Runtime::new()?;
            let feed = SimulatedFeed::new(*history);
            let mut app = match diagnostics {
                Some(path) => {
                    let file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    let sink = (TracingSink, JsonLinesSink::new(LineWriter::new(file)));
                    App::with_sink(&config, feed, sink)
                }
                None => App::new(&config, feed),
            };
            let incoming = Duration::from_millis((*incoming_ms).max(1));
            rt.block_on(chat_scroll::app::run_tui(&mut app, incoming))
        }
        Command::Replay { script, output } => {
            let steps = replay::load_script(script)?;
            let records = replay::run(&steps, config.scroll_options());
            tracing::info!(steps = steps.len(), records = records.len(), "replay finished");
            match output {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    replay::write_records(&records, &mut writer)?;
                    writer.flush()?;
                }
                None => replay::write_records(&records, std::io::stdout().lock())?,
            }
            Ok(())
        }
    }
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        log_append = cli.log_append,
        "tracing enabled"
    );

    Ok(())
}
