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

mod events;
mod feed;
mod state;

pub use events::handle_terminal_event;
pub use feed::SimulatedFeed;
pub use state::{App, ChatMessage, MessageOrigin};

use crate::error::AppError;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use std::io::IsTerminal as _;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App, incoming: Duration) -> anyhow::Result<()> {
    if !std::io::stdout().is_terminal() {
        return Err(AppError::TerminalUnavailable.into());
    }
    let mut terminal = ratatui::try_init().map_err(|_| AppError::TerminalUnavailable)?;

    // Ignore error on terminals without mouse support
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let mut events = EventStream::new();
    let mut live = tokio::time::interval_at(tokio::time::Instant::now() + incoming, incoming);
    live.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    let result: anyhow::Result<()> = loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_terminal_event(app, event);
            }
            _ = live.tick() => {
                if !app.paused {
                    let msg = app.feed.next_live();
                    app.push_live(msg);
                }
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued terminal events (non-blocking)
        while let Some(Some(Ok(event))) = events.next().now_or_never() {
            handle_terminal_event(app, event);
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: one engine frame, then render once
        app.on_frame(Instant::now());
        if let Err(err) = terminal.draw(|f| crate::ui::render(f, app)) {
            break Err(err.into());
        }
        last_render = Instant::now();
    };

    // Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
    app.scroll.unmount();

    result
}
