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

mod chat;
mod help;
pub mod message;
pub mod overlay;
pub mod theme;
pub mod viewport;

pub use overlay::{Overlay, OverlayKind, OverlayManager};
pub use viewport::TranscriptViewport;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const FOOTER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [header, header_sep, body, footer_sep, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Layout must settle before the transcript is drawn so the engine sees
    // the same geometry the user does.
    app.sync_layout(body);

    render_header(frame, header, app);
    render_separator(frame, header_sep);
    chat::render(frame, body, app);
    render_separator(frame, footer_sep);
    render_footer(frame, footer, app);

    if let Some(open) = app.overlays.current() {
        match open.kind {
            OverlayKind::Help => help::render(frame, open),
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let dim = Style::default().fg(theme::DIM);
    let mut spans = vec![
        Span::styled(
            " chat-scroll",
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.scroll.options().strategy.as_str()), dim),
        Span::styled(format!("  {} messages", app.messages.len()), dim),
    ];
    if app.feed.is_exhausted() {
        spans.push(Span::styled("  start of history", dim));
    } else if app.scroll.restore_pending() {
        spans.push(Span::styled("  loading history", dim));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        ..area
    };
    let left = Line::from(vec![
        Span::styled("?", Style::default().fg(Color::White)),
        Span::styled(" : Keys", Style::default().fg(theme::DIM)),
    ]);
    frame.render_widget(Paragraph::new(left), padded);

    let state = app.scroll.state();
    let mut right = if state.is_at_bottom {
        "following".to_owned()
    } else {
        format!("{:.0} rows below", state.distance_from_bottom)
    };
    if app.paused {
        right.push_str("  | feed paused");
    }
    let line = Line::from(Span::styled(right, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), padded);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(area.width as usize);
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
