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

use crate::ui::overlay::Overlay;
use crate::ui::{overlay, theme};
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: u16 = 3;

const ITEMS: &[(&str, &str)] = &[
    ("Up/Down", "Scroll one row"),
    ("PgUp/PgDn", "Scroll one page"),
    ("Mouse wheel", "Scroll"),
    ("End / G", "Jump to latest"),
    ("Home", "Jump to oldest loaded"),
    ("p", "Pause live feed"),
    ("?", "Toggle this help"),
    ("q / Ctrl+C", "Quit"),
];

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, open: &Overlay) {
    let label_width = ITEMS.iter().map(|(k, _)| UnicodeWidthStr::width(*k)).max().unwrap_or(0);
    let desc_width = ITEMS.iter().map(|(_, d)| UnicodeWidthStr::width(*d)).max().unwrap_or(0);
    let inner_width = (label_width + desc_width) as u16 + COLUMN_GAP;
    let area = overlay::place(open.anchor, inner_width + 4, ITEMS.len() as u16 + 2);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let rows = ITEMS.iter().map(|(key, desc)| {
        Row::new(vec![
            Cell::from(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD))),
            Cell::from(Span::styled(*desc, Style::default().fg(theme::DIM))),
        ])
    });

    let block = Block::default()
        .title(Line::from(Span::styled(
            " Keys ",
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let table = Table::new(
        rows,
        [Constraint::Length(label_width as u16), Constraint::Length(desc_width as u16)],
    )
    .column_spacing(COLUMN_GAP)
    .block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(table, area);
}
