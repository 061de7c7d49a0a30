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

use crate::app::{ChatMessage, MessageOrigin};
use crate::ui::theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Render a single chat message: author header, body lines, blank spacer.
pub fn render_message(msg: &ChatMessage) -> Vec<Line<'static>> {
    let mut out = Vec::with_capacity(msg.body.lines().count() + 2);

    let author_style =
        Style::default().fg(theme::author_color(&msg.author)).add_modifier(Modifier::BOLD);
    let mut header = vec![Span::styled(msg.author.clone(), author_style)];
    if msg.origin == MessageOrigin::Live {
        let marker = format!(" {}", theme::LIVE_MARKER);
        header.push(Span::styled(marker, Style::default().fg(theme::DIM)));
    }
    out.push(Line::from(header));

    for line in msg.body.lines() {
        out.push(Line::from(format!("  {line}")));
    }
    out.push(Line::default());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_body_and_spacer() {
        let msg = ChatMessage::new("m-1", "ana", "first\nsecond");
        let lines = render_message(&msg);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].to_string(), "ana");
        assert_eq!(lines[2].to_string(), "  second");
        assert!(lines[3].spans.is_empty());
    }

    #[test]
    fn live_messages_are_marked() {
        let msg = ChatMessage::live("m-2", "bo", "hi");
        assert!(render_message(&msg)[0].to_string().contains(theme::LIVE_MARKER));
    }
}
