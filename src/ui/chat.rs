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

use crate::app::App;
use crate::scroll::ScrollMeta;
use crate::ui::{message, theme};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let Some(viewport) = app.scroll.container() else {
        return;
    };

    if app.messages.is_empty() {
        let hint = Line::from(Span::styled("  No messages yet", Style::default().fg(theme::DIM)));
        frame.render_widget(Paragraph::new(hint), area);
        return;
    }

    let lines: Vec<Line<'static>> = app.messages.iter().flat_map(message::render_message).collect();
    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });

    let content_height = viewport.content_height();
    let viewport_height = usize::from(area.height);
    if content_height <= viewport_height {
        // Short content: render in a bottom-aligned sub-rect
        let offset = (viewport_height - content_height) as u16;
        let render_area = Rect {
            x: area.x,
            y: area.y + offset,
            width: area.width,
            height: content_height as u16,
        };
        frame.render_widget(paragraph, render_area);
    } else {
        let offset = u16::try_from(viewport.render_offset()).unwrap_or(u16::MAX);
        frame.render_widget(paragraph.scroll((offset, 0)), area);
    }

    if let Some(meta) = app.jump.filter(|m| m.visible) {
        render_jump_indicator(frame, area, &meta);
    }
}

fn jump_label(meta: &ScrollMeta) -> String {
    match meta.new_count {
        0 => " ↓ Jump to latest ".to_owned(),
        1 => " ↓ 1 new message ".to_owned(),
        n => format!(" ↓ {n} new messages "),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_jump_indicator(frame: &mut Frame, area: Rect, meta: &ScrollMeta) {
    let label = jump_label(meta);
    let width = (UnicodeWidthStr::width(label.as_str()) as u16).min(area.width);
    let indicator = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.bottom().saturating_sub(1),
        width,
        height: 1,
    };
    let fg = if meta.has_new { theme::JUMP_NEW_FG } else { theme::JUMP_IDLE_FG };
    let style = Style::default().fg(fg).bg(theme::JUMP_BG).add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center),
        indicator,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::ScrollToBottomHandle;

    #[test]
    fn label_counts_unread() {
        let handle = ScrollToBottomHandle::new(1);
        assert_eq!(jump_label(&ScrollMeta::from_state(false, 0, handle)), " ↓ Jump to latest ");
        assert_eq!(jump_label(&ScrollMeta::from_state(false, 1, handle)), " ↓ 1 new message ");
        assert_eq!(jump_label(&ScrollMeta::from_state(false, 7, handle)), " ↓ 7 new messages ");
    }
}
