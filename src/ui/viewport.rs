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

use crate::app::ChatMessage;
use crate::scroll::{ScrollBehavior, ScrollContainer, ScrollMetrics};
use crate::ui::message;
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};

/// Placement of one message in the laid-out transcript, in rows.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowSpan {
    id: String,
    top: usize,
    height: usize,
}

/// The transcript as a scroll container measured in terminal rows.
///
/// `scroll_top` reports the settled position (the scroll target). The
/// rendered position eases toward it over a few frames, so geometry reads
/// never observe a half-finished animation.
#[derive(Debug, Default)]
pub struct TranscriptViewport {
    width: u16,
    client_height: usize,
    spans: Vec<RowSpan>,
    content_height: usize,
    /// Target scroll offset requested by user input or the engine.
    scroll_target: usize,
    /// Smooth scroll position (fractional) for animation.
    scroll_pos: f32,
}

impl TranscriptViewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure every message at `width`. The scroll target is kept as is,
    /// so a prepend pushes the visible content down until it is restored.
    pub fn layout(&mut self, messages: &[ChatMessage], width: u16) {
        self.width = width;
        self.spans.clear();
        let mut top = 0usize;
        for msg in messages {
            let height = measure(msg, width);
            self.spans.push(RowSpan { id: msg.id.clone(), top, height });
            top += height;
        }
        self.content_height = top;
        self.scroll_target = self.scroll_target.min(self.max_scroll());
    }

    pub fn set_client_height(&mut self, rows: u16) {
        self.client_height = usize::from(rows);
        self.scroll_target = self.scroll_target.min(self.max_scroll());
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn client_height(&self) -> usize {
        self.client_height
    }

    #[must_use]
    pub fn content_height(&self) -> usize {
        self.content_height
    }

    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(self.client_height)
    }

    /// User scroll by `rows` (negative is up).
    pub fn scroll_by(&mut self, rows: isize) {
        let target = self.scroll_target.saturating_add_signed(rows);
        self.scroll_target = target.min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_target = 0;
    }

    /// Advance the smooth-scroll animation by one frame.
    #[allow(clippy::cast_precision_loss)]
    pub fn tick(&mut self) {
        let target = self.scroll_target as f32;
        let delta = target - self.scroll_pos;
        if delta.abs() < 0.01 {
            self.scroll_pos = target;
        } else {
            // Smooth over ~2-3 frames at 60fps.
            self.scroll_pos += delta * 0.5;
        }
    }

    /// Row offset to render at this frame.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_offset(&self) -> usize {
        (self.scroll_pos.round().max(0.0) as usize).min(self.max_scroll())
    }

    #[allow(clippy::cast_precision_loss)]
    fn jump_to(&mut self, row: usize, behavior: ScrollBehavior) {
        self.scroll_target = row.min(self.max_scroll());
        if behavior == ScrollBehavior::Instant {
            self.scroll_pos = self.scroll_target as f32;
        }
    }

    fn span(&self, id: &str) -> Option<&RowSpan> {
        self.spans.iter().find(|s| s.id == id)
    }
}

fn measure(msg: &ChatMessage, width: u16) -> usize {
    if width == 0 {
        return 0;
    }
    let paragraph =
        Paragraph::new(Text::from(message::render_message(msg))).wrap(Wrap { trim: false });
    paragraph.line_count(width)
}

#[allow(clippy::cast_precision_loss)]
fn rows_to_f64(rows: usize) -> f64 {
    rows as f64
}

impl ScrollContainer for TranscriptViewport {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            rows_to_f64(self.scroll_target),
            rows_to_f64(self.content_height),
            rows_to_f64(self.client_height),
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn set_scroll_top(&mut self, scroll_top: f64, behavior: ScrollBehavior) {
        let row = scroll_top.round().max(0.0) as usize;
        self.jump_to(row, behavior);
    }

    fn message_offset(&self, id: &str) -> Option<f64> {
        let span = self.span(id)?;
        Some(rows_to_f64(span.top) - rows_to_f64(self.scroll_target))
    }

    fn first_visible_message(&self) -> Option<(String, f64)> {
        let span = self.spans.iter().find(|s| s.top + s.height > self.scroll_target)?;
        Some((span.id.clone(), rows_to_f64(span.top) - rows_to_f64(self.scroll_target)))
    }
}
