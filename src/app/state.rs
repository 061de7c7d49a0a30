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

use super::feed::SimulatedFeed;
use crate::config::ScrollConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::scroll::{AutoScroll, Identified, MessageDelta, ScrollBehavior, ScrollMeta};
use crate::ui::{OverlayManager, TranscriptViewport};
use ratatui::layout::Rect;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    /// Loaded from history, initially or by scrolling to the top.
    History,
    /// Arrived while the viewer was open.
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub author: String,
    pub body: String,
    pub origin: MessageOrigin,
}

impl ChatMessage {
    pub fn new(id: impl Into<String>, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self { id: id.into(), author: author.into(), body: body.into(), origin: MessageOrigin::History }
    }

    pub fn live(id: impl Into<String>, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self { origin: MessageOrigin::Live, ..Self::new(id, author, body) }
    }
}

impl Identified for ChatMessage {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct App {
    pub messages: Vec<ChatMessage>,
    pub scroll: AutoScroll<TranscriptViewport>,
    /// Last meta snapshot published by the engine.
    pub jump: Option<ScrollMeta>,
    pub feed: SimulatedFeed,
    pub overlays: OverlayManager,
    pub page_size: usize,
    pub should_quit: bool,
    /// Live feed is held back while set.
    pub paused: bool,
    /// Transcript area from the last layout pass.
    pub body_area: Rect,
    laid_out: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &ScrollConfig, feed: SimulatedFeed) -> Self {
        Self::with_sink(config, feed, TracingSink)
    }

    /// Like [`App::new`], with restoration diagnostics going to `sink`.
    #[must_use]
    pub fn with_sink(
        config: &ScrollConfig,
        mut feed: SimulatedFeed,
        sink: impl DiagnosticSink + 'static,
    ) -> Self {
        let mut scroll = AutoScroll::new(config.row_scroll_options()).with_sink(sink);
        scroll.mount(TranscriptViewport::new());
        let messages = feed.older_page(config.page_size);
        if feed.is_exhausted() {
            scroll.older_loaded(true);
        }
        Self {
            messages,
            scroll,
            jump: None,
            feed,
            overlays: OverlayManager::new(),
            page_size: config.page_size,
            should_quit: false,
            paused: false,
            body_area: Rect::default(),
            laid_out: false,
        }
    }

    /// Bring the viewport in line with `area`. The first call delivers the
    /// initial message list; later size changes keep a pinned reader pinned.
    pub fn sync_layout(&mut self, area: Rect) {
        if self.laid_out && area == self.body_area {
            return;
        }
        self.body_area = area;
        self.overlays.reanchor(area);
        let Some(viewport) = self.scroll.container_mut() else {
            return;
        };
        viewport.set_client_height(area.height);
        viewport.layout(&self.messages, area.width);

        if !self.laid_out {
            self.laid_out = true;
            let outcome = self.scroll.on_messages(&self.messages);
            tracing::debug!(delta = ?outcome.delta, len = self.messages.len(), "initial transcript");
        } else if self.scroll.is_at_bottom() {
            self.scroll.scroll_to_bottom(ScrollBehavior::Instant);
        } else {
            self.scroll.on_scroll();
        }
    }

    fn relayout(&mut self) {
        let width = self.body_area.width;
        if let Some(viewport) = self.scroll.container_mut() {
            viewport.layout(&self.messages, width);
        }
    }

    pub fn push_live(&mut self, msg: ChatMessage) {
        self.messages.push(msg);
        if !self.laid_out {
            return;
        }
        self.relayout();
        let outcome = self.scroll.on_messages(&self.messages);
        if let MessageDelta::Append { appended } = outcome.delta {
            tracing::trace!(appended, followed = outcome.scrolled.is_some(), "live message");
        }
    }

    /// Prepend one page from history. The engine captured the boundary
    /// before this runs, so the reader's place is restored after layout.
    pub fn load_older(&mut self) {
        let page = self.feed.older_page(self.page_size);
        let exhausted = self.feed.is_exhausted();
        if !page.is_empty() {
            let count = page.len();
            self.messages.splice(0..0, page);
            self.relayout();
            let outcome = self.scroll.on_messages(&self.messages);
            tracing::debug!(count, restore = ?outcome.restore, "older page loaded");
        }
        self.scroll.older_loaded(exhausted);
    }

    pub fn scroll_rows(&mut self, rows: isize) {
        if let Some(viewport) = self.scroll.container_mut() {
            viewport.scroll_by(rows);
        }
        self.scroll.on_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        if let Some(viewport) = self.scroll.container_mut() {
            viewport.scroll_to_top();
        }
        self.scroll.on_scroll();
    }

    /// The jump-to-latest action bound to the published handle.
    pub fn jump_to_latest(&mut self) {
        self.scroll.scroll_to_bottom(ScrollBehavior::Smooth);
    }

    #[must_use]
    pub fn page_rows(&self) -> isize {
        isize::try_from(self.body_area.height.saturating_sub(1)).unwrap_or(1).max(1)
    }

    /// Once-per-frame work, run before drawing.
    pub fn on_frame(&mut self, now: Instant) {
        if !self.laid_out {
            return;
        }
        let outcome = self.scroll.on_frame(now);
        if outcome.load_older {
            self.load_older();
        }
        if let Some(viewport) = self.scroll.container_mut() {
            viewport.tick();
        }
        let jump = &mut self.jump;
        self.scroll.publish_meta(|meta| {
            tracing::debug!(visible = meta.visible, new_count = meta.new_count, "scroll meta");
            *jump = Some(*meta);
        });
    }
}
