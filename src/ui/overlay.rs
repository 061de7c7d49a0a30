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

//! Single owner for floating overlays.
//!
//! At most one overlay is open at a time; opening another replaces it.

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub kind: OverlayKind,
    /// Area the overlay is positioned against, usually the transcript body.
    pub anchor: Rect,
}

#[derive(Debug, Default)]
pub struct OverlayManager {
    open: Option<Overlay>,
}

impl OverlayManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, kind: OverlayKind, anchor: Rect) {
        if let Some(previous) = self.open.replace(Overlay { kind, anchor }) {
            tracing::debug!(previous = ?previous.kind, ?kind, "overlay replaced");
        }
    }

    pub fn close(&mut self) -> Option<Overlay> {
        self.open.take()
    }

    /// Open `kind`, or close it when it is already the open overlay.
    pub fn toggle(&mut self, kind: OverlayKind, anchor: Rect) {
        if self.is_open(kind) {
            self.open = None;
        } else {
            self.open(kind, anchor);
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Overlay> {
        self.open.as_ref()
    }

    #[must_use]
    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.open.is_some_and(|o| o.kind == kind)
    }

    /// Follow the anchor when the terminal is resized.
    pub fn reanchor(&mut self, anchor: Rect) {
        if let Some(open) = self.open.as_mut() {
            open.anchor = anchor;
        }
    }
}

/// Center a `width` x `height` box inside `anchor`, shrinking it to fit.
#[must_use]
pub fn place(anchor: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(anchor.width);
    let height = height.min(anchor.height);
    Rect {
        x: anchor.x + (anchor.width - width) / 2,
        y: anchor.y + (anchor.height - height) / 2,
        width,
        height,
    }
}
