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

//! Once-per-frame coalescing of scroll events.
//!
//! Native scroll events can fire many times between two renders. They only
//! mark work as pending here; the classification itself runs once when the
//! next frame begins, against geometry read at that moment.

#[derive(Debug, Default)]
pub struct FrameScheduler {
    frame: u64,
    scroll_requested: bool,
}

/// Work due at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameWork {
    pub frame: u64,
    pub classify_scroll: bool,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when a classification was already pending.
    pub fn request_scroll_classification(&mut self) -> bool {
        !std::mem::replace(&mut self.scroll_requested, true)
    }

    pub fn begin_frame(&mut self) -> FrameWork {
        self.frame = self.frame.wrapping_add(1);
        FrameWork { frame: self.frame, classify_scroll: std::mem::take(&mut self.scroll_requested) }
    }

    pub fn cancel(&mut self) {
        self.scroll_requested = false;
    }
}
