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

//! Publishing the jump-to-bottom button state to the host.
//!
//! The observer is passed on every call and never stored, so a host that
//! hands in a fresh closure each frame cannot make the notifier fire again.
//! Emission is gated on the snapshot value alone.

use serde::Serialize;

/// Identity of the scroll-to-bottom action. Changes only when the
/// container is remounted, so hosts can key on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScrollToBottomHandle(u64);

impl ScrollToBottomHandle {
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollMeta {
    /// Whether the jump-to-bottom button should show.
    pub visible: bool,
    pub has_new: bool,
    pub new_count: usize,
    pub scroll_to_bottom: ScrollToBottomHandle,
}

impl ScrollMeta {
    #[must_use]
    pub fn from_state(is_at_bottom: bool, unread: usize, handle: ScrollToBottomHandle) -> Self {
        Self { visible: !is_at_bottom, has_new: unread > 0, new_count: unread, scroll_to_bottom: handle }
    }
}

#[derive(Debug, Default)]
pub struct MetaNotifier {
    last: Option<ScrollMeta>,
}

impl MetaNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `observer` only if `meta` differs from the last emitted value.
    pub fn publish<F>(&mut self, meta: ScrollMeta, observer: F) -> bool
    where
        F: FnOnce(&ScrollMeta),
    {
        if self.last.as_ref() == Some(&meta) {
            return false;
        }
        observer(&meta);
        self.last = Some(meta);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
