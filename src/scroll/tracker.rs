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

//! Unread counter state machine.
//!
//! Two orthogonal facts are tracked: whether the viewport sits at the
//! bottom, and how many tail messages arrived while it did not. Every
//! transition keeps `is_at_bottom => unread == 0`.

use super::delta::MessageDelta;
use super::geometry::{ScrollBehavior, ScrollState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnreadTracker {
    is_at_bottom: bool,
    unread: usize,
}

impl Default for UnreadTracker {
    fn default() -> Self {
        Self { is_at_bottom: true, unread: 0 }
    }
}

impl UnreadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.is_at_bottom
    }

    #[must_use]
    pub fn unread(&self) -> usize {
        self.unread
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a freshly computed scroll position. Reaching the bottom
    /// catches the reader up.
    pub fn on_scroll(&mut self, state: ScrollState) {
        self.is_at_bottom = state.is_at_bottom;
        if self.is_at_bottom {
            self.unread = 0;
        }
    }

    /// Apply a list mutation. Returns the scroll action the host must run,
    /// if any. `Unknown` must be resolved by the caller before reaching here.
    pub fn on_delta(
        &mut self,
        delta: MessageDelta,
        append_behavior: ScrollBehavior,
    ) -> Option<ScrollBehavior> {
        match delta {
            MessageDelta::Initial => {
                self.is_at_bottom = true;
                self.unread = 0;
                Some(ScrollBehavior::Instant)
            }
            MessageDelta::Append { appended } if appended > 0 => {
                if self.is_at_bottom {
                    Some(append_behavior)
                } else {
                    self.unread = self.unread.saturating_add(appended);
                    None
                }
            }
            MessageDelta::Append { .. }
            | MessageDelta::Pagination { .. }
            | MessageDelta::NoOp
            | MessageDelta::Unknown => None,
        }
    }
}
