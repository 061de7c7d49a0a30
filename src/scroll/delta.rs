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

//! Classifying message-list replacements by head/tail identity.

use serde::Serialize;

/// Anything with a stable unique id. The id is the only field the scroll
/// engine ever inspects.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for String {
    fn id(&self) -> &str {
        self
    }
}

impl Identified for &str {
    fn id(&self) -> &str {
        self
    }
}

/// Head/tail summary of a message list taken at one render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListSnapshot {
    pub len: usize,
    pub first_id: Option<String>,
    pub last_id: Option<String>,
}

impl ListSnapshot {
    #[must_use]
    pub fn of<M: Identified>(messages: &[M]) -> Self {
        Self {
            len: messages.len(),
            first_id: messages.first().map(|m| m.id().to_owned()),
            last_id: messages.last().map(|m| m.id().to_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageDelta {
    /// First list seen since mount.
    Initial,
    NoOp,
    /// Older entries arrived at the head; the tail is untouched.
    Pagination { prepended: usize },
    /// New entries arrived at the tail.
    Append { appended: usize },
    /// Shrink, head and tail both changed, or a head swap without growth.
    Unknown,
}

#[must_use]
pub fn classify_delta(previous: Option<&ListSnapshot>, current: &ListSnapshot) -> MessageDelta {
    let Some(previous) = previous else {
        return MessageDelta::Initial;
    };
    if previous == current {
        return MessageDelta::NoOp;
    }

    let head_changed = previous.first_id != current.first_id;
    let tail_changed = previous.last_id != current.last_id;
    let grew = current.len > previous.len;
    let growth = current.len.saturating_sub(previous.len);

    if previous.len == 0 && grew {
        return MessageDelta::Append { appended: growth };
    }
    match (head_changed, tail_changed) {
        (true, false) if grew => MessageDelta::Pagination { prepended: growth },
        (false, true) if grew => MessageDelta::Append { appended: growth },
        _ => MessageDelta::Unknown,
    }
}

/// Entries after `previous_last_id` in `current`; 0 when that id is gone.
#[must_use]
pub fn tail_append_count<M: Identified>(previous_last_id: Option<&str>, current: &[M]) -> usize {
    let Some(previous_last_id) = previous_last_id else {
        return current.len();
    };
    current
        .iter()
        .rposition(|m| m.id() == previous_last_id)
        .map_or(0, |idx| current.len() - idx - 1)
}
