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

//! Simulated conversation: a finite history served newest-page-first, plus
//! an endless stream of live messages.

use super::ChatMessage;
use uuid::Uuid;

const AUTHORS: &[&str] = &["ana", "bo", "chidi", "dara", "eun"];

const PHRASES: &[&str] = &[
    "did the deploy go out?",
    "looks good to me, merging after lunch",
    "the flaky test is back, third time this week",
    "can someone check whether the cache is warming correctly on the staging box",
    "ack",
    "I pushed a fix for the off-by-one in the pager, it only showed up when the page size divided the history evenly",
    "lunch?",
    "reverting, the metrics dashboard went red",
];

#[derive(Debug)]
pub struct SimulatedFeed {
    /// History indices below this have not been served yet.
    cursor: usize,
    live_seq: usize,
}

impl SimulatedFeed {
    #[must_use]
    pub fn new(history_len: usize) -> Self {
        Self { cursor: history_len, live_seq: 0 }
    }

    /// The next `n` older messages, oldest first.
    pub fn older_page(&mut self, n: usize) -> Vec<ChatMessage> {
        let start = self.cursor.saturating_sub(n);
        let page = (start..self.cursor)
            .map(|seq| {
                let (author, body) = compose(seq);
                ChatMessage::new(Uuid::new_v4().to_string(), author, body)
            })
            .collect();
        self.cursor = start;
        page
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == 0
    }

    pub fn next_live(&mut self) -> ChatMessage {
        let seq = self.live_seq;
        self.live_seq += 1;
        let (author, body) = compose(seq.wrapping_mul(7).wrapping_add(3));
        ChatMessage::live(Uuid::new_v4().to_string(), author, body)
    }
}

/// Deterministic author and body for a sequence number. Bodies vary in
/// length and line count so wrapped heights differ between messages.
fn compose(seq: usize) -> (&'static str, String) {
    let author = AUTHORS[seq % AUTHORS.len()];
    let phrase = PHRASES[seq % PHRASES.len()];
    let body = match seq % 5 {
        0 => format!("#{seq} {phrase}"),
        1 | 2 => phrase.to_owned(),
        3 => format!("{phrase}\n{}", PHRASES[(seq / 2) % PHRASES.len()]),
        _ => format!("{phrase} {phrase}"),
    };
    (author, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pages_walk_back_until_exhausted() {
        let mut feed = SimulatedFeed::new(25);
        assert_eq!(feed.older_page(10).len(), 10);
        assert_eq!(feed.older_page(10).len(), 10);
        assert!(!feed.is_exhausted());
        assert_eq!(feed.older_page(10).len(), 5);
        assert!(feed.is_exhausted());
        assert!(feed.older_page(10).is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut feed = SimulatedFeed::new(30);
        let mut ids: HashSet<String> = feed.older_page(30).into_iter().map(|m| m.id).collect();
        for _ in 0..10 {
            assert!(ids.insert(feed.next_live().id));
        }
        assert_eq!(ids.len(), 40);
    }

    #[test]
    fn bodies_are_deterministic() {
        assert_eq!(compose(3), compose(3));
        assert!(compose(3).1.contains('\n'));
    }
}
