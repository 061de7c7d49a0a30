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

//! Top-of-list trigger for loading older history.
//!
//! While the viewport stays near the top the trigger condition holds on
//! every frame, so firing is gated twice: at most one request in flight,
//! and a cooldown between consecutive requests.

use super::geometry::ScrollMetrics;
use std::time::{Duration, Instant};

pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(750);

#[derive(Debug)]
pub struct TopSentinel {
    margin: f64,
    cooldown: Duration,
    last_fired: Option<Instant>,
    in_flight: bool,
    exhausted: bool,
}

impl TopSentinel {
    #[must_use]
    pub fn new(margin: f64, cooldown: Duration) -> Self {
        Self { margin, cooldown, last_fired: None, in_flight: false, exhausted: false }
    }

    /// Whether a page of older messages should be requested now. A `true`
    /// return marks the request as in flight.
    pub fn should_trigger(&mut self, metrics: ScrollMetrics, now: Instant) -> bool {
        if self.exhausted || self.in_flight || metrics.scroll_top > self.margin {
            return false;
        }
        if let Some(last) = self.last_fired
            && now.saturating_duration_since(last) < self.cooldown
        {
            return false;
        }
        self.in_flight = true;
        self.last_fired = Some(now);
        true
    }

    /// The in-flight request finished. `exhausted` stops further triggers.
    pub fn complete(&mut self, exhausted: bool) {
        self.in_flight = false;
        self.exhausted = exhausted;
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
        self.in_flight = false;
        self.exhausted = false;
    }
}
