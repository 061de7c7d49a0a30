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

//! Scroll container geometry and the at-bottom classification.

use serde::{Deserialize, Serialize};

/// Live geometry of a scroll container, read at the moment of use.
///
/// Units are whatever the host lays out in: CSS pixels in a browser,
/// terminal rows in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self { scroll_top, scroll_height, client_height }
    }

    /// Remaining distance to the bottom edge, clamped to non-negative.
    #[must_use]
    pub fn distance_from_bottom(&self) -> f64 {
        (self.scroll_height - (self.scroll_top + self.client_height)).max(0.0)
    }

    /// Largest valid `scroll_top` for the current content.
    #[must_use]
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    #[must_use]
    pub fn is_at_bottom(&self, threshold: f64) -> bool {
        self.distance_from_bottom() <= threshold
    }
}

/// Derived position classification. Never stored across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub distance_from_bottom: f64,
    pub is_at_bottom: bool,
}

impl ScrollState {
    /// Optimistic default used before the container is mounted.
    pub const UNMOUNTED: Self = Self { distance_from_bottom: 0.0, is_at_bottom: true };
}

/// Classify the container position against `threshold`.
///
/// `None` means the container is not mounted yet; that is treated as being
/// at the bottom so the first render never arms the unread counter.
#[must_use]
pub fn classify_distance(metrics: Option<ScrollMetrics>, threshold: f64) -> ScrollState {
    let Some(metrics) = metrics else {
        return ScrollState::UNMOUNTED;
    };
    let distance_from_bottom = metrics.distance_from_bottom();
    ScrollState { distance_from_bottom, is_at_bottom: distance_from_bottom <= threshold }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// The scrollable element the engine reads from and writes to.
///
/// Implementations must report live values: `scroll_height` can change
/// without any scroll event (late image loads, prepends).
pub trait ScrollContainer {
    fn metrics(&self) -> ScrollMetrics;

    fn set_scroll_top(&mut self, scroll_top: f64, behavior: ScrollBehavior);

    /// Top of the rendered message `id` relative to the viewport top, or
    /// `None` when that message is not currently rendered.
    fn message_offset(&self, id: &str) -> Option<f64>;

    /// The rendered message nearest the viewport top and its offset.
    fn first_visible_message(&self) -> Option<(String, f64)>;

    /// Jump to the end of the content. Safe to call when already there.
    fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) {
        let max = self.metrics().max_scroll_top();
        self.set_scroll_top(max, behavior);
    }
}
