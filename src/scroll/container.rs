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

//! In-memory scroll container with explicitly set geometry.
//!
//! Backs the headless replayer and the engine's tests. Writes to
//! `scroll_top` are clamped the way a browser clamps them.

use super::geometry::{ScrollBehavior, ScrollContainer, ScrollMetrics};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct StaticContainer {
    metrics: ScrollMetrics,
    offsets: HashMap<String, f64>,
    first_visible: Option<String>,
    writes: Vec<(f64, ScrollBehavior)>,
    bottom_jumps: usize,
}

impl StaticContainer {
    #[must_use]
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            metrics: ScrollMetrics::new(scroll_top, scroll_height, client_height),
            ..Self::default()
        }
    }

    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.metrics.scroll_height = scroll_height;
    }

    pub fn set_client_height(&mut self, client_height: f64) {
        self.metrics.client_height = client_height;
    }

    /// Move the viewport as a user would. Not recorded as a write.
    pub fn user_scroll_to(&mut self, scroll_top: f64) {
        self.metrics.scroll_top = clamp_top(&self.metrics, scroll_top);
    }

    pub fn set_offset(&mut self, id: &str, offset: f64) {
        self.offsets.insert(id.to_owned(), offset);
    }

    pub fn clear_offset(&mut self, id: &str) {
        self.offsets.remove(id);
    }

    pub fn set_first_visible(&mut self, id: &str) {
        self.first_visible = Some(id.to_owned());
    }

    /// Programmatic `scroll_top` writes, in order.
    #[must_use]
    pub fn writes(&self) -> &[(f64, ScrollBehavior)] {
        &self.writes
    }

    #[must_use]
    pub fn bottom_jumps(&self) -> usize {
        self.bottom_jumps
    }
}

fn clamp_top(metrics: &ScrollMetrics, scroll_top: f64) -> f64 {
    scroll_top.clamp(0.0, metrics.max_scroll_top())
}

impl ScrollContainer for StaticContainer {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn set_scroll_top(&mut self, scroll_top: f64, behavior: ScrollBehavior) {
        self.metrics.scroll_top = clamp_top(&self.metrics, scroll_top);
        self.writes.push((self.metrics.scroll_top, behavior));
    }

    fn message_offset(&self, id: &str) -> Option<f64> {
        self.offsets.get(id).copied()
    }

    fn first_visible_message(&self) -> Option<(String, f64)> {
        let id = self.first_visible.as_ref()?;
        let offset = self.offsets.get(id)?;
        Some((id.clone(), *offset))
    }

    fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) {
        self.bottom_jumps += 1;
        let max = self.metrics.max_scroll_top();
        self.set_scroll_top(max, behavior);
    }
}
