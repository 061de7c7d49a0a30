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

//! Orchestration: the host feeds scroll events, message lists and frame
//! ticks in; scroll writes and meta snapshots come out.

use super::delta::{Identified, ListSnapshot, MessageDelta, classify_delta, tail_append_count};
use super::frame::FrameScheduler;
use super::geometry::{ScrollBehavior, ScrollContainer, ScrollState, classify_distance};
use super::notifier::{MetaNotifier, ScrollMeta, ScrollToBottomHandle};
use super::pagination::{DEFAULT_COOLDOWN, TopSentinel};
use super::restore::{RestoreOutcome, Restorer};
use super::strategy::{ScrollStrategy, UnknownDeltaPolicy};
use super::tracker::UnreadTracker;
use crate::diagnostics::{DiagnosticSink, NullSink};
use std::time::{Duration, Instant};

pub const DEFAULT_RETRY_FRAMES: u32 = 1;
pub const DEFAULT_TOP_MARGIN: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    pub strategy: ScrollStrategy,
    pub threshold: f64,
    pub retry_frames: u32,
    pub pagination_cooldown: Duration,
    /// Distance from the top that requests older history. `None` leaves
    /// history requests entirely to the host.
    pub top_margin: Option<f64>,
}

impl ScrollOptions {
    #[must_use]
    pub fn for_strategy(strategy: ScrollStrategy) -> Self {
        Self {
            strategy,
            threshold: strategy.threshold(),
            retry_frames: DEFAULT_RETRY_FRAMES,
            pagination_cooldown: DEFAULT_COOLDOWN,
            top_margin: Some(DEFAULT_TOP_MARGIN),
        }
    }
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self::for_strategy(ScrollStrategy::default())
    }
}

/// What a list replacement did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagesOutcome {
    /// Classification after the unknown-delta policy was applied.
    pub delta: MessageDelta,
    pub scrolled: Option<ScrollBehavior>,
    pub restore: Option<RestoreOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub restore: Option<RestoreOutcome>,
    /// The host should fetch a page of older messages and call
    /// [`AutoScroll::older_loaded`] when it lands.
    pub load_older: bool,
}

pub struct AutoScroll<C: ScrollContainer> {
    options: ScrollOptions,
    container: Option<C>,
    generation: u64,
    tracker: UnreadTracker,
    previous: Option<ListSnapshot>,
    restorer: Restorer,
    scheduler: FrameScheduler,
    sentinel: TopSentinel,
    notifier: MetaNotifier,
    sink: Box<dyn DiagnosticSink>,
}

impl<C: ScrollContainer> AutoScroll<C> {
    #[must_use]
    pub fn new(options: ScrollOptions) -> Self {
        Self {
            options,
            container: None,
            generation: 0,
            tracker: UnreadTracker::new(),
            previous: None,
            restorer: Restorer::new(options.retry_frames),
            scheduler: FrameScheduler::new(),
            sentinel: TopSentinel::new(
                options.top_margin.unwrap_or_default(),
                options.pagination_cooldown,
            ),
            notifier: MetaNotifier::new(),
            sink: Box::new(NullSink),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    #[must_use]
    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    // --- lifecycle ---

    /// Attach a container. Any previous one is unmounted first, and all
    /// state starts over.
    pub fn mount(&mut self, container: C) {
        if self.container.is_some() {
            self.unmount();
        }
        self.generation = self.generation.wrapping_add(1);
        self.container = Some(container);
        tracing::debug!(generation = self.generation, "scroll container mounted");
    }

    /// Detach the container, cancelling deferred work and resetting state.
    pub fn unmount(&mut self) -> Option<C> {
        self.scheduler.cancel();
        self.restorer.reset();
        self.sentinel.reset();
        self.tracker.reset();
        self.notifier.reset();
        self.previous = None;
        let container = self.container.take();
        if container.is_some() {
            tracing::debug!(generation = self.generation, "scroll container unmounted");
        }
        container
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    #[must_use]
    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Mutable access for the host's layout pass.
    pub fn container_mut(&mut self) -> Option<&mut C> {
        self.container.as_mut()
    }

    // --- state ---

    /// Classification from live geometry, read now.
    #[must_use]
    pub fn state(&self) -> ScrollState {
        let metrics = self.container.as_ref().map(ScrollContainer::metrics);
        classify_distance(metrics, self.options.threshold)
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.tracker.is_at_bottom()
    }

    #[must_use]
    pub fn unread(&self) -> usize {
        self.tracker.unread()
    }

    #[must_use]
    pub fn scroll_to_bottom_handle(&self) -> ScrollToBottomHandle {
        ScrollToBottomHandle::new(self.generation)
    }

    #[must_use]
    pub fn meta(&self) -> ScrollMeta {
        ScrollMeta::from_state(
            self.tracker.is_at_bottom(),
            self.tracker.unread(),
            self.scroll_to_bottom_handle(),
        )
    }

    /// Hand the current meta to `observer` if it changed since last time.
    pub fn publish_meta<F>(&mut self, observer: F) -> bool
    where
        F: FnOnce(&ScrollMeta),
    {
        let meta = self.meta();
        self.notifier.publish(meta, observer)
    }

    // --- inputs ---

    /// A native scroll event. Classification waits for the next frame.
    pub fn on_scroll(&mut self) {
        self.scheduler.request_scroll_classification();
    }

    pub fn on_frame(&mut self, now: Instant) -> FrameOutcome {
        let work = self.scheduler.begin_frame();
        if work.classify_scroll {
            self.classify_scroll_now();
        }
        let Some(container) = self.container.as_mut() else {
            return FrameOutcome::default();
        };

        let restore = self.restorer.on_frame(container, self.sink.as_mut());
        let load_older = self.options.top_margin.is_some()
            && self.previous.as_ref().is_some_and(|p| p.len > 0)
            && self.sentinel.should_trigger(container.metrics(), now);
        if load_older {
            tracing::debug!(frame = work.frame, "top reached, requesting older messages");
            self.restorer.capture(container);
        }
        FrameOutcome { restore, load_older }
    }

    /// Capture the restoration boundary ahead of a host-initiated history
    /// fetch. Returns `false` when no container is mounted.
    pub fn request_older(&mut self) -> bool {
        let Some(container) = self.container.as_ref() else {
            return false;
        };
        self.restorer.capture(container);
        true
    }

    /// A history fetch finished; `exhausted` means there is nothing older.
    /// Call after the resulting list, if any, went through `on_messages`;
    /// a boundary no prepend consumed is dropped here.
    pub fn older_loaded(&mut self, exhausted: bool) {
        self.sentinel.complete(exhausted);
        if self.restorer.discard_marker() {
            tracing::debug!(exhausted, "history fetch brought nothing, boundary dropped");
        }
    }

    /// A captured boundary or a deferred anchor retry is outstanding.
    #[must_use]
    pub fn restore_pending(&self) -> bool {
        self.restorer.is_pending()
    }

    /// The host replaced the message list and has laid it out.
    pub fn on_messages<M: Identified>(&mut self, messages: &[M]) -> MessagesOutcome {
        let current = ListSnapshot::of(messages);
        let raw = classify_delta(self.previous.as_ref(), &current);
        let delta = match raw {
            MessageDelta::Unknown => self.resolve_unknown(messages),
            other => other,
        };

        let scrolled = self.tracker.on_delta(delta, self.options.strategy.append_behavior());
        if let Some(behavior) = scrolled {
            self.scroll_to_bottom(behavior);
        }

        let restore = match (delta, self.container.as_mut()) {
            (MessageDelta::Pagination { .. }, Some(container)) if self.restorer.has_marker() => {
                Some(self.restorer.restore(messages, container, self.sink.as_mut()))
            }
            (MessageDelta::Pagination { prepended }, _) => {
                tracing::debug!(prepended, "prepend without a captured boundary");
                None
            }
            _ => None,
        };

        self.previous = Some(current);
        MessagesOutcome { delta, scrolled, restore }
    }

    /// Jump to the end. A no-op when unmounted; the next scroll event
    /// reconciles state.
    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        container.scroll_to_bottom(behavior);
        self.classify_scroll_now();
    }

    fn classify_scroll_now(&mut self) {
        let was_at_bottom = self.tracker.is_at_bottom();
        let state = self.state();
        self.tracker.on_scroll(state);
        if was_at_bottom != state.is_at_bottom {
            tracing::debug!(
                at_bottom = state.is_at_bottom,
                distance = state.distance_from_bottom,
                "scroll position changed"
            );
        }
    }

    fn resolve_unknown<M: Identified>(&self, messages: &[M]) -> MessageDelta {
        match self.options.strategy.unknown_delta_policy() {
            UnknownDeltaPolicy::Ignore => {
                tracing::debug!(len = messages.len(), "ignoring ambiguous list change");
                MessageDelta::Unknown
            }
            UnknownDeltaPolicy::TailAppend => {
                let previous_tail = self.previous.as_ref().and_then(|p| p.last_id.as_deref());
                match tail_append_count(previous_tail, messages) {
                    0 => MessageDelta::Unknown,
                    appended => MessageDelta::Append { appended },
                }
            }
        }
    }
}
