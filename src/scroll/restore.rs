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

//! Keeping the reading position still when older messages are prepended.
//!
//! A [`BoundaryMarker`] is captured right before a page of history is
//! requested and consumed once, right after the grown list has been laid
//! out. Growth in content height is added to the old scroll offset. When
//! the height did not grow (late layout shifts can do that) the anchor
//! message is looked up instead, once immediately and then on a bounded
//! number of following frames.

use super::delta::Identified;
use super::geometry::{ScrollBehavior, ScrollContainer};
use crate::diagnostics::{Diagnostic, DiagnosticLabel, DiagnosticReason, DiagnosticSink};

/// The message nearest the viewport top when the marker was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub id: String,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryMarker {
    pub scroll_height_before: f64,
    pub scroll_top_before: f64,
    pub anchor: Option<Anchor>,
}

impl BoundaryMarker {
    pub fn capture<C: ScrollContainer + ?Sized>(container: &C) -> Self {
        let metrics = container.metrics();
        Self {
            scroll_height_before: metrics.scroll_height,
            scroll_top_before: metrics.scroll_top,
            anchor: container.first_visible_message().map(|(id, offset)| Anchor { id, offset }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(DiagnosticReason),
    /// Anchor not rendered yet; another attempt runs on the next frame.
    Deferred,
    Skipped,
    /// No marker pending, or this exact list was already handled.
    Ignored,
}

struct PendingRetry {
    marker: BoundaryMarker,
    height_delta: f64,
    frames_left: u32,
}

pub struct Restorer {
    marker: Option<BoundaryMarker>,
    retry: Option<PendingRetry>,
    /// Ids of the last list restoration ran for, compared exactly.
    last_ids: Option<Vec<String>>,
    retry_frames: u32,
}

impl Restorer {
    #[must_use]
    pub fn new(retry_frames: u32) -> Self {
        Self { marker: None, retry: None, last_ids: None, retry_frames }
    }

    /// Record the boundary before a history fetch. Replaces any stale marker.
    pub fn capture<C: ScrollContainer + ?Sized>(&mut self, container: &C) {
        self.retry = None;
        self.marker = Some(BoundaryMarker::capture(container));
    }

    #[must_use]
    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.marker.is_some() || self.retry.is_some()
    }

    /// Drop a captured marker that no list change consumed. A deferred
    /// retry already in progress is left alone.
    pub fn discard_marker(&mut self) -> bool {
        self.marker.take().is_some()
    }

    /// Drop the marker and any deferred retry.
    pub fn cancel(&mut self) {
        self.marker = None;
        self.retry = None;
    }

    /// Forget everything, including which list was last handled.
    pub fn reset(&mut self) {
        self.cancel();
        self.last_ids = None;
    }

    /// Run restoration against the freshly laid-out `container`.
    ///
    /// Calling this again with a structurally equal list is a no-op.
    pub fn restore<M, C>(
        &mut self,
        messages: &[M],
        container: &mut C,
        sink: &mut dyn DiagnosticSink,
    ) -> RestoreOutcome
    where
        M: Identified,
        C: ScrollContainer + ?Sized,
    {
        if self.last_ids.as_deref().is_some_and(|last| same_ids(last, messages)) {
            return RestoreOutcome::Ignored;
        }
        let Some(marker) = self.marker.take() else {
            return RestoreOutcome::Ignored;
        };
        self.last_ids = Some(messages.iter().map(|m| m.id().to_owned()).collect());

        let height_delta = container.metrics().scroll_height - marker.scroll_height_before;
        if height_delta > 0.0 {
            let target = marker.scroll_top_before + height_delta;
            container.set_scroll_top(target, ScrollBehavior::Instant);
            tracing::debug!(height_delta, target, "restored scroll after prepend");
            emit(
                sink,
                DiagnosticLabel::Restoration,
                DiagnosticReason::DeltaGrowth,
                &marker,
                Some(target),
                height_delta,
            );
            return RestoreOutcome::Restored(DiagnosticReason::DeltaGrowth);
        }

        if let Some(target) = anchor_target(&marker, container) {
            container.set_scroll_top(target, ScrollBehavior::Instant);
            emit(
                sink,
                DiagnosticLabel::Restoration,
                DiagnosticReason::AnchorFallback,
                &marker,
                Some(target),
                height_delta,
            );
            return RestoreOutcome::Restored(DiagnosticReason::AnchorFallback);
        }

        if marker.anchor.is_some() && self.retry_frames > 0 {
            tracing::debug!(height_delta, "anchor not rendered, deferring restoration");
            self.retry = Some(PendingRetry { marker, height_delta, frames_left: self.retry_frames });
            return RestoreOutcome::Deferred;
        }

        skip(sink, &marker, height_delta);
        RestoreOutcome::Skipped
    }

    /// Retry a deferred anchor lookup. Returns `None` when nothing is pending.
    pub fn on_frame<C>(
        &mut self,
        container: &mut C,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<RestoreOutcome>
    where
        C: ScrollContainer + ?Sized,
    {
        let mut retry = self.retry.take()?;
        if let Some(target) = anchor_target(&retry.marker, container) {
            container.set_scroll_top(target, ScrollBehavior::Instant);
            emit(
                sink,
                DiagnosticLabel::Restoration,
                DiagnosticReason::AnchorFallbackDeferred,
                &retry.marker,
                Some(target),
                retry.height_delta,
            );
            return Some(RestoreOutcome::Restored(DiagnosticReason::AnchorFallbackDeferred));
        }

        retry.frames_left = retry.frames_left.saturating_sub(1);
        if retry.frames_left > 0 {
            self.retry = Some(retry);
            return Some(RestoreOutcome::Deferred);
        }
        skip(sink, &retry.marker, retry.height_delta);
        Some(RestoreOutcome::Skipped)
    }
}

fn same_ids<M: Identified>(last: &[String], messages: &[M]) -> bool {
    last.len() == messages.len() && last.iter().zip(messages).all(|(a, m)| a == m.id())
}

fn anchor_target<C>(marker: &BoundaryMarker, container: &C) -> Option<f64>
where
    C: ScrollContainer + ?Sized,
{
    let anchor = marker.anchor.as_ref()?;
    let current = container.message_offset(&anchor.id)?;
    Some(marker.scroll_top_before + (current - anchor.offset))
}

fn skip(sink: &mut dyn DiagnosticSink, marker: &BoundaryMarker, height_delta: f64) {
    tracing::debug!(height_delta, "restoration skipped: no growth and no anchor");
    emit(
        sink,
        DiagnosticLabel::RestorationSkip,
        DiagnosticReason::NonpositiveDeltaNoAnchor,
        marker,
        None,
        height_delta,
    );
}

fn emit(
    sink: &mut dyn DiagnosticSink,
    label: DiagnosticLabel,
    reason: DiagnosticReason,
    marker: &BoundaryMarker,
    scroll_top_after: Option<f64>,
    height_delta: f64,
) {
    sink.emit(&Diagnostic {
        label,
        reason,
        scroll_top_before: marker.scroll_top_before,
        scroll_top_after,
        height_delta,
        anchor_id: marker.anchor.as_ref().map(|a| a.id.clone()),
    });
}
