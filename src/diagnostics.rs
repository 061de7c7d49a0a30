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

//! Structured diagnostics emitted by the scroll engine.
//!
//! The engine never fails loudly; it reports what it did (or declined to
//! do) through a [`DiagnosticSink`]. The default sink discards everything.

use serde::Serialize;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticLabel {
    Restoration,
    RestorationSkip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticReason {
    DeltaGrowth,
    AnchorFallback,
    AnchorFallbackDeferred,
    NonpositiveDeltaNoAnchor,
}

impl DiagnosticReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeltaGrowth => "delta-growth",
            Self::AnchorFallback => "anchor-fallback",
            Self::AnchorFallbackDeferred => "anchor-fallback-deferred",
            Self::NonpositiveDeltaNoAnchor => "nonpositive-delta-no-anchor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub label: DiagnosticLabel,
    pub reason: DiagnosticReason,
    pub scroll_top_before: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_top_after: Option<f64>,
    pub height_delta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
}

pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: &Diagnostic);
}

/// Disabled diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: &Diagnostic) {}
}

/// Forwards diagnostics to `tracing` under the `diagnostics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, d: &Diagnostic) {
        tracing::debug!(
            target: "diagnostics",
            label = ?d.label,
            reason = d.reason.as_str(),
            scroll_top_before = d.scroll_top_before,
            scroll_top_after = ?d.scroll_top_after,
            height_delta = d.height_delta,
            anchor_id = ?d.anchor_id,
            "scroll restoration"
        );
    }
}

/// One JSON object per line. Write errors are dropped; diagnostics must
/// never take the host down.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for JsonLinesSink<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if serde_json::to_writer(&mut self.writer, diagnostic).is_ok() {
            let _ = self.writer.write_all(b"\n");
        }
    }
}

/// Sends each diagnostic to both sinks, left first.
impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.0.emit(diagnostic);
        self.1.emit(diagnostic);
    }
}

/// Keeps every diagnostic in memory. Clones share the same buffer, so one
/// handle can be given to the engine and another kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Diagnostic>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl DiagnosticSink for Recorder {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.events.borrow_mut().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagnostic {
        Diagnostic {
            label: DiagnosticLabel::RestorationSkip,
            reason: DiagnosticReason::NonpositiveDeltaNoAnchor,
            scroll_top_before: 40.0,
            scroll_top_after: None,
            height_delta: -3.0,
            anchor_id: Some("m-9".to_owned()),
        }
    }

    #[test]
    fn json_lines_use_kebab_case_labels() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&sample());
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["label"], "restoration-skip");
        assert_eq!(value["reason"], "nonpositive-delta-no-anchor");
        assert!(value.get("scroll_top_after").is_none());
    }

    #[test]
    fn recorder_clones_share_storage() {
        let recorder = Recorder::new();
        let mut handle = recorder.clone();
        handle.emit(&sample());
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.drain().len(), 1);
        assert!(recorder.is_empty());
    }

    #[test]
    fn paired_sinks_both_receive() {
        let recorder = Recorder::new();
        let mut pair = (recorder.clone(), JsonLinesSink::new(Vec::new()));
        pair.emit(&sample());
        pair.emit(&sample());
        assert_eq!(recorder.len(), 2);
        let out = String::from_utf8(pair.1.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn reason_strings_match_serialized_form() {
        for reason in [
            DiagnosticReason::DeltaGrowth,
            DiagnosticReason::AnchorFallback,
            DiagnosticReason::AnchorFallbackDeferred,
            DiagnosticReason::NonpositiveDeltaNoAnchor,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json.trim_matches('"'), reason.as_str());
        }
    }
}
