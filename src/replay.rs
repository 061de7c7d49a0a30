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

//! Headless replay of scripted scroll sessions.
//!
//! A script is a JSON array of steps driving an [`AutoScroll`] over a
//! [`StaticContainer`]. Every emitted meta snapshot, list classification
//! and diagnostic is recorded in order and written out as JSON lines.

use crate::diagnostics::{Diagnostic, Recorder};
use crate::error::AppError;
use crate::scroll::{
    AutoScroll, MessageDelta, ScrollBehavior, ScrollMeta, ScrollOptions, StaticContainer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Mount {
        scroll_top: f64,
        scroll_height: f64,
        client_height: f64,
    },
    /// Geometry changed without a scroll event (render, image load).
    Layout {
        #[serde(default)]
        scroll_height: Option<f64>,
        #[serde(default)]
        scroll_top: Option<f64>,
        #[serde(default)]
        offsets: BTreeMap<String, f64>,
        #[serde(default)]
        hidden: Vec<String>,
        #[serde(default)]
        first_visible: Option<String>,
    },
    /// A user scroll. Classified on the next `frame`.
    Scroll {
        scroll_top: f64,
    },
    Messages {
        ids: Vec<String>,
    },
    RequestOlder,
    Frame,
    ScrollToBottom {
        #[serde(default)]
        behavior: Option<ScrollBehavior>,
    },
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Meta {
        step: usize,
        #[serde(flatten)]
        meta: ScrollMeta,
    },
    Messages {
        step: usize,
        delta: MessageDelta,
        scrolled: Option<ScrollBehavior>,
    },
    Diagnostic {
        step: usize,
        #[serde(flatten)]
        diagnostic: Diagnostic,
    },
}

pub fn load_script(path: &Path) -> Result<Vec<Step>, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| AppError::ScriptRead { path: path.display().to_string() })?;
    parse_script(&content, path)
}

pub fn parse_script(content: &str, path: &Path) -> Result<Vec<Step>, AppError> {
    serde_json::from_str(content).map_err(|e| AppError::ScriptParse {
        path: path.display().to_string(),
        detail: e.to_string(),
    })
}

/// Replay `steps`. History requests are never triggered automatically;
/// scripts issue `request_older` themselves.
#[must_use]
pub fn run(steps: &[Step], options: ScrollOptions) -> Vec<Record> {
    let recorder = Recorder::new();
    let options = ScrollOptions { top_margin: None, ..options };
    let mut scroll: AutoScroll<StaticContainer> =
        AutoScroll::new(options).with_sink(recorder.clone());
    let mut records = Vec::new();

    for (step, op) in steps.iter().enumerate() {
        apply(&mut scroll, op, step, &mut records);
        records.extend(
            recorder.drain().into_iter().map(|diagnostic| Record::Diagnostic { step, diagnostic }),
        );
        scroll.publish_meta(|meta| records.push(Record::Meta { step, meta: *meta }));
    }
    tracing::debug!(steps = steps.len(), records = records.len(), "replay finished");
    records
}

fn apply(
    scroll: &mut AutoScroll<StaticContainer>,
    op: &Step,
    step: usize,
    records: &mut Vec<Record>,
) {
    match op {
        Step::Mount { scroll_top, scroll_height, client_height } => {
            scroll.mount(StaticContainer::new(*scroll_top, *scroll_height, *client_height));
        }
        Step::Layout { scroll_height, scroll_top, offsets, hidden, first_visible } => {
            let Some(container) = scroll.container_mut() else {
                tracing::debug!(step, "layout ignored: nothing mounted");
                return;
            };
            if let Some(height) = scroll_height {
                container.set_scroll_height(*height);
            }
            if let Some(top) = scroll_top {
                container.user_scroll_to(*top);
            }
            for (id, offset) in offsets {
                container.set_offset(id, *offset);
            }
            for id in hidden {
                container.clear_offset(id);
            }
            if let Some(id) = first_visible {
                container.set_first_visible(id);
            }
        }
        Step::Scroll { scroll_top } => {
            if let Some(container) = scroll.container_mut() {
                container.user_scroll_to(*scroll_top);
            }
            scroll.on_scroll();
        }
        Step::Messages { ids } => {
            let outcome = scroll.on_messages(ids);
            records.push(Record::Messages {
                step,
                delta: outcome.delta,
                scrolled: outcome.scrolled,
            });
        }
        Step::RequestOlder => {
            scroll.request_older();
        }
        Step::Frame => {
            scroll.on_frame(Instant::now());
        }
        Step::ScrollToBottom { behavior } => {
            scroll.scroll_to_bottom(behavior.unwrap_or(ScrollBehavior::Smooth));
        }
        Step::Unmount => {
            scroll.unmount();
        }
    }
}

pub fn write_records<W: Write>(records: &[Record], mut writer: W) -> anyhow::Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
