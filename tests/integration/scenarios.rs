// =====
// TESTS: 7
// =====
//
// End-to-end scenarios through the engine: appends at and away from the
// bottom, and the three restoration paths after a prepend.

use chat_scroll::diagnostics::{DiagnosticLabel, DiagnosticReason};
use chat_scroll::scroll::{
    MessageDelta, RestoreOutcome, ScrollContainer, ScrollStrategy, StaticContainer,
};
use pretty_assertions::assert_eq;
use std::time::Instant;

use crate::helpers::{container, engine, engine_with, ids, scroll_to_distance, user_scroll};

// --- Appends ---

#[test]
fn append_at_bottom_stays_pinned() {
    let (mut engine, _) = engine(ScrollStrategy::Legacy);
    engine.on_messages(&ids(0..3));
    assert!(engine.container().unwrap().metrics().is_at_bottom(0.0));

    container(&mut engine).set_scroll_height(1100.0);
    let outcome = engine.on_messages(&ids(0..4));
    assert_eq!(outcome.delta, MessageDelta::Append { appended: 1 });

    let meta = engine.meta();
    assert!(engine.is_at_bottom());
    assert_eq!(meta.new_count, 0);
    assert!(!meta.visible);
}

#[test]
fn append_while_scrolled_up_raises_indicator() {
    let (mut engine, _) = engine(ScrollStrategy::Legacy);
    engine.on_messages(&ids(0..3));
    scroll_to_distance(&mut engine, 300.0);
    assert!(!engine.is_at_bottom());

    engine.on_messages(&ids(0..4));
    let meta = engine.meta();
    assert_eq!(meta.new_count, 1);
    assert!(meta.has_new);
    assert!(meta.visible);
}

#[test]
fn rewritten_threshold_is_tighter_than_legacy() {
    let (mut legacy, _) = engine(ScrollStrategy::Legacy);
    let (mut rewritten, _) = engine(ScrollStrategy::Rewritten);
    for engine in [&mut legacy, &mut rewritten] {
        engine.on_messages(&ids(0..3));
        scroll_to_distance(engine, 30.0);
    }
    assert!(legacy.is_at_bottom());
    assert!(!rewritten.is_at_bottom());
}

// --- Restoration after prepend ---

#[test]
fn pagination_restores_by_height_growth() {
    let (mut engine, recorder) =
        engine_with(ScrollStrategy::Rewritten, StaticContainer::new(500.0, 1000.0, 500.0));
    engine.on_messages(&ids(5..8));
    // A tail message read at the bottom.
    assert!(engine.on_messages(&ids(5..9)).scrolled.is_some());
    assert_eq!(engine.container().unwrap().metrics().scroll_top, 500.0);
    assert_eq!(engine.unread(), 0);

    assert!(engine.request_older());
    container(&mut engine).set_scroll_height(1200.0);
    let outcome = engine.on_messages(&ids(0..9));

    assert_eq!(outcome.delta, MessageDelta::Pagination { prepended: 5 });
    assert_eq!(outcome.scrolled, None);
    assert_eq!(outcome.restore, Some(RestoreOutcome::Restored(DiagnosticReason::DeltaGrowth)));
    assert_eq!(engine.container().unwrap().metrics().scroll_top, 700.0);
    assert_eq!(engine.meta().new_count, 0);

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].label, DiagnosticLabel::Restoration);
    assert_eq!(events[0].scroll_top_after, Some(700.0));
}

#[test]
fn pagination_without_growth_falls_back_to_anchor() {
    let mut start = StaticContainer::new(100.0, 1000.0, 400.0);
    start.set_offset("m-5", 0.0);
    start.set_first_visible("m-5");
    let (mut engine, recorder) = engine_with(ScrollStrategy::Rewritten, start);
    engine.on_messages(&ids(5..10));
    user_scroll(&mut engine, 100.0);

    engine.request_older();
    container(&mut engine).set_scroll_height(990.0);
    container(&mut engine).set_offset("m-5", 25.0);
    let outcome = engine.on_messages(&ids(0..10));

    assert_eq!(outcome.restore, Some(RestoreOutcome::Restored(DiagnosticReason::AnchorFallback)));
    assert_eq!(engine.container().unwrap().metrics().scroll_top, 125.0);
    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].reason, DiagnosticReason::AnchorFallback);
    assert_eq!(events[0].height_delta, -10.0);
    assert_eq!(events[0].anchor_id.as_deref(), Some("m-5"));
}

#[test]
fn anchor_found_on_next_frame() {
    let mut start = StaticContainer::new(100.0, 1000.0, 400.0);
    start.set_offset("m-5", 0.0);
    start.set_first_visible("m-5");
    let (mut engine, recorder) = engine_with(ScrollStrategy::Rewritten, start);
    engine.on_messages(&ids(5..10));
    user_scroll(&mut engine, 100.0);

    engine.request_older();
    container(&mut engine).clear_offset("m-5");
    assert_eq!(engine.on_messages(&ids(0..10)).restore, Some(RestoreOutcome::Deferred));
    assert!(recorder.is_empty());

    container(&mut engine).set_offset("m-5", 12.0);
    let frame = engine.on_frame(Instant::now());
    assert_eq!(
        frame.restore,
        Some(RestoreOutcome::Restored(DiagnosticReason::AnchorFallbackDeferred))
    );
    assert_eq!(engine.container().unwrap().metrics().scroll_top, 112.0);
}

#[test]
fn unresolvable_anchor_skips_and_leaves_position() {
    let mut start = StaticContainer::new(100.0, 1000.0, 400.0);
    start.set_offset("m-5", 0.0);
    start.set_first_visible("m-5");
    let (mut engine, recorder) = engine_with(ScrollStrategy::Rewritten, start);
    engine.on_messages(&ids(5..10));
    user_scroll(&mut engine, 100.0);
    let writes_before = engine.container().unwrap().writes().len();

    engine.request_older();
    container(&mut engine).clear_offset("m-5");
    assert_eq!(engine.on_messages(&ids(0..10)).restore, Some(RestoreOutcome::Deferred));
    assert_eq!(engine.on_frame(Instant::now()).restore, Some(RestoreOutcome::Skipped));
    assert_eq!(engine.on_frame(Instant::now()).restore, None);

    let container = engine.container().unwrap();
    assert_eq!(container.metrics().scroll_top, 100.0);
    assert_eq!(container.writes().len(), writes_before);

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].label, DiagnosticLabel::RestorationSkip);
    assert_eq!(events[0].reason, DiagnosticReason::NonpositiveDeltaNoAnchor);
    assert_eq!(events[0].scroll_top_after, None);
}
