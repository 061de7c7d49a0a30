// =====
// TESTS: 8
// =====
//
// Invariants that must hold over whole sequences of scroll events and
// list replacements, under both strategies.

use chat_scroll::diagnostics::Recorder;
use chat_scroll::scroll::{
    MessageDelta, RestoreOutcome, Restorer, ScrollContainer, ScrollStrategy, StaticContainer,
};
use pretty_assertions::assert_eq;

use crate::helpers::{Engine, container, engine, ids, scroll_to_distance, user_scroll};

const STRATEGIES: [ScrollStrategy; 2] = [ScrollStrategy::Legacy, ScrollStrategy::Rewritten];

fn assert_bottom_implies_no_unread(engine: &Engine) {
    if engine.is_at_bottom() {
        assert_eq!(engine.unread(), 0);
    }
}

#[test]
fn at_bottom_always_means_nothing_unread() {
    // Positions wander up and down, with appends in between.
    let positions = [0.0, 550.0, 600.0, 120.0, 590.0, 300.0, 545.0, 600.0, 10.0, 600.0];
    for strategy in STRATEGIES {
        let (mut engine, _) = engine(strategy);
        let mut len = 3;
        engine.on_messages(&ids(0..len));
        for (step, top) in positions.into_iter().enumerate() {
            user_scroll(&mut engine, top);
            assert_bottom_implies_no_unread(&engine);
            let distance = 600.0 - top;
            let expected = distance <= strategy.threshold();
            assert_eq!(engine.is_at_bottom(), expected, "{strategy:?} step {step}");

            len += step % 3;
            engine.on_messages(&ids(0..len));
            assert_bottom_implies_no_unread(&engine);
        }
    }
}

#[test]
fn returning_to_bottom_clears_unread() {
    for strategy in STRATEGIES {
        let (mut engine, _) = engine(strategy);
        engine.on_messages(&ids(0..3));
        scroll_to_distance(&mut engine, 400.0);
        engine.on_messages(&ids(0..6));
        assert_eq!(engine.unread(), 3);

        scroll_to_distance(&mut engine, 0.0);
        assert!(engine.is_at_bottom());
        assert_eq!(engine.unread(), 0);
    }
}

#[test]
fn pagination_keeps_unread_and_never_jumps() {
    for strategy in STRATEGIES {
        let (mut engine, _) = engine(strategy);
        engine.on_messages(&ids(10..13));
        scroll_to_distance(&mut engine, 400.0);
        engine.on_messages(&ids(10..15));
        let unread = engine.unread();
        let jumps = engine.container().unwrap().bottom_jumps();

        engine.request_older();
        container(&mut engine).set_scroll_height(1300.0);
        let outcome = engine.on_messages(&ids(0..15));

        assert_eq!(outcome.delta, MessageDelta::Pagination { prepended: 10 });
        assert_eq!(engine.unread(), unread);
        assert_eq!(engine.container().unwrap().bottom_jumps(), jumps);
    }
}

#[test]
fn append_at_bottom_jumps_exactly_once() {
    for strategy in STRATEGIES {
        let (mut engine, _) = engine(strategy);
        engine.on_messages(&ids(0..3));
        for end in 4..8 {
            let jumps = engine.container().unwrap().bottom_jumps();
            let outcome = engine.on_messages(&ids(0..end));
            assert_eq!(outcome.scrolled, Some(strategy.append_behavior()));
            assert_eq!(engine.container().unwrap().bottom_jumps(), jumps + 1);
            assert_eq!(engine.unread(), 0);
        }
    }
}

#[test]
fn append_away_from_bottom_counts_growth() {
    for strategy in STRATEGIES {
        let (mut engine, _) = engine(strategy);
        engine.on_messages(&ids(0..3));
        scroll_to_distance(&mut engine, 250.0);
        let mut expected = 0;
        for (before, after) in [(3, 4), (4, 7), (7, 8), (8, 12)] {
            let jumps = engine.container().unwrap().bottom_jumps();
            engine.on_messages(&ids(0..after));
            expected += after - before;
            assert_eq!(engine.unread(), expected);
            assert_eq!(engine.container().unwrap().bottom_jumps(), jumps);
        }
    }
}

#[test]
fn structurally_equal_lists_restore_once() {
    let mut container = StaticContainer::new(200.0, 1000.0, 400.0);
    let mut recorder = Recorder::new();
    let mut restorer = Restorer::new(1);
    restorer.capture(&container);
    container.set_scroll_height(1250.0);

    let first = ids(0..8);
    let second = ids(0..8);
    let outcome = restorer.restore(&first, &mut container, &mut recorder);
    assert!(matches!(outcome, RestoreOutcome::Restored(_)));

    // A second pass with a fresh but identical list, even with a new marker.
    restorer.capture(&container);
    assert_eq!(restorer.restore(&second, &mut container, &mut recorder), RestoreOutcome::Ignored);
    assert_eq!(recorder.len(), 1);
    assert_eq!(container.metrics().scroll_top, 450.0);
}

#[test]
fn ambiguous_changes_never_panic_or_scroll() {
    for strategy in STRATEGIES {
        let (mut engine, _) = engine(strategy);
        engine.on_messages(&ids(0..6));
        scroll_to_distance(&mut engine, 300.0);
        let jumps = engine.container().unwrap().bottom_jumps();

        // Shrink, then a head swap of equal length, then both ends at once.
        engine.on_messages(&ids(0..4));
        engine.on_messages(&ids(1..5));
        let mut both = vec!["new-head".to_owned()];
        both.extend(ids(1..5));
        both.push("new-tail".to_owned());
        engine.on_messages(&both);

        assert_eq!(engine.container().unwrap().bottom_jumps(), jumps);
        match strategy {
            ScrollStrategy::Legacy => assert_eq!(engine.unread(), 0),
            // The sliding window and the dual change each add one tail entry.
            ScrollStrategy::Rewritten => assert_eq!(engine.unread(), 2),
        }
    }
}

#[test]
fn unmounted_engine_reports_bottom_and_stays_quiet() {
    let (mut engine, recorder) = engine(ScrollStrategy::Rewritten);
    engine.on_messages(&ids(0..3));
    scroll_to_distance(&mut engine, 300.0);
    engine.request_older();
    let detached = engine.unmount().unwrap();

    assert!(engine.state().is_at_bottom);
    assert_eq!(engine.state().distance_from_bottom, 0.0);
    engine.on_scroll();
    engine.on_frame(std::time::Instant::now());
    engine.on_messages(&ids(0..5));
    assert!(recorder.is_empty());
    assert_eq!(detached.bottom_jumps(), 1);
}
