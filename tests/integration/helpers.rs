use chat_scroll::diagnostics::Recorder;
use chat_scroll::scroll::{
    AutoScroll, ScrollContainer, ScrollOptions, ScrollStrategy, StaticContainer,
};
use std::time::Instant;

pub type Engine = AutoScroll<StaticContainer>;

/// `m-{i}` ids for each index in `range`, oldest first.
pub fn ids(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("m-{i}")).collect()
}

/// An engine over a 1000-row transcript in a 400-row viewport, with the
/// top-of-list trigger disabled so history requests stay explicit.
pub fn engine(strategy: ScrollStrategy) -> (Engine, Recorder) {
    engine_with(strategy, StaticContainer::new(600.0, 1000.0, 400.0))
}

pub fn engine_with(strategy: ScrollStrategy, container: StaticContainer) -> (Engine, Recorder) {
    let recorder = Recorder::new();
    let options = ScrollOptions { top_margin: None, ..ScrollOptions::for_strategy(strategy) };
    let mut engine = AutoScroll::new(options).with_sink(recorder.clone());
    engine.mount(container);
    (engine, recorder)
}

pub fn container(engine: &mut Engine) -> &mut StaticContainer {
    engine.container_mut().unwrap()
}

/// Move the viewport as the user would and let one frame pass.
pub fn user_scroll(engine: &mut Engine, scroll_top: f64) {
    container(engine).user_scroll_to(scroll_top);
    engine.on_scroll();
    engine.on_frame(Instant::now());
}

/// Scroll so the viewport bottom sits `distance` rows above the end.
pub fn scroll_to_distance(engine: &mut Engine, distance: f64) {
    let max = engine.container().unwrap().metrics().max_scroll_top();
    user_scroll(engine, max - distance);
}
