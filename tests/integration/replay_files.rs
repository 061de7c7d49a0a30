// =====
// TESTS: 6
// =====
//
// Script and config files on disk: loading, replaying, JSON-lines output,
// and the error each bad file maps to.

use chat_scroll::config::ScrollConfig;
use chat_scroll::error::AppError;
use chat_scroll::replay;
use chat_scroll::scroll::ScrollStrategy;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Write as _;
use tempfile::NamedTempFile;

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn replay_lines(script: &str, strategy: ScrollStrategy) -> Vec<Value> {
    let file = file_with(script);
    let steps = replay::load_script(file.path()).unwrap();
    let config = ScrollConfig { strategy, ..ScrollConfig::default() };
    let records = replay::run(&steps, config.scroll_options());
    let mut out = Vec::new();
    replay::write_records(&records, &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

const SCROLLED_UP_APPEND: &str = r#"[
    {"op": "mount", "scroll_top": 600, "scroll_height": 1000, "client_height": 400},
    {"op": "messages", "ids": ["a", "b", "c"]},
    {"op": "scroll", "scroll_top": 300},
    {"op": "frame"},
    {"op": "messages", "ids": ["a", "b", "c", "d"]},
    {"op": "scroll_to_bottom", "behavior": "instant"}
]"#;

#[test]
fn replay_emits_meta_only_on_change() {
    let lines = replay_lines(SCROLLED_UP_APPEND, ScrollStrategy::Legacy);
    let metas: Vec<(u64, bool, u64)> = lines
        .iter()
        .filter(|l| l["kind"] == "meta")
        .map(|l| {
            let step = l["step"].as_u64().unwrap();
            (step, l["visible"].as_bool().unwrap(), l["new_count"].as_u64().unwrap())
        })
        .collect();
    // Mount, scrolled away (after the frame), one unread, back at the bottom.
    assert_eq!(metas, vec![(0, false, 0), (3, true, 0), (4, true, 1), (5, false, 0)]);
}

#[test]
fn replay_reports_classifications() {
    let lines = replay_lines(SCROLLED_UP_APPEND, ScrollStrategy::Rewritten);
    let deltas: Vec<Value> =
        lines.iter().filter(|l| l["kind"] == "messages").map(|l| l["delta"].clone()).collect();
    assert_eq!(deltas[0], serde_json::json!({"type": "initial"}));
    assert_eq!(deltas[1], serde_json::json!({"type": "append", "appended": 1}));
}

#[test]
fn replay_writes_skip_diagnostic() {
    let script = r#"[
        {"op": "mount", "scroll_top": 100, "scroll_height": 1000, "client_height": 400},
        {"op": "messages", "ids": ["m-5", "m-6"]},
        {"op": "layout", "scroll_top": 100, "offsets": {"m-5": 0}, "first_visible": "m-5"},
        {"op": "request_older"},
        {"op": "layout", "scroll_height": 990, "hidden": ["m-5"]},
        {"op": "messages", "ids": ["m-1", "m-2", "m-5", "m-6"]},
        {"op": "frame"}
    ]"#;
    let lines = replay_lines(script, ScrollStrategy::Rewritten);
    let diagnostics: Vec<&Value> = lines.iter().filter(|l| l["kind"] == "diagnostic").collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["step"], 6);
    assert_eq!(diagnostics[0]["label"], "restoration-skip");
    assert_eq!(diagnostics[0]["reason"], "nonpositive-delta-no-anchor");
    assert_eq!(diagnostics[0]["height_delta"], -10.0);
}

#[test]
fn bad_scripts_map_to_script_errors() {
    let missing = std::env::temp_dir().join("chat-scroll-no-such-script.json");
    let err = replay::load_script(&missing).unwrap_err();
    assert_eq!(err.exit_code(), AppError::SCRIPT_READ_EXIT_CODE);

    let file = file_with(r#"[{"op": "teleport"}]"#);
    let err = replay::load_script(file.path()).unwrap_err();
    assert!(matches!(err, AppError::ScriptParse { .. }));
    assert_eq!(err.exit_code(), AppError::SCRIPT_PARSE_EXIT_CODE);
}

#[test]
fn config_file_selects_strategy_and_overrides() {
    let file = file_with(r#"{"strategy": "legacy", "anchor_retry_frames": 3, "page_size": 5}"#);
    let config = ScrollConfig::load(Some(file.path())).unwrap();
    let options = config.scroll_options();
    assert_eq!(options.strategy, ScrollStrategy::Legacy);
    assert_eq!(options.threshold, 60.0);
    assert_eq!(options.retry_frames, 3);
    assert_eq!(config.page_size, 5);

    let config = config.with_strategy(Some(ScrollStrategy::Rewritten));
    assert_eq!(config.scroll_options().threshold, 10.0);
}

#[test]
fn bad_config_files_map_to_config_errors() {
    let missing = std::env::temp_dir().join("chat-scroll-no-such-config.json");
    let err = ScrollConfig::load(Some(&missing)).unwrap_err();
    assert_eq!(err.exit_code(), AppError::CONFIG_READ_EXIT_CODE);

    let file = file_with(r#"{"strategy": "sideways"}"#);
    let err = ScrollConfig::load(Some(file.path())).unwrap_err();
    assert_eq!(err.exit_code(), AppError::CONFIG_PARSE_EXIT_CODE);

    let file = file_with(r#"{"page_size": 0}"#);
    assert!(ScrollConfig::load(Some(file.path())).is_err());
}
