//! Indent query tests
//!
//! These tests drive the mode line by line the way an editor does and check the
//! indentation it suggests for the next line.

use quorum::quorum::config::QuorumConfig;
use quorum::quorum::highlight::Highlighter;
use quorum::quorum::mode::{LineState, QuorumMode};
use rstest::rstest;

/// State after lexing every line of `source`
fn state_after(mode: &QuorumMode, source: &str) -> LineState {
    let mut highlighter = Highlighter::new(mode);
    for (idx, line) in source.lines().enumerate() {
        highlighter.highlight_line(idx + 1, line);
    }
    highlighter.into_state()
}

#[rstest]
#[case("", "say x", 0)]
#[case("if a", "say x", 4)]
#[case("if a", "end", 0)]
#[case("if a", "else", 0)]
#[case("if a", "elseif b", 0)]
#[case("if a\n    if b", "end", 4)]
#[case("if a\n    if b", "say x", 8)]
#[case("if a\n    say x\nelse", "say y", 4)]
#[case("if a\n    say x\nelse", "end", 0)]
#[case("if a\nend", "say x", 0)]
#[case("end\nend", "end", 0)]
#[case("action Main\n    repeat 3 times", "output 1", 8)]
#[case("if a // comment", "say x", 4)]
#[case("// if a", "say x", 0)]
#[case("say \"if\"", "say x", 0)]
fn test_suggested_indent(#[case] before: &str, #[case] next: &str, #[case] expected: usize) {
    let mode = QuorumMode::default();
    let state = state_after(&mode, before);
    assert_eq!(mode.indent(&state, next), expected);
}

#[test]
fn test_indent_unit_is_configurable() {
    let mode = QuorumMode::new(QuorumConfig::with_indent_unit(2));
    let state = state_after(&mode, "class A\n  action B");
    assert_eq!(mode.indent(&state, "say x"), 4);
    assert_eq!(mode.indent(&state, "end"), 2);
}

#[test]
fn test_tab_size_affects_measured_indentation() {
    let mode = QuorumMode::new(QuorumConfig {
        indent_unit: 4,
        tab_size: 8,
    });
    let state = state_after(&mode, "\tif a");
    assert_eq!(state.indented, 8);
    assert_eq!(mode.indent(&state, "end"), 8);
}

#[test]
fn test_end_aligns_with_nearest_open_block() {
    let mode = QuorumMode::default();
    let mut highlighter = Highlighter::new(&mode);
    let lines = [
        "class A",
        "    action B",
        "        if c",
        "            repeat 2 times",
    ];
    let mut openers = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        highlighter.highlight_line(idx + 1, line);
        openers.push(idx * 4);
    }

    // close everything, checking each `end` against its opener
    while let Some(column) = openers.pop() {
        assert_eq!(mode.indent(highlighter.state(), "end"), column);
        let end = format!("{}end", " ".repeat(column));
        highlighter.highlight_line(lines.len() + 1, &end);
    }
    assert!(highlighter.state().context.is_root());
}

#[rstest]
#[case("end", true)]
#[case("else", true)]
#[case("  elseif", true)]
#[case("end x", false)]
#[case("endless", false)]
#[case("detect", false)]
fn test_electric_lines(#[case] line: &str, #[case] electric: bool) {
    assert_eq!(QuorumMode::is_electric(line), electric);
}
