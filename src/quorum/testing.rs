//! Testing helpers
//!
//! Small drivers shared by the unit tests and the integration tests under `tests/`.
//! They run the scanner or the full mode over literal source without any host present.

use crate::quorum::highlight::{render_listing, Highlighter};
use crate::quorum::lexing::scanner::{scan, ScanMode};
use crate::quorum::lexing::stream::{LineStream, StringStream};
use crate::quorum::lexing::tokens::Style;
use crate::quorum::mode::QuorumMode;

/// Scan a whole line starting in `mode`, skipping whitespace the way a host does.
///
/// Returns every non-whitespace token with its text, and the mode left at the end of the line.
pub fn scan_all(line: &str, mode: ScanMode) -> (Vec<(Option<Style>, String)>, ScanMode) {
    let mut stream = StringStream::new(line, 4);
    let mut mode = mode;
    let mut tokens = Vec::new();

    while !stream.eol() {
        stream.begin_token();
        if stream.eat_space() {
            continue;
        }
        let result = scan(&mut stream, &mut mode);
        tokens.push((result.style, stream.current().to_string()));
    }

    (tokens, mode)
}

/// Highlight `source` with the default mode and render it as a token listing.
pub fn listing(source: &str) -> String {
    let mode = QuorumMode::default();
    let mut highlighter = Highlighter::new(&mode);
    let lines: Vec<_> = source
        .lines()
        .enumerate()
        .map(|(idx, line)| highlighter.highlight_line(idx + 1, line))
        .collect();
    render_listing(&lines)
}
