//! Scanner state machine
//!
//! [`scan`] reads one token from a [`LineStream`] and reports its [`ScanResult`]. What a
//! character means depends on the current [`ScanMode`]:
//!
//! - `Base`: ordinary code. One character is read and dispatched on; word-like tokens are
//!   only matched when the token starts a word (start of line, or after a space, tab or `(`).
//! - `InBlockComment`: everything up to and including `*/`.
//! - `InString(quote)`: everything up to the closing quote, with backslash escapes.
//!
//! Every call consumes at least one character unless the line is exhausted, so repeatedly
//! calling [`scan`] until [`LineStream::eol`] always terminates.

use super::is_word_char;
use super::stream::LineStream;
use super::tokens::{ScanResult, Style, Word};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Integer, decimal (`3.14`, `3.`, `.5`) and exponent (`1e-3`) literals. The exponent
/// marker is a lowercase `e` only.
static NUMBER_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:e[-+]?[0-9]+)?").unwrap());

const PUNCTUATION: &[char] = &['.', ',', ':', '(', ')'];
const SIMPLE_OPERATORS: &[char] = &['+', '-', '*', '<', '>', '='];

/// Multi-line state of the scanner, persisted across line boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    #[default]
    Base,
    InBlockComment,
    InString(char),
}

/// Scan one token starting at the cursor.
pub fn scan<S: LineStream>(stream: &mut S, mode: &mut ScanMode) -> ScanResult {
    stream.begin_token();
    match *mode {
        ScanMode::Base => scan_base(stream, mode),
        ScanMode::InBlockComment => scan_block_comment(stream, mode),
        ScanMode::InString(quote) => scan_string(stream, mode, quote),
    }
}

fn scan_base<S: LineStream>(stream: &mut S, mode: &mut ScanMode) -> ScanResult {
    let Some(ch) = stream.next() else {
        return ScanResult::none();
    };

    if ch == '"' {
        *mode = ScanMode::InString(ch);
        return scan_string(stream, mode, ch);
    }

    if ch == '/' {
        if stream.eat_char('*') {
            *mode = ScanMode::InBlockComment;
            return scan_block_comment(stream, mode);
        }
        if stream.eat_char('/') {
            stream.skip_to_end();
            return ScanResult::styled(Style::Comment);
        }
        return ScanResult::styled(Style::Operator);
    }

    let before = stream.char_before_start();
    let after_word = before.is_some_and(is_word_char);

    if PUNCTUATION.contains(&ch) {
        // `.5` is a number, `x.5` is member access
        if ch == '.' && !after_word && stream.peek().is_some_and(|next| next.is_ascii_digit()) {
            stream.back_up(1);
            if let Some(number) = scan_number(stream) {
                return number;
            }
            stream.next();
        }
        return ScanResult::punctuation(ch);
    }

    if SIMPLE_OPERATORS.contains(&ch) {
        stream.eat_while(|next| SIMPLE_OPERATORS.contains(&next));
        return ScanResult::styled(Style::Operator);
    }

    stream.back_up(1);

    if !after_word && stream.match_str("not=") {
        return ScanResult::styled(Style::Operator);
    }

    if before.map_or(true, |prev| matches!(prev, ' ' | '\t' | '(')) {
        if let Some((word, len)) = Word::classify(stream.rest()) {
            stream.advance(len);
            return word.scan_result();
        }
    }

    if ch.is_ascii_digit() && !after_word {
        if let Some(number) = scan_number(stream) {
            return number;
        }
    }

    stream.next();
    ScanResult::none()
}

/// Match a numeric literal at the cursor. On failure the cursor is left where it was.
fn scan_number<S: LineStream>(stream: &mut S) -> Option<ScanResult> {
    let start = stream.pos();
    if stream.match_pattern(&NUMBER_LITERAL) && !stream.peek().is_some_and(is_word_char) {
        return Some(ScanResult::styled(Style::Number));
    }
    stream.set_pos(start);
    None
}

fn scan_block_comment<S: LineStream>(stream: &mut S, mode: &mut ScanMode) -> ScanResult {
    let mut maybe_end = false;
    while let Some(ch) = stream.next() {
        if maybe_end && ch == '/' {
            *mode = ScanMode::Base;
            break;
        }
        maybe_end = ch == '*';
    }
    ScanResult::styled(Style::Comment)
}

fn scan_string<S: LineStream>(stream: &mut S, mode: &mut ScanMode, quote: char) -> ScanResult {
    let mut escaped = false;
    let mut closed = false;
    while let Some(ch) = stream.next() {
        if !escaped && ch == quote {
            closed = true;
            break;
        }
        escaped = !escaped && ch == '\\';
    }
    // Strings close themselves at the end of the line unless the line ends in an escape.
    if closed || !escaped {
        *mode = ScanMode::Base;
    }
    ScanResult::styled(Style::String)
}
