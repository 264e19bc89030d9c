//! Lexer
//!
//! This module holds the per-line scanning machinery for Quorum source.
//!
//! Structure:
//!     The host owns the line buffer and hands the scanner a cursor over a single line
//!     (see [`stream::LineStream`]). The scanner reads from that cursor one token at a time
//!     and reports a [`tokens::ScanResult`]. Word-like tokens (keywords, builtins, types,
//!     atoms, word operators) are classified with a logos lexer, numeric literals with a regex.
//!
//! Multi-line constructs
//!
//!     Block comments and string literals can start on one line and continue on the next.
//!     The scanner records this in a [`scanner::ScanMode`] that the caller persists between
//!     lines. The two constructs do not behave the same way at a line break:
//!     - a block comment stays open until its `*/` closer, however many lines that takes
//!     - a string closes itself at the end of the line unless the line ends in a backslash
//!       escape, in which case it continues on the next line

pub mod scanner;
pub mod stream;
pub mod tokens;

pub use scanner::{scan, ScanMode};
pub use stream::{LineStream, StringStream};
pub use tokens::{KeywordKind, ScanResult, Style, Word};

/// True for characters that can continue an identifier.
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
