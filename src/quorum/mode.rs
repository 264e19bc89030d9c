//! Host-facing mode
//!
//! [`QuorumMode`] is what an editor talks to. The host creates a [`LineState`] once per document
//! with [`QuorumMode::start_state`], then for every line:
//!
//! 1. wraps the line in a [`LineStream`]
//! 2. calls [`QuorumMode::token`] until the stream reaches the end of the line
//! 3. keeps the state (or a clone of it) as the starting point for the next line
//!
//! To indent a line that has not been lexed yet, the host passes the state left by the previous
//! line to [`QuorumMode::indent`]. The electric pattern tells the host which freshly typed lines
//! should be re-indented immediately (a lone `else`, `elseif` or `end`).

use crate::quorum::config::QuorumConfig;
use crate::quorum::context::ContextStack;
use crate::quorum::lexing::scanner::{scan, ScanMode};
use crate::quorum::lexing::stream::LineStream;
use crate::quorum::lexing::tokens::{ScanResult, Style};
use once_cell::sync::Lazy;
use regex::Regex;

pub const LINE_COMMENT: &str = "//";
pub const BLOCK_COMMENT_START: &str = "/*";
pub const BLOCK_COMMENT_END: &str = "*/";

static ELECTRIC_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:else|elseif|end)$").unwrap());

/// Everything carried from one line to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineState {
    /// Pending multi-line construct, if any.
    pub mode: ScanMode,
    /// Open blocks.
    pub context: ContextStack,
    /// Indentation of the line being lexed.
    pub indented: usize,
}

/// The Quorum language mode.
#[derive(Debug, Clone, Default)]
pub struct QuorumMode {
    config: QuorumConfig,
}

impl QuorumMode {
    pub fn new(config: QuorumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuorumConfig {
        &self.config
    }

    /// Fresh state for the start of a document: root context only, base mode.
    pub fn start_state(&self) -> LineState {
        LineState {
            mode: ScanMode::Base,
            context: ContextStack::new(self.config.indent_unit),
            indented: 0,
        }
    }

    /// Lex one token and return its style.
    pub fn token<S: LineStream>(&self, stream: &mut S, state: &mut LineState) -> Option<Style> {
        self.scan_token(stream, state).style
    }

    /// Lex one token, returning the full scan result.
    ///
    /// Whitespace is consumed as its own unstyled token. Keywords update the block context.
    pub fn scan_token<S: LineStream>(&self, stream: &mut S, state: &mut LineState) -> ScanResult {
        stream.begin_token();
        if stream.sol() {
            state.indented = stream.indentation();
        }
        if stream.eat_space() {
            return ScanResult::none();
        }

        let result = scan(stream, &mut state.mode);
        if let (Some(Style::Keyword), Some(kind)) = (result.style, result.keyword) {
            state.context.update(kind, state.indented);
        }
        result
    }

    /// Suggested indentation for a line whose content (without leading whitespace) is
    /// `text_after`, given the state left by the previous line.
    pub fn indent(&self, state: &LineState, text_after: &str) -> usize {
        state.context.suggest_indent(text_after, self.config.indent_unit)
    }

    /// Pattern matching lines that should be re-indented as soon as they are typed.
    pub fn electric_input() -> &'static Regex {
        &ELECTRIC_INPUT
    }

    pub fn is_electric(line: &str) -> bool {
        ELECTRIC_INPUT.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quorum::lexing::stream::StringStream;
    use crate::quorum::lexing::tokens::KeywordKind;

    fn lex_line(mode: &QuorumMode, line: &str, state: &mut LineState) -> Vec<ScanResult> {
        let mut stream = StringStream::new(line, mode.config().tab_size);
        let mut results = Vec::new();
        while !stream.eol() {
            let result = mode.scan_token(&mut stream, state);
            if !stream.current().trim().is_empty() {
                results.push(result);
            }
        }
        results
    }

    #[test]
    fn test_if_say_end() {
        let mode = QuorumMode::default();
        let mut state = mode.start_state();

        let line1 = lex_line(&mode, "if x then", &mut state);
        assert_eq!(line1[0], ScanResult::keyword(KeywordKind::Indent));
        assert!(line1[1..].iter().all(|result| result.style.is_none()));
        assert_eq!(state.context.height(), 2);
        assert_eq!(mode.indent(&state, "say \"hi\""), 4);

        let line2 = lex_line(&mode, "    say \"hi\"", &mut state);
        assert_eq!(line2.len(), 2);
        assert_eq!(line2[0].style, Some(Style::Builtin));
        assert_eq!(line2[1].style, Some(Style::String));
        assert_eq!(state.indented, 4);
        assert_eq!(mode.indent(&state, "end"), 0);

        let line3 = lex_line(&mode, "end", &mut state);
        assert_eq!(line3, vec![ScanResult::keyword(KeywordKind::Dedent)]);
        assert!(state.context.is_root());
        assert_eq!(state.mode, ScanMode::Base);
    }

    #[test]
    fn test_start_state() {
        let mode = QuorumMode::new(QuorumConfig::with_indent_unit(2));
        let state = mode.start_state();
        assert_eq!(state.mode, ScanMode::Base);
        assert_eq!(state.indented, 0);
        assert_eq!(state.context.height(), 1);
        assert_eq!(mode.indent(&state, "anything"), 0);
    }

    #[test]
    fn test_block_comment_carries_over_lines() {
        let mode = QuorumMode::default();
        let mut state = mode.start_state();
        lex_line(&mode, "/* if", &mut state);
        assert_eq!(state.mode, ScanMode::InBlockComment);
        // keywords inside the comment do not open blocks
        assert!(state.context.is_root());

        let results = lex_line(&mode, "end */ if ready", &mut state);
        assert_eq!(results[0].style, Some(Style::Comment));
        assert_eq!(results[1], ScanResult::keyword(KeywordKind::Indent));
        assert_eq!(state.context.height(), 2);
    }

    #[test]
    fn test_indentation_measured_at_line_start() {
        let mode = QuorumMode::default();
        let mut state = mode.start_state();
        lex_line(&mode, "\tif a", &mut state);
        assert_eq!(state.indented, 4);
        assert_eq!(state.context.top().indented, 4);
        assert_eq!(mode.indent(&state, "b"), 8);
        assert_eq!(mode.indent(&state, "end"), 4);
    }

    #[test]
    fn test_comment_markers() {
        assert_eq!(LINE_COMMENT, "//");
        assert_eq!(BLOCK_COMMENT_START, "/*");
        assert_eq!(BLOCK_COMMENT_END, "*/");
    }

    #[test]
    fn test_electric_input() {
        assert!(QuorumMode::is_electric("end"));
        assert!(QuorumMode::is_electric("    else"));
        assert!(QuorumMode::is_electric("\telseif"));
        assert!(!QuorumMode::is_electric("ending"));
        assert!(!QuorumMode::is_electric("end if"));
        assert!(!QuorumMode::is_electric("elsewhere"));
        assert!(QuorumMode::electric_input().is_match("  end"));
    }
}
