//! Whole-document passes
//!
//! The mode itself works one token at a time. This module drives it over complete sources:
//! [`Highlighter`] lexes line after line while carrying the [`LineState`], [`highlight`] collects
//! the spans of every line, and [`reindent`] rewrites each line's leading whitespace from the
//! indent query.
//!
//! A [`Highlighter`] can also be resumed from a saved state, which is how an editor re-lexes only
//! the lines below an edit.

use crate::quorum::lexing::scanner::ScanMode;
use crate::quorum::lexing::stream::{count_columns, LineStream, StringStream};
use crate::quorum::lexing::tokens::{KeywordKind, Style};
use crate::quorum::mode::{LineState, QuorumMode};
use serde::Serialize;

/// A run of text on one line with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offsets into the line.
    pub start: usize,
    pub end: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<KeywordKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punctuation: Option<char>,
}

impl Span {
    /// Unstyled runs that touch are merged so identifiers come out whole.
    fn absorbs(&self, next: &Span) -> bool {
        self.end == next.start
            && self.style.is_none()
            && next.style.is_none()
            && self.punctuation.is_none()
            && next.punctuation.is_none()
    }
}

/// Result of lexing one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedLine {
    /// 1-based line number.
    pub number: usize,
    pub indentation: usize,
    /// Open contexts after the line, the root included.
    pub depth: usize,
    /// Scan mode after the line.
    pub mode: ScanMode,
    pub spans: Vec<Span>,
}

/// Drives a [`QuorumMode`] over consecutive lines.
#[derive(Debug, Clone)]
pub struct Highlighter<'m> {
    mode: &'m QuorumMode,
    state: LineState,
}

impl<'m> Highlighter<'m> {
    pub fn new(mode: &'m QuorumMode) -> Self {
        Self {
            mode,
            state: mode.start_state(),
        }
    }

    /// Continue from a state saved after an earlier line.
    pub fn resume(mode: &'m QuorumMode, state: LineState) -> Self {
        Self { mode, state }
    }

    /// State left by the last line lexed.
    pub fn state(&self) -> &LineState {
        &self.state
    }

    pub fn into_state(self) -> LineState {
        self.state
    }

    pub fn highlight_line(&mut self, number: usize, line: &str) -> HighlightedLine {
        let mut stream = StringStream::new(line, self.mode.config().tab_size);
        let mut spans: Vec<Span> = Vec::new();

        while !stream.eol() {
            let result = self.mode.scan_token(&mut stream, &mut self.state);
            let text = stream.current();
            if text.trim().is_empty() {
                continue;
            }
            let span = Span {
                start: stream.start(),
                end: stream.pos(),
                text: text.to_string(),
                style: result.style,
                keyword: result.keyword,
                punctuation: result.punctuation,
            };
            match spans.last_mut() {
                Some(prev) if prev.absorbs(&span) => {
                    prev.end = span.end;
                    prev.text.push_str(&span.text);
                }
                _ => spans.push(span),
            }
        }

        HighlightedLine {
            number,
            indentation: count_columns(line, self.mode.config().tab_size),
            depth: self.state.context.height(),
            mode: self.state.mode,
            spans,
        }
    }
}

/// Lex every line of `source`.
pub fn highlight(mode: &QuorumMode, source: &str) -> Vec<HighlightedLine> {
    let mut highlighter = Highlighter::new(mode);
    let lines: Vec<HighlightedLine> = source
        .lines()
        .enumerate()
        .map(|(idx, line)| highlighter.highlight_line(idx + 1, line))
        .collect();
    log::debug!(
        "highlighted {} lines, {} contexts left open",
        lines.len(),
        highlighter.state().context.height() - 1
    );
    lines
}

/// Rewrite the leading whitespace of every line from the indent query.
///
/// Blank lines become empty. Lines that start inside a block comment or a continued string are
/// left exactly as they are.
pub fn reindent(mode: &QuorumMode, source: &str) -> String {
    let mut highlighter = Highlighter::new(mode);
    let mut lines = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let content = line.trim_start();
        let reindented = if highlighter.state().mode != ScanMode::Base {
            line.to_string()
        } else if content.is_empty() {
            String::new()
        } else {
            let width = mode.indent(highlighter.state(), content);
            format!("{}{}", " ".repeat(width), content)
        };
        highlighter.highlight_line(idx + 1, &reindented);
        lines.push(reindented);
    }

    log::debug!("reindented {} lines", lines.len());
    let mut output = lines.join("\n");
    if source.ends_with('\n') {
        output.push('\n');
    }
    output
}

/// Plain-text listing: one line per source line, `number [depth]` then the spans.
///
/// Styled spans are written `text:style`, keywords `text:keyword/kind`.
pub fn render_listing(lines: &[HighlightedLine]) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&format!("{} [{}]", line.number, line.depth));
        for span in &line.spans {
            output.push(' ');
            output.push_str(&render_span(span));
        }
        output.push('\n');
    }
    output
}

fn render_span(span: &Span) -> String {
    match (span.style, span.keyword) {
        (Some(Style::Keyword), Some(kind)) => format!("{}:keyword/{}", span.text, kind),
        (Some(style), _) => format!("{}:{}", span.text, style),
        (None, _) => span.text.clone(),
    }
}
