//! Token classes for Quorum source
//!
//! A scan step reports a [`ScanResult`]: the [`Style`] of the consumed text (if it has one),
//! the [`KeywordKind`] for keywords that open or close blocks, and the punctuation character
//! for structural punctuation. Reserved words are recognised by the [`Word`] logos lexer.
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Classification of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Keyword,
    Operator,
    Atom,
    Type,
    Builtin,
    String,
    Comment,
    Number,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Keyword => "keyword",
            Style::Operator => "operator",
            Style::Atom => "atom",
            Style::Type => "type",
            Style::Builtin => "builtin",
            Style::String => "string",
            Style::Comment => "comment",
            Style::Number => "number",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect a keyword has on the block-context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    /// Opens a block whose body sits one level deeper (`if`, `action`, ...).
    Indent,
    /// Closes the innermost block (`end`).
    Dedent,
    /// Closes the innermost block and opens a sibling at the same depth (`else`, `elseif`, ...).
    Redent,
    /// Reserved word with no structural effect.
    Plain,
}

impl KeywordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordKind::Indent => "indent",
            KeywordKind::Dedent => "dedent",
            KeywordKind::Redent => "redent",
            KeywordKind::Plain => "plain",
        }
    }
}

impl fmt::Display for KeywordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one scan step.
///
/// `style` is `None` for text with no highlighting (identifiers, punctuation, whitespace).
/// `keyword` is set only alongside [`Style::Keyword`]; `punctuation` only for `. , : ( )`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanResult {
    pub style: Option<Style>,
    pub keyword: Option<KeywordKind>,
    pub punctuation: Option<char>,
}

impl ScanResult {
    /// Unstyled text.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn styled(style: Style) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn keyword(kind: KeywordKind) -> Self {
        Self {
            style: Some(Style::Keyword),
            keyword: Some(kind),
            punctuation: None,
        }
    }

    pub fn punctuation(ch: char) -> Self {
        Self {
            punctuation: Some(ch),
            ..Self::default()
        }
    }
}

/// Word-level lexer for reserved words.
///
/// Logos picks the longest match, so a reserved word only wins when it is not the prefix of
/// a longer identifier: `end` is [`Word::Dedent`], `ending` is [`Word::Identifier`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    #[token("and")]
    #[token("or")]
    #[token("mod")]
    Operator,

    #[token("true")]
    #[token("false")]
    Atom,

    #[token("boolean")]
    #[token("integer")]
    #[token("number")]
    #[token("text")]
    Type,

    #[token("alert")]
    #[token("cast")]
    #[token("input")]
    #[token("output")]
    #[token("say")]
    #[token("Skynet_Token")]
    Builtin,

    #[token("is")]
    #[token("me")]
    #[token("package")]
    #[token("parent")]
    #[token("public")]
    #[token("private")]
    #[token("return")]
    #[token("returns")]
    #[token("times")]
    #[token("until")]
    #[token("use")]
    Keyword,

    #[token("action")]
    #[token("check")]
    #[token("class")]
    #[token("if")]
    #[token("repeat")]
    Indent,

    #[token("always")]
    #[token("detect")]
    #[token("else")]
    #[token("elseif")]
    Redent,

    #[token("end")]
    Dedent,

    // Anything else made of word characters
    #[regex(r"[A-Za-z0-9_]+")]
    Identifier,
}

impl Word {
    /// Classify the reserved word at the start of `text`.
    ///
    /// Returns the word class and its byte length, or `None` when `text` does not start with a
    /// complete reserved word.
    pub fn classify(text: &str) -> Option<(Word, usize)> {
        let mut lexer = Word::lexer(text);
        match lexer.next() {
            Some(Ok(Word::Identifier)) | Some(Err(_)) | None => None,
            Some(Ok(word)) => Some((word, lexer.span().end)),
        }
    }

    pub fn scan_result(self) -> ScanResult {
        match self {
            Word::Operator => ScanResult::styled(Style::Operator),
            Word::Atom => ScanResult::styled(Style::Atom),
            Word::Type => ScanResult::styled(Style::Type),
            Word::Builtin => ScanResult::styled(Style::Builtin),
            Word::Keyword => ScanResult::keyword(KeywordKind::Plain),
            Word::Indent => ScanResult::keyword(KeywordKind::Indent),
            Word::Redent => ScanResult::keyword(KeywordKind::Redent),
            Word::Dedent => ScanResult::keyword(KeywordKind::Dedent),
            Word::Identifier => ScanResult::none(),
        }
    }
}
