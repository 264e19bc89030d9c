//! Line cursor used by the scanner
//!
//! The scanner never sees a whole document. It reads from a cursor positioned somewhere
//! inside one line, and the host decides where lines come from. [`LineStream`] is that
//! contract: a handful of required primitives (the line, the cursor position, the start
//! of the current token) plus provided helpers built on them.
//!
//! Positions are byte offsets into the line and always sit on char boundaries.
//! [`StringStream`] is the in-memory implementation used by the document passes and tests.

use regex::Regex;

/// Cursor over a single line of source text.
pub trait LineStream {
    /// The full text of the current line, without its line terminator.
    fn line(&self) -> &str;

    /// Byte offset of the cursor.
    fn pos(&self) -> usize;

    /// Move the cursor. Used to rewind after a failed lookahead.
    fn set_pos(&mut self, pos: usize);

    /// Byte offset where the current token started.
    fn start(&self) -> usize;

    fn set_start(&mut self, start: usize);

    /// Columns a tab advances to when measuring indentation.
    fn tab_size(&self) -> usize;

    /// Mark the cursor position as the start of a new token.
    fn begin_token(&mut self) {
        let pos = self.pos();
        self.set_start(pos);
    }

    /// At the start of the line.
    fn sol(&self) -> bool {
        self.pos() == 0
    }

    /// At the end of the line.
    fn eol(&self) -> bool {
        self.pos() >= self.line().len()
    }

    /// Unconsumed remainder of the line.
    fn rest(&self) -> &str {
        &self.line()[self.pos()..]
    }

    /// Text of the current token so far.
    fn current(&self) -> &str {
        &self.line()[self.start()..self.pos()]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let pos = self.pos() + ch.len_utf8();
        self.set_pos(pos);
        Some(ch)
    }

    /// Consume the next character if it satisfies `accept`.
    fn eat(&mut self, accept: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(ch) if accept(ch) => self.next(),
            _ => None,
        }
    }

    fn eat_char(&mut self, expected: char) -> bool {
        self.eat(|ch| ch == expected).is_some()
    }

    /// Consume characters while `accept` holds. Returns whether anything was consumed.
    fn eat_while(&mut self, accept: impl Fn(char) -> bool) -> bool {
        let start = self.pos();
        while self.eat(&accept).is_some() {}
        self.pos() > start
    }

    fn eat_space(&mut self) -> bool {
        self.eat_while(char::is_whitespace)
    }

    fn skip_to_end(&mut self) {
        let end = self.line().len();
        self.set_pos(end);
    }

    /// Advance the cursor by `len` bytes, clamped to the end of the line.
    fn advance(&mut self, len: usize) {
        let pos = (self.pos() + len).min(self.line().len());
        self.set_pos(pos);
    }

    /// Move the cursor back by `count` characters, never past the start of the line.
    fn back_up(&mut self, count: usize) {
        let mut pos = self.pos();
        for _ in 0..count {
            match self.line()[..pos].chars().next_back() {
                Some(ch) => pos -= ch.len_utf8(),
                None => break,
            }
        }
        self.set_pos(pos);
    }

    /// Consume `literal` if the remainder of the line starts with it.
    fn match_str(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.advance(literal.len());
            true
        } else {
            false
        }
    }

    /// Consume a match of `pattern` if one begins exactly at the cursor.
    fn match_pattern(&mut self, pattern: &Regex) -> bool {
        let len = match pattern.find(self.rest()) {
            Some(found) if found.start() == 0 && found.end() > 0 => found.end(),
            _ => return false,
        };
        self.advance(len);
        true
    }

    /// The character just before the current token, `None` at the start of the line.
    fn char_before_start(&self) -> Option<char> {
        self.line()[..self.start()].chars().next_back()
    }

    /// Visual width of the line's leading whitespace, expanding tabs to tab stops.
    fn indentation(&self) -> usize {
        count_columns(self.line(), self.tab_size())
    }
}

/// Width of the leading whitespace of `line`.
pub fn count_columns(line: &str, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => column += tab_size - column % tab_size,
            ch if ch.is_whitespace() => column += 1,
            _ => break,
        }
    }
    column
}

/// [`LineStream`] over a borrowed string slice.
#[derive(Debug, Clone)]
pub struct StringStream<'a> {
    line: &'a str,
    pos: usize,
    start: usize,
    tab_size: usize,
}

impl<'a> StringStream<'a> {
    pub fn new(line: &'a str, tab_size: usize) -> Self {
        Self {
            line,
            pos: 0,
            start: 0,
            tab_size,
        }
    }
}

impl LineStream for StringStream<'_> {
    fn line(&self) -> &str {
        self.line
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.line.len());
    }

    fn start(&self) -> usize {
        self.start
    }

    fn set_start(&mut self, start: usize) {
        self.start = start.min(self.line.len());
    }

    fn tab_size(&self) -> usize {
        self.tab_size
    }
}
