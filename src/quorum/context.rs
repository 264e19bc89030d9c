//! Block-context tracking
//!
//! Quorum delimits blocks with keywords rather than braces: `if`, `action`, `class`, `check`
//! and `repeat` open a block, `end` closes one, and `else`, `elseif`, `detect` and `always`
//! close the current block while opening a sibling at the same depth.
//!
//! The [`ContextStack`] records one [`BlockContext`] per open block, remembering the indentation
//! of the line that opened it. That is all the indent query needs: a body line sits one unit
//! deeper than its opener, a closing line lines up with it.
//!
//! The root context is stored apart from the open blocks so it can never be popped. Its depth is
//! one unit below column zero, which puts top-level code at column zero.

use crate::quorum::lexing::is_word_char;
use crate::quorum::lexing::tokens::KeywordKind;

/// Words that, leading a line, align it with the opener of the innermost block.
pub const CLOSING_KEYWORDS: &[&str] = &["else", "elseif", "end"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// The document root.
    Top,
    /// A block opened by a keyword.
    Keyword,
}

/// One open region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockContext {
    /// Indentation of the line that opened the region.
    pub indented: isize,
    pub kind: ContextKind,
}

impl BlockContext {
    fn root(indent_unit: usize) -> Self {
        Self {
            indented: -(indent_unit as isize),
            kind: ContextKind::Top,
        }
    }

    fn keyword(indented: usize) -> Self {
        Self {
            indented: indented as isize,
            kind: ContextKind::Keyword,
        }
    }
}

/// Stack of open block contexts, innermost last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextStack {
    root: BlockContext,
    open: Vec<BlockContext>,
}

impl ContextStack {
    pub fn new(indent_unit: usize) -> Self {
        Self {
            root: BlockContext::root(indent_unit),
            open: Vec::new(),
        }
    }

    /// The innermost context, the root when no block is open.
    pub fn top(&self) -> &BlockContext {
        self.open.last().unwrap_or(&self.root)
    }

    /// The context enclosing the innermost one, `None` at the root.
    pub fn enclosing(&self) -> Option<&BlockContext> {
        match self.open.len() {
            0 => None,
            1 => Some(&self.root),
            len => self.open.get(len - 2),
        }
    }

    /// Number of contexts including the root. Always at least one.
    pub fn height(&self) -> usize {
        self.open.len() + 1
    }

    pub fn is_root(&self) -> bool {
        self.open.is_empty()
    }

    /// Contexts from the root outwards.
    pub fn iter(&self) -> impl Iterator<Item = &BlockContext> {
        std::iter::once(&self.root).chain(self.open.iter())
    }

    /// Apply a keyword seen on a line indented by `line_indent` columns.
    pub fn update(&mut self, kind: KeywordKind, line_indent: usize) {
        let mut kind = kind;

        if kind == KeywordKind::Dedent {
            if let Some(closed) = self.open.pop() {
                log::trace!("dedent: closed block opened at {}", closed.indented);
            }
        }

        // A redent closes the current block; the block below becomes the anchor of the sibling.
        if kind == KeywordKind::Redent && !self.open.is_empty() {
            if let Some(closed) = self.open.pop() {
                log::trace!("redent: replaced block opened at {}", closed.indented);
            }
            kind = KeywordKind::Indent;
        }

        if kind == KeywordKind::Indent {
            log::trace!("indent: opened block at {}", line_indent);
            self.open.push(BlockContext::keyword(line_indent));
        }
    }

    /// Suggested indentation for a line whose text (after leading whitespace) is `text_after`.
    pub fn suggest_indent(&self, text_after: &str, indent_unit: usize) -> usize {
        let top = self.top();
        let closing = top.kind == ContextKind::Keyword && starts_with_closer(text_after);
        let width = if closing {
            top.indented
        } else {
            top.indented + indent_unit as isize
        };
        width.max(0) as usize
    }
}

fn starts_with_closer(text: &str) -> bool {
    let first_word = text
        .trim_start()
        .split(|ch: char| !is_word_char(ch))
        .next()
        .unwrap_or("");
    CLOSING_KEYWORDS.contains(&first_word)
}
