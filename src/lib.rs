//! # quorum
//!
//! Incremental lexer and indentation engine for the Quorum language.
//!
//! The crate is meant to sit behind an editor: the host feeds one line at a time,
//! asks for one token at a time, and keeps the returned [`LineState`](quorum::mode::LineState)
//! around so that lexing can resume at any line without re-scanning the document.
//!
//! See the [quorum module](quorum) for the layout of the crate.

pub mod quorum;
