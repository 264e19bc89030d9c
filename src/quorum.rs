//! Main module for quorum library functionality
//!
//! Structure:
//!     lexing      - line cursor, token classes and the scanner state machine
//!     context     - block-context stack driven by indent / redent / dedent keywords
//!     mode        - the host-facing mode: start state, token step, indent query
//!     highlight   - whole-document passes (token listings, re-indentation)
//!     config      - indentation settings layered over embedded defaults
//!     testing     - helpers shared by unit and integration tests

pub mod config;
pub mod context;
pub mod highlight;
pub mod lexing;
pub mod mode;
pub mod testing;
