//! # fsmgen-parser
//!
//! Script parser for fsmgen.
//!
//! Turns FSM source text into the discrete operations the semantic model
//! consumes. Parsing is resilient: a rejected statement becomes a diagnostic
//! in the parse report and parsing continues with the next line, so one bad
//! declaration does not mask every error after it.

pub mod error;
pub mod script;

pub use error::ParseError;
pub use script::{parse_into, ParseReport};
