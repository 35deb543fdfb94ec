//! Wargear option grammar
//!
//! A closed set of sentence patterns covering the rulebook text actually
//! encountered, parsed into a tagged `Operation`. Anything outside the
//! grammar becomes `Operation::Unrecognized` and renders as plain text
//! with no mechanical effect.

pub mod operation;
pub mod parser;

pub use operation::Operation;
pub use parser::parse_option;
