//! Graft Parser
//!
//! This crate parses graph pattern text into a pattern AST:
//! - Node operands: a kind regex with an optional `[condition]`
//! - Serial chains joined by `>`
//! - Parallel branch sets joined by `|`
//! - Parenthesized grouping
//! - Error handling with the offending position

mod ast;
mod error;
mod parser;

pub use ast::*;
pub use error::*;
pub use parser::{parse_pattern, Parser};
