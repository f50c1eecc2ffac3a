//! Parsing of page-order expressions into a typed tree
//!
//! Tokenizing and parsing are separate from evaluation: the tree knows
//! nothing about pools, grids or files.

mod ast;
mod parser;
mod token;

pub use ast::*;
pub use parser::parse_expression;
pub use token::{Token, tokenize};

pub(crate) use parser::parse_expression_with;
