//! C-- source code parser
//!
//! This module transforms C-- source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization on demand, with checkpoints for backtracking
//! - [`parse`]: The [`Parser`](parse::Parser) and its helpers; grammar rules live in
//!   `declarations`, `statements` and `expressions`
//! - [`precedence`]: Binary operator precedence, extended by `infix` declarations
//! - [`ast`]: AST node definitions
//! - [`dump`]: Tree rendering for `--dump-ast`
//!
//! # Language
//!
//! - Types: `bool`, `int`, `double`, `string`, and `void` for function results
//! - Statements: declarations, `if`, `while`, `for`, `return`, `break`, `continue`, blocks
//! - Expressions: arithmetic, comparison, logical, bitwise, assignment, calls
//! - User-defined binary operators: `infix 5 a <> b = a - b;`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
pub mod dump;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod precedence;
mod statements;

pub use parse::{ParseError, Parser};
