//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: top-level items, function and infix operator definitions,
//!   declaration lists
//! - `statements`: Parsing statements (if, while, for, etc.)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Tokens are pulled from the lexer one at a time. The precedence table lives
//! on the parser and grows as `infix` declarations are parsed, so an operator
//! is usable from the point of its declaration onwards.

use crate::diagnostics::Diagnostics;
use crate::parser::ast::*;
use crate::parser::lexer::{Checkpoint, LexError, Lexer, Token};
use crate::parser::precedence::PrecedenceTable;
use std::collections::BTreeMap;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for C--
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) current: Token,
    /// Lexer position just before `current` was read
    pub(crate) current_start: Checkpoint,
    pub(crate) precedence: PrecedenceTable,
    /// Opening locations of the blocks currently being parsed
    pub(crate) open_blocks: Vec<SourceLocation>,
    pub(crate) functions: BTreeMap<String, FunctionDefinition>,
    pub(crate) infix_operators: BTreeMap<String, InfixDefinition>,
    pub(crate) statements: Vec<Statement>,
    pub(crate) diagnostics: Diagnostics,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let current_start = lexer.checkpoint();
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            current_start,
            precedence: PrecedenceTable::new(),
            open_blocks: Vec::new(),
            functions: BTreeMap::new(),
            infix_operators: BTreeMap::new(),
            statements: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Parse the entire program: function definitions, infix operator
    /// definitions and top-level statements, in any order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        while !self.is_at_end() {
            self.parse_top_level()?;
        }

        tracing::debug!(
            functions = self.functions.len(),
            infix_operators = self.infix_operators.len(),
            statements = self.statements.len(),
            "parsed program"
        );

        Ok(Program {
            functions: std::mem::take(&mut self.functions),
            infix_operators: std::mem::take(&mut self.infix_operators),
            statements: std::mem::take(&mut self.statements),
        })
    }

    /// Warnings (and the error, if parsing failed) reported so far
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn precedence_table(&self) -> &PrecedenceTable {
        &self.precedence
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.current,
            Token::Bool(_) | Token::Int(_) | Token::Double(_) | Token::Str(_)
        )
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.current) == std::mem::discriminant(token)
    }

    /// Move to the next token, returning the one just consumed.
    pub(crate) fn advance(&mut self) -> Token {
        self.current_start = self.lexer.checkpoint();
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current, Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.current
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location()
    }

    /// Position of the current token, for [`Parser::restore`].
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        self.current_start
    }

    /// Rewind so the token at `checkpoint` becomes current again.
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.lexer.restore(checkpoint);
        self.advance();
    }

    /// Record an error at the current token. A malformed token reports its
    /// own lexical message instead.
    pub(crate) fn fail(&mut self, message: impl Into<String>) -> ParseError {
        if let Token::Error(lex_message, location) = &self.current {
            let err = ParseError::from(LexError {
                message: lex_message.clone(),
                location: *location,
            });
            return self.diagnostics.error(err.location, err.message);
        }
        let location = self.current_location();
        self.diagnostics.error(location, message)
    }

    pub(crate) fn error<T>(&mut self, message: impl Into<String>) -> Result<T, ParseError> {
        Err(self.fail(message))
    }

    pub(crate) fn error_at<T>(
        &mut self,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Result<T, ParseError> {
        Err(self.diagnostics.error(location, message))
    }

    pub(crate) fn warning_at(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.diagnostics.warning(location, message);
    }

    pub(crate) fn expect_token(
        &mut self,
        token: &Token,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            let found = self.peek().to_string();
            self.error(format!("{}, found {}", message, found))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = &self.current {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            let found = self.peek().to_string();
            self.error(format!("Expected identifier {ctx}, found {found}"))
        }
    }
}
