//! Statement parsing implementation
//!
//! This module handles parsing of all C-- statement types:
//!
//! - Variable declarations: `int x = 42, y;`
//! - Control flow: `if`, `while`, `for`
//! - Jump statements: `return`, `break`, `continue`
//! - Compound statements: `{ ... }`
//! - Expression statements: function calls, assignments
//!
//! # Grammar
//!
//! ```text
//! statement ::= decl_list | if_stmt | while_stmt | for_stmt
//!             | return_stmt | break_stmt | continue_stmt
//!             | block | expr_stmt | ";"
//! ```
//!
//! A lone `;` is accepted with a warning and produces no node.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement. `Ok(None)` is an empty statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        let loc = self.current_location();

        let statement = match self.peek() {
            Token::LBrace(_) => self.parse_block()?,
            Token::If(_) => self.parse_if_statement()?,
            Token::While(_) => self.parse_while_statement()?,
            Token::For(_) => self.parse_for_statement()?,
            Token::Return(_) => self.parse_return_statement()?,
            Token::Break(_) => {
                self.advance();
                self.expect_semicolon("after 'break'")?;
                Statement::Break { location: loc }
            }
            Token::Continue(_) => {
                self.advance();
                self.expect_semicolon("after 'continue'")?;
                Statement::Continue { location: loc }
            }
            Token::Semicolon(_) => {
                self.advance();
                self.warning_at(loc, "empty statement");
                return Ok(None);
            }
            Token::Void(_) => {
                return self.error("`void' only appears before function definition");
            }
            Token::Infix(_) => {
                return self.error("infix operators can only be defined at top level");
            }
            _ if self.is_type_keyword() => self.parse_declaration_statement()?,
            _ => self.parse_expression_statement()?,
        };

        Ok(Some(statement))
    }

    /// A statement in a position that requires one; `;` becomes an empty block.
    pub(crate) fn parse_body(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        Ok(self
            .parse_statement()?
            .unwrap_or_else(|| Statement::empty(loc)))
    }

    /// Parse block: `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        self.expect_token(&Token::LBrace(loc), "Expected '{'")?;

        self.open_blocks.push(loc);
        tracing::trace!(depth = self.open_blocks.len(), "entering block");

        let mut statements = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) {
            if self.is_at_end() {
                return self.error_at(loc, "unterminated block, expected '}'");
            }
            if let Some(statement) = self.parse_statement()? {
                statements.push(statement);
            }
        }
        self.advance(); // eat '}'
        self.open_blocks.pop();

        Ok(Statement::Block(Block {
            statements,
            location: loc,
        }))
    }

    /// Parse if statement: `if (cond) stmt [else stmt]`
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        self.advance(); // eat 'if'

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = Box::new(self.parse_body()?);

        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            Some(Box::new(self.parse_body()?))
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement: `while (cond) stmt`
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        self.advance(); // eat 'while'

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = Box::new(self.parse_body()?);

        Ok(Statement::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse for statement: `for ([init]; [cond]; [post]) stmt`
    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        self.advance(); // eat 'for'

        self.expect_lparen("after 'for'")?;

        let init = self.parse_optional_expression(&Token::Semicolon(loc))?;
        self.expect_semicolon("after for loop initializer")?;

        let condition = self.parse_optional_expression(&Token::Semicolon(loc))?;
        self.expect_semicolon("after for loop condition")?;

        let post = self.parse_optional_expression(&Token::RParen(loc))?;
        self.expect_rparen("after for loop increment")?;

        let body = Box::new(self.parse_body()?);

        Ok(Statement::For {
            init,
            condition,
            post,
            body,
            location: loc,
        })
    }

    fn parse_optional_expression(
        &mut self,
        terminator: &Token,
    ) -> Result<Option<Expression>, ParseError> {
        if self.check(terminator) {
            Ok(None)
        } else {
            Ok(Some(self.parse_expression()?))
        }
    }

    /// Parse return statement: `return [expr];`
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        self.advance(); // eat 'return'

        let value = self.parse_optional_expression(&Token::Semicolon(loc))?;
        self.expect_semicolon("after return statement")?;

        Ok(Statement::Return {
            value,
            location: loc,
        })
    }

    /// Parse expression statement
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;

        Ok(Statement::Expr {
            expr,
            location: loc,
        })
    }
}
