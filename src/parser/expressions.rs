//! Expression parsing implementation
//!
//! Binary expressions are parsed by precedence climbing over the parser's
//! [`PrecedenceTable`](crate::parser::precedence::PrecedenceTable), so an
//! operator declared with `infix` earlier in the source takes part exactly
//! like a built-in one. Everything else is recursive descent.
//!
//! # Supported Expressions
//!
//! - Literals: integers, doubles, booleans, strings
//! - Identifiers, calls `f(a, b)` and dynamic calls `f!(a, b)`
//! - Indexing `a[i]`
//! - Prefix operators `+ - ! ~`, folded when applied to a literal
//! - Binary operators, built-in and user-declared
//! - Assignment `x = expr`, right-associative, identifier targets only
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::precedence::ASSIGNMENT_PRECEDENCE;

/// Operator sitting at the current token, before it is consumed
enum PendingOperator {
    Builtin(BinaryOperator),
    Infix(String),
}

/// Built-in binary operator spelled by a token
fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Eq(_) => BinaryOperator::Assign,
        Token::OrOr(_) => BinaryOperator::LogicalOr,
        Token::AndAnd(_) => BinaryOperator::LogicalAnd,
        Token::Pipe(_) => BinaryOperator::BitwiseOr,
        Token::Caret(_) => BinaryOperator::BitwiseXor,
        Token::Amp(_) => BinaryOperator::BitwiseAnd,
        Token::EqEq(_) => BinaryOperator::Equal,
        Token::NotEq(_) => BinaryOperator::NotEqual,
        Token::Lt(_) => BinaryOperator::Less,
        Token::Le(_) => BinaryOperator::LessEqual,
        Token::Gt(_) => BinaryOperator::Greater,
        Token::Ge(_) => BinaryOperator::GreaterEqual,
        Token::LtLt(_) => BinaryOperator::LeftShift,
        Token::GtGt(_) => BinaryOperator::RightShift,
        Token::Plus(_) => BinaryOperator::Add,
        Token::Minus(_) => BinaryOperator::Sub,
        Token::Star(_) => BinaryOperator::Mul,
        Token::Slash(_) => BinaryOperator::Div,
        Token::Percent(_) => BinaryOperator::Mod,
        _ => return None,
    };
    Some(op)
}

/// Fold a prefix operator applied directly to a literal.
fn fold_unary(op: UnaryOperator, operand: Expression, location: SourceLocation) -> Expression {
    match (op, operand) {
        (UnaryOperator::Plus, Expression::Int(n, _)) => Expression::Int(n, location),
        (UnaryOperator::Plus, Expression::Double(d, _)) => Expression::Double(d, location),
        (UnaryOperator::Minus, Expression::Int(n, loc)) => match n.checked_neg() {
            Some(negated) => Expression::Int(negated, location),
            None => Expression::Unary {
                op,
                operand: Box::new(Expression::Int(n, loc)),
                location,
            },
        },
        (UnaryOperator::Minus, Expression::Double(d, _)) => Expression::Double(-d, location),
        (UnaryOperator::LogicalNot, Expression::Bool(b, _)) => Expression::Bool(!b, location),
        (UnaryOperator::BitwiseNot, Expression::Int(n, _)) => Expression::Int(!n, location),
        (op, operand) => Expression::Unary {
            op,
            operand: Box::new(operand),
            location,
        },
    }
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let lhs = self.parse_primary()?;
        self.parse_bin_op_rhs(ASSIGNMENT_PRECEDENCE, lhs)
    }

    /// Operator at the current token together with its precedence.
    /// Symbols missing from the table end the expression.
    fn current_operator(&self) -> Option<(PendingOperator, u8)> {
        match self.peek() {
            Token::InfixOp(symbol, _) => {
                let precedence = self.precedence.get(symbol)?;
                Some((PendingOperator::Infix(symbol.clone()), precedence))
            }
            token => {
                let op = binary_operator(token)?;
                let precedence = self.precedence.get(op.symbol())?;
                Some((PendingOperator::Builtin(op), precedence))
            }
        }
    }

    /// Precedence climbing: fold operators binding at least as tightly as
    /// `min_precedence` onto `lhs`.
    fn parse_bin_op_rhs(
        &mut self,
        min_precedence: u8,
        mut lhs: Expression,
    ) -> Result<Expression, ParseError> {
        loop {
            let Some((pending, precedence)) = self.current_operator() else {
                return Ok(lhs);
            };
            if precedence < min_precedence {
                return Ok(lhs);
            }

            if let PendingOperator::Builtin(BinaryOperator::Assign) = pending {
                return self.parse_assignment(lhs);
            }

            let location = self.current_location();
            self.advance(); // eat the operator
            let mut rhs = self.parse_primary()?;

            // A tighter operator after the operand takes it as its left side
            if let Some((_, next_precedence)) = self.current_operator() {
                if precedence < next_precedence {
                    rhs = self.parse_bin_op_rhs(precedence + 1, rhs)?;
                }
            }

            lhs = match pending {
                PendingOperator::Builtin(op) => Expression::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    location,
                },
                PendingOperator::Infix(symbol) => Expression::Infix {
                    symbol,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    location,
                },
            };
        }
    }

    /// `target = value`, where the current token is `=`
    fn parse_assignment(&mut self, target: Expression) -> Result<Expression, ParseError> {
        let location = self.current_location();
        if !matches!(target, Expression::Identifier(..)) {
            return self.error_at(
                target.location(),
                "left hand side of assignment must be an identifier",
            );
        }
        self.advance(); // eat '='

        let value = self.parse_expression()?;
        Ok(Expression::Binary {
            op: BinaryOperator::Assign,
            lhs: Box::new(target),
            rhs: Box::new(value),
            location,
        })
    }

    /// Parse primary (literals, names, calls, parenthesized and prefix expressions)
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let loc = self.current_location();

        let unary = match self.peek() {
            Token::Plus(_) => Some(UnaryOperator::Plus),
            Token::Minus(_) => Some(UnaryOperator::Minus),
            Token::Bang(_) => Some(UnaryOperator::LogicalNot),
            Token::Tilde(_) => Some(UnaryOperator::BitwiseNot),
            _ => None,
        };
        if let Some(op) = unary {
            self.advance();
            if let (UnaryOperator::Minus, Token::IntLiteral(magnitude, _)) = (op, self.peek()) {
                let magnitude = *magnitude;
                self.advance();
                return match i32::try_from(-i64::from(magnitude)) {
                    Ok(n) => Ok(Expression::Int(n, loc)),
                    Err(_) => self.error_at(loc, format!("integer literal -{magnitude} is out of range")),
                };
            }
            let operand = self.parse_primary()?;
            return Ok(fold_unary(op, operand, loc));
        }

        match self.peek().clone() {
            Token::IntLiteral(n, loc) => {
                self.advance();
                match i32::try_from(n) {
                    Ok(n) => Ok(Expression::Int(n, loc)),
                    Err(_) => self.error_at(loc, format!("integer literal {n} is out of range")),
                }
            }
            Token::DoubleLiteral(d, loc) => {
                self.advance();
                Ok(Expression::Double(d, loc))
            }
            Token::BoolLiteral(b, loc) => {
                self.advance();
                Ok(Expression::Bool(b, loc))
            }
            Token::StringLiteral(s, loc) => {
                self.advance();
                Ok(Expression::Str(s, loc))
            }
            Token::Ident(..) => {
                let expr = self.parse_identifier_expression()?;
                self.parse_index_suffix(expr)
            }
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            token => self.error(format!("Unexpected {} in expression", token)),
        }
    }

    /// Identifier, call `f(...)` or dynamic call `f!(...)`
    fn parse_identifier_expression(&mut self) -> Result<Expression, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier("in expression")?;

        let bang = if self.check(&Token::Bang(location)) {
            let bang_location = self.current_location();
            self.advance();
            Some(bang_location)
        } else {
            None
        };

        if self.match_token(&Token::LParen(location)) {
            let args = self.parse_argument_list()?;
            self.expect_rparen("after function arguments")?;
            return Ok(Expression::Call {
                callee: name,
                args,
                dynamic: bang.is_some(),
                location,
            });
        }

        if let Some(bang_location) = bang {
            self.warning_at(bang_location, "trailing `!' is ignored in identifier");
        }
        Ok(Expression::Identifier(name, location))
    }

    /// Any number of `[index]` suffixes
    fn parse_index_suffix(&mut self, mut expr: Expression) -> Result<Expression, ParseError> {
        while self.check(&Token::LBracket(self.current_location())) {
            let location = self.current_location();
            self.advance();
            let index = self.parse_expression()?;
            self.expect_token(
                &Token::RBracket(self.current_location()),
                "Expected ']' after index",
            )?;
            expr = Expression::Binary {
                op: BinaryOperator::Index,
                lhs: Box::new(expr),
                rhs: Box::new(index),
                location,
            };
        }
        Ok(expr)
    }

    /// Parse argument list: (expr, expr, ...)
    fn parse_argument_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut args = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(args)
    }
}
