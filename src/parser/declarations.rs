//! Declaration parsing implementation
//!
//! This module handles parsing of top-level items and declaration lists:
//!
//! - Function definitions: `type name(params) statement`
//! - Infix operator definitions: `infix [prec] lhs SYMBOL rhs body`
//! - Variable declaration lists: `type a, b = expr, c[n];`
//!
//! # Grammar
//!
//! ```text
//! top_level    ::= function_def | infix_def | statement
//! function_def ::= type identifier "(" [params | "void"] ")" statement
//! infix_def    ::= "infix" [int] identifier SYMBOL identifier ("=" expr ";" | statement)
//! decl_list    ::= type declarator ("," declarator)* ";"
//! declarator   ::= identifier ("[" expr "]")* ["=" expr]
//! ```
//!
//! `int f(...)` and `int f = ...;` share a prefix. After the type and the
//! name, a `(` selects a function; otherwise the parser rewinds to the name
//! and parses a declaration list.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::precedence::DEFAULT_INFIX_PRECEDENCE;

impl Parser {
    /// Parse one top-level item and file it in the matching table
    pub(crate) fn parse_top_level(&mut self) -> Result<(), ParseError> {
        let loc = self.current_location();

        match self.peek() {
            Token::Infix(_) => self.parse_infix_definition(),
            Token::Void(_) => {
                self.advance();
                let name_location = self.current_location();
                let name = self.expect_identifier("in function definition")?;
                self.parse_function_definition(BasicType::Void, name, name_location, loc)
            }
            _ if self.is_type_keyword() => {
                let ty = self.parse_type_specifier()?;
                let checkpoint = self.checkpoint();
                let name_location = self.current_location();
                let name = self.expect_identifier("after type")?;

                if self.check(&Token::LParen(name_location)) {
                    return self.parse_function_definition(ty, name, name_location, loc);
                }

                self.restore(checkpoint);
                let declarations = self.parse_declaration_list(ty, loc)?;
                self.statements.push(declarations);
                Ok(())
            }
            _ => {
                if let Some(statement) = self.parse_statement()? {
                    self.statements.push(statement);
                }
                Ok(())
            }
        }
    }

    /// `bool`, `int`, `double`, `string` or `void`
    pub(crate) fn parse_type_specifier(&mut self) -> Result<BasicType, ParseError> {
        let ty = match self.peek() {
            Token::Bool(_) => BasicType::Bool,
            Token::Int(_) => BasicType::Int,
            Token::Double(_) => BasicType::Double,
            Token::Str(_) => BasicType::String,
            Token::Void(_) => BasicType::Void,
            other => {
                let found = other.to_string();
                return self.error(format!("Expected type specifier, found {found}"));
            }
        };
        self.advance();
        Ok(ty)
    }

    /// Parse the rest of a function definition once its return type and name
    /// are known; the current token is `(`.
    fn parse_function_definition(
        &mut self,
        return_type: BasicType,
        name: String,
        name_location: SourceLocation,
        loc: SourceLocation,
    ) -> Result<(), ParseError> {
        self.expect_lparen("after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        let body = self.parse_body()?;

        if self.functions.contains_key(&name) {
            self.warning_at(name_location, format!("function `{name}' overrides another one"));
        }
        tracing::debug!(function = %name, params = params.len(), "parsed function definition");

        self.functions.insert(
            name.clone(),
            FunctionDefinition {
                name,
                return_type,
                params,
                body,
                location: loc,
            },
        );
        Ok(())
    }

    /// Parse parameter list: `()`, `(void)` or `(type name, ...)`
    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }
        if self.match_token(&Token::Void(self.current_location())) {
            return Ok(params);
        }

        loop {
            let location = self.current_location();
            let ty = self.parse_type_specifier()?;
            if ty == BasicType::Void {
                return self.error_at(location, "parameter cannot have type `void'");
            }

            let name = if let Token::Ident(name, _) = self.peek() {
                let name = name.clone();
                self.advance();
                name
            } else {
                self.warning_at(self.current_location(), "missing identifier after type");
                String::new()
            };

            params.push(Parameter { name, ty, location });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse infix operator definition; the symbol is usable from here on
    fn parse_infix_definition(&mut self) -> Result<(), ParseError> {
        let loc = self.current_location();
        self.advance(); // eat 'infix'

        let precedence = if let Token::IntLiteral(value, prec_loc) = self.peek() {
            let (value, prec_loc) = (*value, *prec_loc);
            self.advance();
            match u8::try_from(value) {
                Ok(p) if p >= 1 => p,
                _ => {
                    return self.error_at(
                        prec_loc,
                        format!("infix precedence must be between 1 and {}, got {value}", u8::MAX),
                    )
                }
            }
        } else {
            DEFAULT_INFIX_PRECEDENCE
        };

        let lhs = self.expect_identifier("as left hand operand of infix operator")?;

        let symbol_location = self.current_location();
        let symbol = match self.peek() {
            Token::InfixOp(symbol, _) => symbol.clone(),
            other => {
                let found = other.to_string();
                return self.error(format!("Expected symbol of infix operator, found {found}"));
            }
        };
        self.advance();

        let rhs = self.expect_identifier("as right hand operand of infix operator")?;

        let body = if self.match_token(&Token::Eq(self.current_location())) {
            let expr = self.parse_expression()?;
            self.expect_semicolon("after infix operator body")?;
            InfixBody::Expr(expr)
        } else {
            InfixBody::Statement(self.parse_body()?)
        };

        if self.precedence.register(symbol.clone(), precedence).is_some() {
            self.warning_at(symbol_location, format!("infix operator {symbol} overrides another"));
        }
        tracing::debug!(%symbol, precedence, "registered infix operator");

        self.infix_operators.insert(
            symbol.clone(),
            InfixDefinition {
                symbol,
                lhs,
                rhs,
                precedence,
                body,
                location: loc,
            },
        );
        Ok(())
    }

    /// Parse declaration statement inside a block: `type decl, ...;`
    pub(crate) fn parse_declaration_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        let ty = self.parse_type_specifier()?;
        self.parse_declaration_list(ty, loc)
    }

    /// Declarators after the type, up to and including the `;`
    pub(crate) fn parse_declaration_list(
        &mut self,
        ty: BasicType,
        loc: SourceLocation,
    ) -> Result<Statement, ParseError> {
        let mut declarations = Vec::new();

        loop {
            let location = self.current_location();
            let name = self.expect_identifier("in declaration")?;

            let mut dimensions = Vec::new();
            while self.match_token(&Token::LBracket(self.current_location())) {
                dimensions.push(self.parse_expression()?);
                self.expect_token(
                    &Token::RBracket(self.current_location()),
                    "Expected ']' in array declaration",
                )?;
            }

            let initializer = if self.match_token(&Token::Eq(self.current_location())) {
                Some(self.parse_expression()?)
            } else {
                None
            };

            declarations.push(Declaration {
                name,
                initializer,
                dimensions,
                location,
            });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        self.expect_semicolon("after declaration")?;

        Ok(Statement::DeclarationList {
            ty,
            declarations,
            location: loc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Program, Parser) {
        let mut parser = Parser::new(source);
        let program = parser.parse_program().unwrap();
        (program, parser)
    }

    #[test]
    fn test_function_definition() {
        let (program, _) = parse("double scale(int n, double f) { return n * f; }");
        let function = &program.functions["scale"];
        assert_eq!(function.return_type, BasicType::Double);
        assert_eq!(function.params.len(), 2);
        assert_eq!(function.params[0].name, "n");
        assert_eq!(function.params[0].ty, BasicType::Int);
        assert_eq!(function.params[1].ty, BasicType::Double);
    }

    #[test]
    fn test_void_parameter_list() {
        let (program, _) = parse("void tick(void) { }");
        assert!(program.functions["tick"].params.is_empty());
        assert_eq!(program.functions["tick"].return_type, BasicType::Void);
    }

    #[test]
    fn test_declaration_after_type_rewinds() {
        let (program, _) = parse("int a = 1, b, c[3];");
        match &program.statements[0] {
            Statement::DeclarationList { ty, declarations, .. } => {
                assert_eq!(*ty, BasicType::Int);
                assert_eq!(declarations.len(), 3);
                assert_eq!(declarations[0].name, "a");
                assert!(declarations[0].initializer.is_some());
                assert!(declarations[1].initializer.is_none());
                assert!(declarations[2].is_array());
            }
            other => panic!("Expected declaration list, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_parameter_name_warns() {
        let (program, parser) = parse("int f(int) { return 0; }");
        assert_eq!(program.functions["f"].params.len(), 1);
        let warning = parser.diagnostics().warnings().next().unwrap();
        assert_eq!(warning.message, "missing identifier after type");
    }

    #[test]
    fn test_function_redefinition_warns_and_replaces() {
        let (program, parser) = parse("int f() { return 1; }\nint f() { return 2; }");
        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions["f"].location.line, 2);
        let warning = parser.diagnostics().warnings().next().unwrap();
        assert_eq!(warning.message, "function `f' overrides another one");
    }

    #[test]
    fn test_infix_definition_registers_precedence() {
        let (program, parser) = parse("infix 5 a <> b = a - b;");
        let def = &program.infix_operators["<>"];
        assert_eq!(def.precedence, 5);
        assert_eq!(def.lhs, "a");
        assert_eq!(def.rhs, "b");
        assert!(matches!(def.body, InfixBody::Expr(_)));
        assert_eq!(parser.precedence_table().get("<>"), Some(5));
    }

    #[test]
    fn test_infix_default_precedence_and_statement_body() {
        let (program, _) = parse("infix x ** y { return x * y; }");
        let def = &program.infix_operators["**"];
        assert_eq!(def.precedence, DEFAULT_INFIX_PRECEDENCE);
        assert!(matches!(def.body, InfixBody::Statement(Statement::Block(_))));
    }

    #[test]
    fn test_infix_redefinition_warns() {
        let (program, parser) = parse("infix 5 a <> b = a;\ninfix 6 a <> b = b;");
        assert_eq!(program.infix_operators["<>"].precedence, 6);
        let warning = parser.diagnostics().warnings().next().unwrap();
        assert_eq!(warning.message, "infix operator <> overrides another");
    }

    #[test]
    fn test_infix_precedence_out_of_range() {
        let mut parser = Parser::new("infix 0 a <> b = a;");
        assert!(parser.parse_program().is_err());
        let mut parser = Parser::new("infix 256 a <> b = a;");
        assert!(parser.parse_program().is_err());
    }

    #[test]
    fn test_infix_requires_unknown_symbol() {
        let mut parser = Parser::new("infix a + b = a;");
        let err = parser.parse_program().unwrap_err();
        assert!(err.message.starts_with("Expected symbol of infix operator"));
    }

    #[test]
    fn test_operator_used_before_declaration_fails() {
        let mut parser = Parser::new("int x = 1 <> 2;\ninfix a <> b = a;");
        assert!(parser.parse_program().is_err());
    }
}
