//! Expression evaluation
//!
//! Operands are evaluated left to right, both sides always; `&&` and `||`
//! do not short-circuit. Operator semantics live in [`super::ops::binary`].

use crate::interpreter::engine::{ExecResult, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::ops::binary::binary_calc;
use crate::parser::ast::*;
use crate::runtime::value::Value;
use std::rc::Rc;

impl Interpreter {
    pub(crate) fn evaluate(&mut self, expr: &Expression) -> Result<Value, RuntimeError> {
        match expr {
            Expression::Int(n, _) => Ok(Value::Int(*n)),
            Expression::Double(d, _) => Ok(Value::Double(*d)),
            Expression::Bool(b, _) => Ok(Value::Bool(*b)),
            Expression::Str(s, _) => Ok(Value::Str(s.clone())),
            Expression::Identifier(name, location) => {
                self.env
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        location: *location,
                    })
            }
            Expression::Call {
                callee,
                args,
                location,
                ..
            } => self.evaluate_call(callee, args, *location),
            Expression::Binary {
                op,
                lhs,
                rhs,
                location,
            } => self.evaluate_binary(*op, lhs, rhs, *location),
            Expression::Unary { op, location, .. } => Err(RuntimeError::Unimplemented {
                feature: format!("unary operator `{}'", op.symbol()),
                location: *location,
            }),
            Expression::Infix {
                symbol,
                lhs,
                rhs,
                location,
            } => self.evaluate_infix(symbol, lhs, rhs, *location),
        }
    }

    fn evaluate_binary(
        &mut self,
        op: BinaryOperator,
        lhs: &Expression,
        rhs: &Expression,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinaryOperator::Assign => match lhs {
                Expression::Identifier(name, _) => self.evaluate_assignment(name, rhs, location),
                _ => Err(RuntimeError::Unimplemented {
                    feature: "assignment to a non-identifier".to_string(),
                    location,
                }),
            },
            BinaryOperator::Index => Err(RuntimeError::Unimplemented {
                feature: "array indexing".to_string(),
                location,
            }),
            _ => {
                let left = self.evaluate(lhs)?;
                let right = self.evaluate(rhs)?;
                binary_calc(op, left, right, location)
            }
        }
    }

    /// `name = value`; yields the stored value
    fn evaluate_assignment(
        &mut self,
        name: &str,
        rhs: &Expression,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let value = self.evaluate(rhs)?;

        let slot = self
            .env
            .lookup_mut(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })?;

        let target = slot.basic_type();
        let got = value.basic_type();
        let value = value
            .coerce_to(target)
            .ok_or_else(|| RuntimeError::AssignmentTypeMismatch {
                name: name.to_string(),
                target,
                got,
                location,
            })?;

        *slot = value.clone();
        Ok(value)
    }

    /// Apply a user-defined infix operator. The body runs in its own frame
    /// with the operand names bound, seeing globals but not the caller's locals.
    fn evaluate_infix(
        &mut self,
        symbol: &str,
        lhs: &Expression,
        rhs: &Expression,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let program = Rc::clone(&self.program);
        let definition =
            program
                .infix_operators
                .get(symbol)
                .ok_or_else(|| RuntimeError::UndefinedOperator {
                    symbol: symbol.to_string(),
                    location,
                })?;

        let left = self.evaluate(lhs)?;
        let right = self.evaluate(rhs)?;

        self.env.push_frame(symbol);
        self.env.declare(&definition.lhs, left);
        self.env.declare(&definition.rhs, right);
        let result = self.run_infix_body(definition, location);
        self.env.pop_frame();
        result
    }

    fn run_infix_body(
        &mut self,
        definition: &InfixDefinition,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match &definition.body {
            InfixBody::Expr(expr) => self.evaluate(expr),
            InfixBody::Statement(statement) => match self.execute_statement(statement)? {
                ExecResult::Return(Some(value)) if !value.is_void() => Ok(value),
                ExecResult::Return(_) | ExecResult::Normal => Err(RuntimeError::InfixWithoutValue {
                    symbol: definition.symbol.clone(),
                    location,
                }),
                escaped => Err(RuntimeError::UnboundControlFlow {
                    kind: escaped.kind_name(),
                    location: definition.location,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::interpreter::errors::RuntimeError;
    use crate::parser::ast::BasicType;
    use crate::parser::Parser;
    use crate::runtime::value::Value;

    fn run(source: &str) -> (Interpreter, Result<(), RuntimeError>) {
        let program = Parser::new(source).parse_program().unwrap();
        let mut interpreter = Interpreter::with_captured_output(program);
        let result = interpreter.run();
        (interpreter, result)
    }

    #[test]
    fn test_assignment_yields_value_and_chains() {
        let (interp, result) = run("int a; int b; a = b = 3;");
        result.unwrap();
        assert_eq!(interp.global("a"), Some(&Value::Int(3)));
        assert_eq!(interp.global("b"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_assignment_widens_int() {
        let (interp, result) = run("double d; d = 2;");
        result.unwrap();
        assert_eq!(interp.global("d"), Some(&Value::Double(2.0)));
    }

    #[test]
    fn test_assignment_type_mismatch() {
        let (_, result) = run("int x; x = \"text\";");
        assert!(matches!(
            result,
            Err(RuntimeError::AssignmentTypeMismatch {
                target: BasicType::Int,
                got: BasicType::String,
                ..
            })
        ));
    }

    #[test]
    fn test_assignment_to_undefined() {
        let (_, result) = run("y = 1;");
        assert!(matches!(result, Err(RuntimeError::UndefinedVariable { ref name, .. }) if name == "y"));
    }

    #[test]
    fn test_infix_expression_body() {
        let (interp, result) = run("infix 5 a <> b = a - b; int r = 10 <> 3 <> 1;");
        result.unwrap();
        assert_eq!(interp.global("r"), Some(&Value::Int(6)));
    }

    #[test]
    fn test_infix_statement_body() {
        let (interp, result) = run(
            "infix x |> y { if (x > y) return x; return y; }\nint r = 2 |> 9 |> 4;",
        );
        result.unwrap();
        assert_eq!(interp.global("r"), Some(&Value::Int(9)));
    }

    #[test]
    fn test_infix_without_value() {
        let (_, result) = run("infix a ## b { a; }\nint r = 1 ## 2;");
        assert!(matches!(result, Err(RuntimeError::InfixWithoutValue { ref symbol, .. }) if symbol == "##"));
    }

    #[test]
    fn test_infix_body_sees_globals_not_locals() {
        let (interp, result) = run(
            "int scale = 10;\n\
             infix a ** b = a * b * scale;\n\
             int r;\n\
             { int scale = 1; r = 2 ** 3; }",
        );
        result.unwrap();
        assert_eq!(interp.global("r"), Some(&Value::Int(60)));
    }

    #[test]
    fn test_unary_on_variable_unimplemented() {
        let (_, result) = run("int x = 1; int y = -x;");
        assert!(matches!(result, Err(RuntimeError::Unimplemented { .. })));
    }
}
