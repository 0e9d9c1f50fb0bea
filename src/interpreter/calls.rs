//! Function calls
//!
//! User functions shadow natives of the same name. Arguments are evaluated
//! left to right in the caller's environment, then bound in a fresh frame
//! that sees globals but none of the caller's locals.

use crate::interpreter::engine::{ExecResult, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::*;
use crate::runtime::value::Value;
use std::rc::Rc;

impl Interpreter {
    pub(crate) fn evaluate_call(
        &mut self,
        callee: &str,
        args: &[Expression],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let program = Rc::clone(&self.program);

        if let Some(function) = program.functions.get(callee) {
            let values = self.evaluate_arguments(args)?;
            return self.call_user_function(function, values, location);
        }

        if let Some(native) = self.natives.get(callee).copied() {
            let values = self.evaluate_arguments(args)?;
            if let Some(position) = values.iter().position(Value::is_void) {
                return Err(RuntimeError::VoidArgument {
                    function: callee.to_string(),
                    location: args[position].location(),
                });
            }
            tracing::trace!(callee, argc = values.len(), "native call");
            return native(&mut self.terminal, &values).map_err(|message| {
                RuntimeError::NativeFailure {
                    name: callee.to_string(),
                    message,
                    location,
                }
            });
        }

        Err(RuntimeError::UndefinedFunction {
            name: callee.to_string(),
            location,
        })
    }

    fn evaluate_arguments(&mut self, args: &[Expression]) -> Result<Vec<Value>, RuntimeError> {
        args.iter().map(|arg| self.evaluate(arg)).collect()
    }

    #[tracing::instrument(level = "trace", skip(self, function, args, location), fields(name = %function.name))]
    fn call_user_function(
        &mut self,
        function: &FunctionDefinition,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: function.name.clone(),
                expected: function.params.len(),
                got: args.len(),
                location,
            });
        }

        // Parameters take exactly their declared type, ints are not widened here
        for (param, arg) in function.params.iter().zip(&args) {
            if arg.basic_type() != param.ty {
                return Err(RuntimeError::ArgumentTypeMismatch {
                    function: function.name.clone(),
                    parameter: param.name.clone(),
                    expected: param.ty,
                    got: arg.basic_type(),
                    location,
                });
            }
        }

        self.env.push_frame(&function.name);
        for (param, arg) in function.params.iter().zip(args) {
            self.env.declare(&param.name, arg);
        }
        let result = self.execute_statement(&function.body);
        self.env.pop_frame();

        let value = match result? {
            ExecResult::Return(Some(value)) => value,
            ExecResult::Return(None) | ExecResult::Normal => Value::Void,
            escaped => {
                return Err(RuntimeError::UnboundControlFlow {
                    kind: escaped.kind_name(),
                    location: function.location,
                })
            }
        };

        check_return_type(function, value, location)
    }
}

fn check_return_type(
    function: &FunctionDefinition,
    value: Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    let got = value.basic_type();
    if got == function.return_type {
        Ok(value)
    } else if value.is_void() {
        Err(RuntimeError::MissingReturn {
            function: function.name.clone(),
            expected: function.return_type,
            location,
        })
    } else {
        Err(RuntimeError::ReturnTypeMismatch {
            function: function.name.clone(),
            expected: function.return_type,
            got,
            location,
        })
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
    fn test_recursive_function() {
        let (interp, result) = run(
            "int fact(int n) { if (n <= 1) return 1; return n * fact(n - 1); }\n\
             int r = fact(10);",
        );
        result.unwrap();
        assert_eq!(interp.global("r"), Some(&Value::Int(3628800)));
    }

    #[test]
    fn test_function_defined_after_use() {
        let (interp, result) = run("int r = twice(4); int twice(int x) { return x + x; }");
        result.unwrap();
        assert_eq!(interp.global("r"), Some(&Value::Int(8)));
    }

    #[test]
    fn test_argument_count_mismatch() {
        let (_, result) = run("int add(int a, int b) { return a + b; } add(1);");
        assert!(matches!(
            result,
            Err(RuntimeError::ArgumentCountMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_argument_is_not_widened() {
        let (_, result) = run("double half(double x) { return x / 2; } half(3);");
        match result {
            Err(RuntimeError::ArgumentTypeMismatch {
                parameter,
                expected,
                got,
                ..
            }) => {
                assert_eq!(parameter, "x");
                assert_eq!(expected, BasicType::Double);
                assert_eq!(got, BasicType::Int);
            }
            other => panic!("Expected argument type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_return_type_mismatch() {
        let (_, result) = run("int f() { return \"no\"; } f();");
        assert!(matches!(
            result,
            Err(RuntimeError::ReturnTypeMismatch {
                expected: BasicType::Int,
                got: BasicType::String,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_return() {
        let (_, result) = run("int f(int x) { if (x > 0) return 1; } f(-1);");
        assert!(matches!(result, Err(RuntimeError::MissingReturn { .. })));
    }

    #[test]
    fn test_void_function() {
        let (interp, result) = run("void greet(string who) { println(\"hi \" + who); } greet(\"bob\");");
        result.unwrap();
        assert_eq!(interp.terminal().output(), "hi bob\n");
    }

    #[test]
    fn test_callee_cannot_see_caller_locals() {
        let (_, result) = run("int peek() { return hidden; } { int hidden = 1; peek(); }");
        assert!(matches!(result, Err(RuntimeError::UndefinedVariable { ref name, .. }) if name == "hidden"));
    }

    #[test]
    fn test_callee_updates_globals() {
        let (interp, result) = run("int counter; void bump() { counter = counter + 1; } bump(); bump();");
        result.unwrap();
        assert_eq!(interp.global("counter"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_break_escaping_function() {
        let (_, result) = run("void f() { break; } f();");
        assert!(matches!(
            result,
            Err(RuntimeError::UnboundControlFlow { kind: "break", .. })
        ));
    }

    #[test]
    fn test_user_function_shadows_native() {
        let (interp, result) = run("int print(int x) { return x; } int r = print(7);");
        result.unwrap();
        assert_eq!(interp.global("r"), Some(&Value::Int(7)));
        assert_eq!(interp.terminal().output(), "");
    }

    #[test]
    fn test_void_result_passed_to_native() {
        let (interp, result) = run("void f() { }\nprintln(\"a\");\nprintln(f());");
        match result {
            Err(RuntimeError::VoidArgument { function, location }) => {
                assert_eq!(function, "println");
                assert_eq!(location.line, 3);
            }
            other => panic!("Expected void argument error, got {:?}", other),
        }
        assert_eq!(interp.terminal().output(), "a\n");
    }

    #[test]
    fn test_undefined_function() {
        let (_, result) = run("nope(1);");
        assert!(matches!(result, Err(RuntimeError::UndefinedFunction { ref name, .. }) if name == "nope"));
    }

    #[test]
    fn test_native_failure_is_reported() {
        let (_, result) = run("system(1);");
        assert!(matches!(result, Err(RuntimeError::NativeFailure { ref name, .. }) if name == "system"));
    }
}
