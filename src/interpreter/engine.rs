// Execution engine for the C-- interpreter

use crate::interpreter::builtins::{native_functions, NativeFunction, OutputTerminal};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::*;
use crate::runtime::environment::Environment;
use crate::runtime::value::Value;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// How a statement finished
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    Normal,
    Return(Option<Value>),
    Break,
    Continue,
}

impl ExecResult {
    /// Keyword that produced this result, for error messages
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            ExecResult::Normal => "statement",
            ExecResult::Return(_) => "return",
            ExecResult::Break => "break",
            ExecResult::Continue => "continue",
        }
    }
}

/// The main interpreter that executes a C-- program
pub struct Interpreter {
    /// Parsed program, shared so definitions can be borrowed while executing
    pub(crate) program: Rc<Program>,

    /// Global scope and call frames
    pub(crate) env: Environment,

    /// Functions implemented in Rust, consulted after user functions
    pub(crate) natives: FxHashMap<String, NativeFunction>,

    /// Where `print`/`println` output goes
    pub(crate) terminal: OutputTerminal,
}

impl Interpreter {
    /// Create a new interpreter whose output goes to stdout
    pub fn new(program: Program) -> Self {
        Self::with_terminal(program, OutputTerminal::stdout())
    }

    /// Create a new interpreter that keeps its output in memory
    pub fn with_captured_output(program: Program) -> Self {
        Self::with_terminal(program, OutputTerminal::captured())
    }

    pub fn with_terminal(program: Program, terminal: OutputTerminal) -> Self {
        Interpreter {
            program: Rc::new(program),
            env: Environment::new(),
            natives: native_functions(),
            terminal,
        }
    }

    /// Make a Rust function callable from C-- under `name`.
    /// User-defined functions with the same name take precedence.
    pub fn register_native(&mut self, name: &str, function: NativeFunction) {
        tracing::debug!(name, "registering native function");
        self.natives.insert(name.to_string(), function);
    }

    /// Run the top-level statements in order
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let program = Rc::clone(&self.program);

        for statement in &program.statements {
            match self.execute_statement(statement)? {
                ExecResult::Normal => {}
                escaped => {
                    return Err(RuntimeError::UnboundControlFlow {
                        kind: escaped.kind_name(),
                        location: statement.location(),
                    })
                }
            }
        }

        tracing::debug!("program finished");
        Ok(())
    }

    pub fn terminal(&self) -> &OutputTerminal {
        &self.terminal
    }

    /// Current value of a global variable
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.env.globals().get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn run(source: &str) -> (Interpreter, Result<(), RuntimeError>) {
        let program = Parser::new(source).parse_program().unwrap();
        let mut interpreter = Interpreter::with_captured_output(program);
        let result = interpreter.run();
        (interpreter, result)
    }

    #[test]
    fn test_top_level_runs_in_order() {
        let (interp, result) = run("int x = 1; x = x + 1; println(x);");
        result.unwrap();
        assert_eq!(interp.global("x"), Some(&Value::Int(2)));
        assert_eq!(interp.terminal().output(), "2\n");
    }

    #[test]
    fn test_top_level_break_is_unbound() {
        let (_, result) = run("break;");
        assert!(matches!(
            result,
            Err(RuntimeError::UnboundControlFlow { kind: "break", .. })
        ));
    }

    #[test]
    fn test_top_level_return_is_unbound() {
        let (_, result) = run("{ return 1; }");
        assert!(matches!(
            result,
            Err(RuntimeError::UnboundControlFlow { kind: "return", .. })
        ));
    }

    #[test]
    fn test_register_native() {
        fn answer(_: &mut OutputTerminal, _: &[Value]) -> Result<Value, String> {
            Ok(Value::Int(42))
        }

        let program = Parser::new("int x = answer();").parse_program().unwrap();
        let mut interp = Interpreter::with_captured_output(program);
        interp.register_native("answer", answer);
        interp.run().unwrap();
        assert_eq!(interp.global("x"), Some(&Value::Int(42)));
    }
}
