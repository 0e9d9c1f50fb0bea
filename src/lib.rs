//! # Introduction
//!
//! `cmm` parses and runs C--, a small C-like scripting language with `bool`,
//! `int`, `double` and `string` values and user-defined binary operators.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ precedence table) → AST → Interpreter
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST. `infix`
//!    declarations extend the operator table while parsing, so an operator
//!    can be used by every statement after its declaration.
//! 2. [`runtime`]: tagged values and the scope chain.
//! 3. [`interpreter`]: walks the AST and executes statements.
//! 4. [`diagnostics`]: warnings collected by the parser.
//! 5. [`cli`]: command-line option handling for the `cmm` binary.
//!
//! ## Example
//!
//! ```text
//! infix 5 a <> b = a - b;
//! int r = 10 <> 3 <> 1;
//! println("r = ", r);
//! ```

pub mod cli;
pub mod diagnostics;
pub mod interpreter;
pub mod parser;
pub mod runtime;

use std::path::PathBuf;

use diagnostics::Diagnostic;
use interpreter::{Interpreter, RuntimeError};
use parser::{ParseError, Parser};
use thiserror::Error;

/// Any failure while loading, parsing or running a C-- program
#[derive(Debug, Error)]
pub enum CmmError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of [`run_captured`]
#[derive(Debug)]
pub struct RunOutcome {
    pub result: Result<(), CmmError>,
    /// Everything the program printed before it stopped
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse and run `source`, keeping program output in memory.
pub fn run_captured(source: &str) -> RunOutcome {
    let mut parser = Parser::new(source);
    let parsed = parser.parse_program();
    let diagnostics = parser.diagnostics().entries().to_vec();

    let program = match parsed {
        Ok(program) => program,
        Err(e) => {
            return RunOutcome {
                result: Err(e.into()),
                output: String::new(),
                diagnostics,
            }
        }
    };

    let mut interpreter = Interpreter::with_captured_output(program);
    let result = interpreter.run().map_err(CmmError::from);
    RunOutcome {
        result,
        output: interpreter.terminal().output().to_string(),
        diagnostics,
    }
}
