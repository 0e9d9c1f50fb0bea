//! Runtime error types for the C-- interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse errors or I/O errors).
//!
//! All runtime errors are fatal - they halt execution and are reported to the caller.

use crate::parser::ast::{BasicType, SourceLocation};
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Undefined variable reference
    #[error("variable `{name}' is undefined at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Undefined function call
    #[error("function `{name}' is undefined at {location}")]
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    /// Infix symbol with no definition
    #[error("infix operator {symbol} is undefined at {location}")]
    UndefinedOperator {
        symbol: String,
        location: SourceLocation,
    },

    /// Second declaration of a name in one scope
    #[error("variable `{name}' is already defined in current scope at {location}")]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Initializer of the wrong type
    #[error(
        "variable `{name}' is declared to be {declared}, but is initialized to be {got} at {location}"
    )]
    DeclarationTypeMismatch {
        name: String,
        declared: BasicType,
        got: BasicType,
        location: SourceLocation,
    },

    /// Assigned value of the wrong type
    #[error("assignment to {target} variable `{name}' with {got} expression at {location}")]
    AssignmentTypeMismatch {
        name: String,
        target: BasicType,
        got: BasicType,
        location: SourceLocation,
    },

    /// Argument count differs from parameter count
    #[error(
        "function `{function}' expects {expected} parameter(s), {got} argument(s) provided at {location}"
    )]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Argument of the wrong type
    #[error(
        "parameter `{parameter}' of function `{function}' is {expected}, but the argument is {got} at {location}"
    )]
    ArgumentTypeMismatch {
        function: String,
        parameter: String,
        expected: BasicType,
        got: BasicType,
        location: SourceLocation,
    },

    /// Returned value of the wrong type
    #[error("function `{function}' ought to return {expected}, but got {got} at {location}")]
    ReturnTypeMismatch {
        function: String,
        expected: BasicType,
        got: BasicType,
        location: SourceLocation,
    },

    /// Non-void function finished without `return value;`
    #[error("function `{function}' ought to return {expected}, but returned nothing at {location}")]
    MissingReturn {
        function: String,
        expected: BasicType,
        location: SourceLocation,
    },

    /// Statement-bodied infix operator finished without a value
    #[error("infix operator {symbol} finished without returning a value at {location}")]
    InfixWithoutValue {
        symbol: String,
        location: SourceLocation,
    },

    /// Operator applied to operand types it does not support
    #[error("operator `{operator}' cannot be applied to {left} and {right} at {location}")]
    InvalidOperands {
        operator: &'static str,
        left: BasicType,
        right: BasicType,
        location: SourceLocation,
    },

    /// Result of a `void` call used where a value is needed
    #[error("void value passed to `{function}' at {location}")]
    VoidArgument {
        function: String,
        location: SourceLocation,
    },

    /// Condition of `if`, `while` or `for` that is not a bool
    #[error("condition must be bool, got {got} at {location}")]
    NonBoolCondition {
        got: BasicType,
        location: SourceLocation,
    },

    /// Integer division or modulo by zero
    #[error("division by zero at {location}")]
    DivisionByZero { location: SourceLocation },

    /// Integer overflow in arithmetic operation
    #[error("integer overflow in operation: {operation} at {location}")]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Shift count outside 0..32
    #[error("shift amount {amount} is out of range at {location}")]
    ShiftOutOfRange {
        amount: i32,
        location: SourceLocation,
    },

    /// `break`, `continue` or `return` with nowhere to go
    #[error("unbound {kind} at {location}")]
    UnboundControlFlow {
        kind: &'static str,
        location: SourceLocation,
    },

    /// Syntax the parser accepts but the interpreter cannot run
    #[error("{feature} unimplemented at {location}")]
    Unimplemented {
        feature: String,
        location: SourceLocation,
    },

    /// A native function reported a failure
    #[error("{name}: {message} at {location}")]
    NativeFailure {
        name: String,
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::UndefinedFunction { location, .. }
            | RuntimeError::UndefinedOperator { location, .. }
            | RuntimeError::Redeclaration { location, .. }
            | RuntimeError::DeclarationTypeMismatch { location, .. }
            | RuntimeError::AssignmentTypeMismatch { location, .. }
            | RuntimeError::ArgumentCountMismatch { location, .. }
            | RuntimeError::ArgumentTypeMismatch { location, .. }
            | RuntimeError::ReturnTypeMismatch { location, .. }
            | RuntimeError::MissingReturn { location, .. }
            | RuntimeError::InfixWithoutValue { location, .. }
            | RuntimeError::InvalidOperands { location, .. }
            | RuntimeError::VoidArgument { location, .. }
            | RuntimeError::NonBoolCondition { location, .. }
            | RuntimeError::DivisionByZero { location }
            | RuntimeError::IntegerOverflow { location, .. }
            | RuntimeError::ShiftOutOfRange { location, .. }
            | RuntimeError::UnboundControlFlow { location, .. }
            | RuntimeError::Unimplemented { location, .. }
            | RuntimeError::NativeFailure { location, .. } => *location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let location = SourceLocation::new(4, 2);
        let err = RuntimeError::ArgumentCountMismatch {
            function: "f".to_string(),
            expected: 2,
            got: 1,
            location,
        };
        assert_eq!(
            err.to_string(),
            "function `f' expects 2 parameter(s), 1 argument(s) provided at line 4, column 2"
        );
        assert_eq!(err.location(), location);

        let err = RuntimeError::UnboundControlFlow {
            kind: "break",
            location,
        };
        assert_eq!(err.to_string(), "unbound break at line 4, column 2");
    }
}
