//! C-- tree-walking interpreter
//!
//! - [`engine`]: [`Interpreter`] state and the top-level run loop
//! - [`errors`]: Runtime error types
//! - [`builtins`]: Native functions (`print`, `println`, `system`) and their output sink
//!
//! # Execution Model
//!
//! Statements report how they finished through [`ExecResult`]. `break`,
//! `continue` and `return` travel upwards as ordinary return values until a
//! loop or call consumes them; one that reaches the top level is an error.
//!
//! Calls and user-defined infix operators run in a new frame that can see
//! the globals but not the caller's locals.

pub mod builtins;
mod calls;
pub mod engine;
pub mod errors;
mod expressions;
mod loops;
mod ops;
mod statements;

pub use builtins::{NativeFunction, OutputTerminal};
pub use engine::{ExecResult, Interpreter};
pub use errors::RuntimeError;
