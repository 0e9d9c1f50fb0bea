//! Loop statement execution (`while`, `for`).
//!
//! Adds `impl Interpreter` methods for the two loop forms. The body's
//! [`ExecResult`] is folded into a [`LoopBodyResult`] so the loop driver can
//! react without matching on every control-flow case itself.
//!
//! `return` inside a loop body ends the loop and is passed on unchanged to
//! the enclosing call.

use crate::interpreter::engine::{ExecResult, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expression, Statement};

/// Result returned by [`Interpreter::execute_loop_body`] to signal how the body ended.
pub(crate) enum LoopBodyResult {
    /// Body completed normally or via `continue`; the loop should iterate again.
    Continue,
    /// `break` was encountered; the loop should exit cleanly.
    Break,
    /// `return` was executed; the loop unwinds and hands this result upwards.
    Exit(ExecResult),
}

impl Interpreter {
    pub(crate) fn execute_loop_body(
        &mut self,
        body: &Statement,
    ) -> Result<LoopBodyResult, RuntimeError> {
        Ok(match self.execute_statement(body)? {
            ExecResult::Normal | ExecResult::Continue => LoopBodyResult::Continue,
            ExecResult::Break => LoopBodyResult::Break,
            ret @ ExecResult::Return(_) => LoopBodyResult::Exit(ret),
        })
    }

    /// Executes a `while (condition) body` loop.
    pub(crate) fn execute_while(
        &mut self,
        condition: &Expression,
        body: &Statement,
    ) -> Result<ExecResult, RuntimeError> {
        while self.evaluate_condition(condition)? {
            match self.execute_loop_body(body)? {
                LoopBodyResult::Continue => {}
                LoopBodyResult::Break => break,
                LoopBodyResult::Exit(result) => return Ok(result),
            }
        }
        Ok(ExecResult::Normal)
    }

    /// Executes a `for (init; condition; post) body` loop. A missing
    /// condition loops until `break` or `return`.
    pub(crate) fn execute_for(
        &mut self,
        init: Option<&Expression>,
        condition: Option<&Expression>,
        post: Option<&Expression>,
        body: &Statement,
    ) -> Result<ExecResult, RuntimeError> {
        if let Some(init) = init {
            self.evaluate(init)?;
        }

        loop {
            if let Some(condition) = condition {
                if !self.evaluate_condition(condition)? {
                    break;
                }
            }

            match self.execute_loop_body(body)? {
                LoopBodyResult::Continue => {}
                LoopBodyResult::Break => break,
                LoopBodyResult::Exit(result) => return Ok(result),
            }

            if let Some(post) = post {
                self.evaluate(post)?;
            }
        }

        Ok(ExecResult::Normal)
    }
}
