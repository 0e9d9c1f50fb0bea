//! Statement execution
//!
//! Each statement reports how it finished through [`ExecResult`]; blocks stop
//! at the first non-`Normal` result and hand it upwards. Loops consume
//! `Break`/`Continue`, calls consume `Return`.

use crate::interpreter::engine::{ExecResult, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::*;
use crate::runtime::value::Value;

impl Interpreter {
    pub(crate) fn execute_statement(
        &mut self,
        stmt: &Statement,
    ) -> Result<ExecResult, RuntimeError> {
        match stmt {
            Statement::Block(block) => self.execute_block(block),
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate_condition(condition)? {
                    self.execute_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_statement(else_branch)
                } else {
                    Ok(ExecResult::Normal)
                }
            }
            Statement::While {
                condition, body, ..
            } => self.execute_while(condition, body),
            Statement::For {
                init,
                condition,
                post,
                body,
                ..
            } => self.execute_for(init.as_ref(), condition.as_ref(), post.as_ref(), body),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };
                Ok(ExecResult::Return(value))
            }
            Statement::Break { .. } => Ok(ExecResult::Break),
            Statement::Continue { .. } => Ok(ExecResult::Continue),
            Statement::Expr { expr, .. } => {
                self.evaluate(expr)?;
                Ok(ExecResult::Normal)
            }
            Statement::DeclarationList {
                ty, declarations, ..
            } => {
                for declaration in declarations {
                    self.execute_declaration(*ty, declaration)?;
                }
                Ok(ExecResult::Normal)
            }
        }
    }

    /// Run statements in a fresh scope
    pub(crate) fn execute_block(&mut self, block: &Block) -> Result<ExecResult, RuntimeError> {
        self.env.push_scope();
        let result = self.execute_statements(&block.statements);
        self.env.pop_scope();
        result
    }

    fn execute_statements(&mut self, statements: &[Statement]) -> Result<ExecResult, RuntimeError> {
        for statement in statements {
            let result = self.execute_statement(statement)?;
            if result != ExecResult::Normal {
                return Ok(result);
            }
        }
        Ok(ExecResult::Normal)
    }

    fn execute_declaration(
        &mut self,
        ty: BasicType,
        declaration: &Declaration,
    ) -> Result<(), RuntimeError> {
        let name = &declaration.name;
        let location = declaration.location;

        if self.env.is_declared_in_current_scope(name) {
            return Err(RuntimeError::Redeclaration {
                name: name.clone(),
                location,
            });
        }
        if declaration.is_array() {
            return Err(RuntimeError::Unimplemented {
                feature: "array".to_string(),
                location,
            });
        }

        let value = match &declaration.initializer {
            Some(init) => {
                let value = self.evaluate(init)?;
                let got = value.basic_type();
                value
                    .coerce_to(ty)
                    .ok_or_else(|| RuntimeError::DeclarationTypeMismatch {
                        name: name.clone(),
                        declared: ty,
                        got,
                        location,
                    })?
            }
            None => Value::default_for(ty),
        };

        tracing::trace!(%name, %value, "declare");
        self.env.declare(name, value);
        Ok(())
    }

    /// Evaluate a loop or `if` condition, which must be a bool
    pub(crate) fn evaluate_condition(&mut self, condition: &Expression) -> Result<bool, RuntimeError> {
        let value = self.evaluate(condition)?;
        value.as_bool().ok_or_else(|| RuntimeError::NonBoolCondition {
            got: value.basic_type(),
            location: condition.location(),
        })
    }
}
