//! Variable storage for a running program
//!
//! - [`Environment`]: global scope plus a stack of call frames
//! - [`StackFrame`]: one activation, holding a stack of block scopes
//!
//! # Lookup
//!
//! A name resolves against the current frame's scopes from innermost to
//! outermost, then against the globals. Frames below the current one are not
//! visible, so a callee sees its own parameters and locals plus globals only.
//!
//! The bottom frame belongs to top-level code and starts with no scopes, so
//! top-level declarations land in the globals.

use super::value::Value;
use rustc_hash::FxHashMap;

pub type Scope = FxHashMap<String, Value>;

/// Stack frame for a function or infix operator invocation
#[derive(Debug, Clone)]
pub struct StackFrame {
    pub function_name: String,
    scopes: Vec<Scope>,
}

impl StackFrame {
    fn new(function_name: String, scopes: Vec<Scope>) -> Self {
        StackFrame {
            function_name,
            scopes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Environment {
    globals: Scope,
    frames: Vec<StackFrame>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            globals: Scope::default(),
            frames: vec![StackFrame::new("<top-level>".to_string(), Vec::new())],
        }
    }

    /// Enter a block
    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.scopes.push(Scope::default());
        }
        tracing::trace!(depth = self.scope_depth(), "push scope");
    }

    /// Leave a block, dropping its variables
    pub fn pop_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.scopes.pop();
        }
        tracing::trace!(depth = self.scope_depth(), "pop scope");
    }

    /// Start a call with one empty scope for the parameters
    pub fn push_frame(&mut self, function_name: &str) {
        self.frames
            .push(StackFrame::new(function_name.to_string(), vec![Scope::default()]));
    }

    pub fn pop_frame(&mut self) {
        // The top-level frame stays for the lifetime of the environment
        if self.frames.len() > 1 {
            if let Some(frame) = self.frames.pop() {
                tracing::trace!(function = %frame.function_name, "pop frame");
            }
        }
    }

    /// Whether `name` already exists in the scope a declaration would use
    pub fn is_declared_in_current_scope(&self, name: &str) -> bool {
        match self.frames.last().and_then(|f| f.scopes.last()) {
            Some(scope) => scope.contains_key(name),
            None => self.globals.contains_key(name),
        }
    }

    /// Bind `name` in the innermost scope, replacing any existing binding there
    pub fn declare(&mut self, name: &str, value: Value) {
        self.innermost_mut().insert(name.to_string(), value);
    }

    /// Get a variable, searching outwards from the innermost scope
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.frames
            .last()
            .and_then(|frame| frame.scopes.iter().rev().find_map(|s| s.get(name)))
            .or_else(|| self.globals.get(name))
    }

    /// Get a mutable reference to a variable
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Value> {
        let Environment { globals, frames } = self;
        if let Some(frame) = frames.last_mut() {
            for scope in frame.scopes.iter_mut().rev() {
                if let Some(value) = scope.get_mut(name) {
                    return Some(value);
                }
            }
        }
        globals.get_mut(name)
    }

    pub fn globals(&self) -> &Scope {
        &self.globals
    }

    /// Number of active calls, not counting top-level code
    pub fn call_depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    fn scope_depth(&self) -> usize {
        self.frames.last().map_or(0, |f| f.scopes.len())
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        let Environment { globals, frames } = self;
        match frames.last_mut().and_then(|f| f.scopes.last_mut()) {
            Some(scope) => scope,
            None => globals,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_declares_globals() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(1));
        assert_eq!(env.globals().get("x"), Some(&Value::Int(1)));
        assert!(env.is_declared_in_current_scope("x"));
    }

    #[test]
    fn test_block_scope_shadows_and_restores() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(1));

        env.push_scope();
        assert!(!env.is_declared_in_current_scope("x"));
        env.declare("x", Value::Int(2));
        assert_eq!(env.lookup("x"), Some(&Value::Int(2)));
        env.pop_scope();

        assert_eq!(env.lookup("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_assignment_through_lookup_mut_hits_outer_scope() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(1));
        env.push_scope();
        *env.lookup_mut("x").unwrap() = Value::Int(5);
        env.pop_scope();
        assert_eq!(env.lookup("x"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_callee_sees_globals_but_not_caller_locals() {
        let mut env = Environment::new();
        env.declare("g", Value::Int(1));
        env.push_scope();
        env.declare("local", Value::Int(2));

        env.push_frame("f");
        assert_eq!(env.call_depth(), 1);
        assert_eq!(env.lookup("g"), Some(&Value::Int(1)));
        assert_eq!(env.lookup("local"), None);
        env.declare("param", Value::Int(3));
        env.pop_frame();

        assert_eq!(env.lookup("local"), Some(&Value::Int(2)));
        assert_eq!(env.lookup("param"), None);
        assert_eq!(env.call_depth(), 0);
    }

    #[test]
    fn test_top_level_frame_is_never_popped() {
        let mut env = Environment::new();
        env.pop_frame();
        env.push_scope();
        env.declare("x", Value::Bool(true));
        assert_eq!(env.lookup("x"), Some(&Value::Bool(true)));
        assert!(env.globals().is_empty());
    }
}
