//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime values
//! in the C-- interpreter. Values are tagged; every variable keeps the type it was
//! declared with and only `int` to `double` widening happens implicitly.
//!
//! # Value Types
//!
//! - [`Value::Bool`]: `true` / `false`
//! - [`Value::Int`]: 32-bit signed integer
//! - [`Value::Double`]: 64-bit float
//! - [`Value::Str`]: owned string
//! - [`Value::Void`]: result of a `void` function; never stored in a variable

use crate::parser::ast::BasicType;
use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Double(f64),
    Str(String),
    #[default]
    Void,
}

impl Value {
    /// Zero value a declaration without initializer starts from
    pub fn default_for(ty: BasicType) -> Value {
        match ty {
            BasicType::Bool => Value::Bool(false),
            BasicType::Int => Value::Int(0),
            BasicType::Double => Value::Double(0.0),
            BasicType::String => Value::Str(String::new()),
            BasicType::Void => Value::Void,
        }
    }

    pub fn basic_type(&self) -> BasicType {
        match self {
            Value::Bool(_) => BasicType::Bool,
            Value::Int(_) => BasicType::Int,
            Value::Double(_) => BasicType::Double,
            Value::Str(_) => BasicType::String,
            Value::Void => BasicType::Void,
        }
    }

    /// Convert for storage in a `target` variable. Only `int` widens to
    /// `double`; any other mismatch yields `None`.
    pub fn coerce_to(self, target: BasicType) -> Option<Value> {
        match (self, target) {
            (Value::Int(n), BasicType::Double) => Some(Value::Double(f64::from(n))),
            (value, target) if value.basic_type() == target => Some(value),
            _ => None,
        }
    }

    /// Get the bool value, returns None if not a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value as a double, widening ints
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Expect a string value, returns error message if not a Str
    pub fn expect_str(&self) -> Result<&str, String> {
        self.as_str()
            .ok_or_else(|| format!("Expected string, got {}", self.basic_type()))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // Always shows a fractional part or exponent: 3.0, 0.5, 1e20
            Value::Double(d) => write!(f, "{:?}", d),
            Value::Str(s) => f.write_str(s),
            Value::Void => f.write_str("void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Value::default_for(BasicType::Int), Value::Int(0));
        assert_eq!(Value::default_for(BasicType::Double), Value::Double(0.0));
        assert_eq!(Value::default_for(BasicType::Bool), Value::Bool(false));
        assert_eq!(Value::default_for(BasicType::String), Value::Str(String::new()));
    }

    #[test]
    fn test_int_widens_to_double() {
        assert_eq!(Value::Int(3).coerce_to(BasicType::Double), Some(Value::Double(3.0)));
    }

    #[test]
    fn test_no_narrowing_or_cross_type_coercion() {
        assert_eq!(Value::Double(3.0).coerce_to(BasicType::Int), None);
        assert_eq!(Value::Bool(true).coerce_to(BasicType::Int), None);
        assert_eq!(Value::Int(1).coerce_to(BasicType::String), None);
        assert_eq!(Value::Void.coerce_to(BasicType::Int), None);
    }

    #[test]
    fn test_same_type_passes_through() {
        let value = Value::Str("x".to_string());
        assert_eq!(value.clone().coerce_to(BasicType::String), Some(value));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Double(3.0).to_string(), "3.0");
        assert_eq!(Value::Double(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "hi");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(5).as_number(), Some(5.0));
        assert_eq!(Value::Bool(true).as_number(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert!(Value::Int(1).expect_str().is_err());
        assert_eq!(Value::Str("a".into()).expect_str(), Ok("a"));
    }
}
