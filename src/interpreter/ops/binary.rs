//! Built-in binary operator semantics on already evaluated operands
//!
//! - `+` with a string on either side concatenates the display forms
//! - Arithmetic stays in `int` when both sides are ints, otherwise both
//!   sides widen to `double`; int overflow and int division by zero are errors
//! - Comparisons accept two numbers or two strings; `==`/`!=` also two bools
//! - Logical operators take bools, bitwise operators and shifts take ints

use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{BinaryOperator, SourceLocation};
use crate::runtime::value::Value;
use std::cmp::Ordering;

pub(crate) fn binary_calc(
    op: BinaryOperator,
    left: Value,
    right: Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    use BinaryOperator::*;

    if left.is_void() || right.is_void() {
        return Err(invalid_operands(op, &left, &right, location));
    }

    match op {
        Add if left.is_string() || right.is_string() => Ok(Value::Str(format!("{left}{right}"))),
        Add | Sub | Mul | Div | Mod => arithmetic(op, &left, &right, location),
        Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
            compare(op, &left, &right, location)
        }
        LogicalAnd | LogicalOr => match (&left, &right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == LogicalAnd {
                *a && *b
            } else {
                *a || *b
            })),
            _ => Err(invalid_operands(op, &left, &right, location)),
        },
        BitwiseAnd | BitwiseOr | BitwiseXor | LeftShift | RightShift => {
            bitwise(op, &left, &right, location)
        }
        Assign | Index => Err(RuntimeError::Unimplemented {
            feature: format!("operator `{}' on values", op.symbol()),
            location,
        }),
    }
}

fn invalid_operands(
    op: BinaryOperator,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> RuntimeError {
    RuntimeError::InvalidOperands {
        operator: op.symbol(),
        left: left.basic_type(),
        right: right.basic_type(),
        location,
    }
}

fn arithmetic(
    op: BinaryOperator,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return int_arithmetic(op, *a, *b, location).map(Value::Int);
    }

    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(invalid_operands(op, left, right, location));
    };

    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => a / b,
        BinaryOperator::Mod => a % b,
        _ => return Err(invalid_operands(op, left, right, location)),
    };
    Ok(Value::Double(result))
}

fn int_arithmetic(
    op: BinaryOperator,
    a: i32,
    b: i32,
    location: SourceLocation,
) -> Result<i32, RuntimeError> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0 => {
            return Err(RuntimeError::DivisionByZero { location })
        }
        BinaryOperator::Div => a.checked_div(b),
        BinaryOperator::Mod => a.checked_rem(b),
        _ => None,
    };

    result.ok_or_else(|| RuntimeError::IntegerOverflow {
        operation: format!("{} {} {}", a, op.symbol(), b),
        location,
    })
}

fn compare(
    op: BinaryOperator,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b))
            if matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual) =>
        {
            Some(a.cmp(b))
        }
        _ => match (left.as_number(), right.as_number()) {
            // NaN compares unordered
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(invalid_operands(op, left, right, location)),
        },
    };

    let result = match op {
        BinaryOperator::Equal => ordering == Some(Ordering::Equal),
        BinaryOperator::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOperator::Less => ordering == Some(Ordering::Less),
        BinaryOperator::LessEqual => {
            matches!(ordering, Some(Ordering::Less | Ordering::Equal))
        }
        BinaryOperator::Greater => ordering == Some(Ordering::Greater),
        BinaryOperator::GreaterEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        }
        _ => return Err(invalid_operands(op, left, right, location)),
    };
    Ok(Value::Bool(result))
}

fn bitwise(
    op: BinaryOperator,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    let (Value::Int(a), Value::Int(b)) = (left, right) else {
        return Err(invalid_operands(op, left, right, location));
    };
    let (a, b) = (*a, *b);

    let result = match op {
        BinaryOperator::BitwiseAnd => a & b,
        BinaryOperator::BitwiseOr => a | b,
        BinaryOperator::BitwiseXor => a ^ b,
        BinaryOperator::LeftShift | BinaryOperator::RightShift => {
            let shifted = u32::try_from(b).ok().and_then(|amount| {
                if op == BinaryOperator::LeftShift {
                    a.checked_shl(amount)
                } else {
                    a.checked_shr(amount)
                }
            });
            shifted.ok_or(RuntimeError::ShiftOutOfRange { amount: b, location })?
        }
        _ => return Err(invalid_operands(op, left, right, location)),
    };
    Ok(Value::Int(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use BinaryOperator::*;

    fn calc(op: BinaryOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
        binary_calc(op, left, right, SourceLocation::default())
    }

    fn s(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(calc(Add, Value::Int(2), Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(calc(Div, Value::Int(7), Value::Int(2)), Ok(Value::Int(3)));
        assert_eq!(calc(Mod, Value::Int(-7), Value::Int(3)), Ok(Value::Int(-1)));
    }

    #[test]
    fn test_mixed_arithmetic_widens() {
        assert_eq!(calc(Add, Value::Int(1), Value::Double(0.5)), Ok(Value::Double(1.5)));
        assert_eq!(calc(Div, Value::Double(1.0), Value::Int(4)), Ok(Value::Double(0.25)));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(calc(Add, s("a"), Value::Int(1)), Ok(s("a1")));
        assert_eq!(calc(Add, Value::Double(2.0), s("x")), Ok(s("2.0x")));
        assert_eq!(calc(Add, s("ok: "), Value::Bool(true)), Ok(s("ok: true")));
        assert!(calc(Sub, s("a"), Value::Int(1)).is_err());
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            calc(Div, Value::Int(1), Value::Int(0)),
            Err(RuntimeError::DivisionByZero { .. })
        ));
        assert!(matches!(
            calc(Mod, Value::Int(1), Value::Int(0)),
            Err(RuntimeError::DivisionByZero { .. })
        ));
        assert_eq!(
            calc(Div, Value::Double(1.0), Value::Int(0)),
            Ok(Value::Double(f64::INFINITY))
        );
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            calc(Add, Value::Int(i32::MAX), Value::Int(1)),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
        assert!(matches!(
            calc(Div, Value::Int(i32::MIN), Value::Int(-1)),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(calc(Less, Value::Int(1), Value::Double(1.5)), Ok(Value::Bool(true)));
        assert_eq!(calc(GreaterEqual, s("b"), s("a")), Ok(Value::Bool(true)));
        assert_eq!(calc(Equal, Value::Bool(true), Value::Bool(true)), Ok(Value::Bool(true)));
        assert_eq!(calc(NotEqual, Value::Int(2), Value::Int(2)), Ok(Value::Bool(false)));
        assert!(calc(Less, Value::Bool(false), Value::Bool(true)).is_err());
        assert!(calc(Equal, s("1"), Value::Int(1)).is_err());
    }

    #[test]
    fn test_nan_is_unordered() {
        let nan = Value::Double(f64::NAN);
        assert_eq!(calc(Equal, nan.clone(), nan.clone()), Ok(Value::Bool(false)));
        assert_eq!(calc(NotEqual, nan.clone(), nan), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_logical_requires_bools() {
        assert_eq!(calc(LogicalAnd, Value::Bool(true), Value::Bool(false)), Ok(Value::Bool(false)));
        assert_eq!(calc(LogicalOr, Value::Bool(true), Value::Bool(false)), Ok(Value::Bool(true)));
        assert!(matches!(
            calc(LogicalAnd, Value::Int(1), Value::Bool(true)),
            Err(RuntimeError::InvalidOperands { operator: "&&", .. })
        ));
    }

    #[test]
    fn test_bitwise_and_shifts() {
        assert_eq!(calc(BitwiseAnd, Value::Int(6), Value::Int(3)), Ok(Value::Int(2)));
        assert_eq!(calc(BitwiseXor, Value::Int(6), Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(calc(LeftShift, Value::Int(1), Value::Int(4)), Ok(Value::Int(16)));
        assert_eq!(calc(RightShift, Value::Int(-16), Value::Int(2)), Ok(Value::Int(-4)));
        assert!(matches!(
            calc(LeftShift, Value::Int(1), Value::Int(32)),
            Err(RuntimeError::ShiftOutOfRange { amount: 32, .. })
        ));
        assert!(calc(RightShift, Value::Int(1), Value::Int(-1)).is_err());
    }

    #[test]
    fn test_void_operand_is_rejected() {
        assert!(matches!(
            calc(Add, s("x"), Value::Void),
            Err(RuntimeError::InvalidOperands { right: crate::parser::ast::BasicType::Void, .. })
        ));
    }
}
