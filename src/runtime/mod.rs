//! Runtime state for the C-- interpreter
//!
//! - [`value`]: Tagged runtime values (`bool`, `int`, `double`, `string`, `void`)
//! - [`environment`]: Global scope, call frames and block scopes

pub mod environment;
pub mod value;

pub use environment::Environment;
pub use value::Value;
