// AST (Abstract Syntax Tree) definitions for the C-- interpreter

use std::collections::BTreeMap;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Basic types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicType {
    Bool,
    Int,
    Double,
    String,
    Void,
}

impl BasicType {
    pub fn name(&self) -> &'static str {
        match self {
            BasicType::Bool => "bool",
            BasicType::Int => "int",
            BasicType::Double => "double",
            BasicType::String => "string",
            BasicType::Void => "void",
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Assign,
    // Logical
    LogicalOr,
    LogicalAnd,
    // Bitwise
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    // Comparison
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    // Shift
    LeftShift,
    RightShift,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // `a[i]`, recognised by the parser only
    Index,
}

impl BinaryOperator {
    /// Source text of the operator, also its key in the precedence table.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Assign => "=",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Index => "[]",
        }
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,       // +x
    Minus,      // -x
    LogicalNot, // !x
    BitwiseNot, // ~x
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
        }
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Int(i32, SourceLocation),
    Double(f64, SourceLocation),
    Bool(bool, SourceLocation),
    Str(String, SourceLocation),
    Identifier(String, SourceLocation),
    Call {
        callee: String,
        args: Vec<Expression>,
        /// Written as `name!(...)`.
        dynamic: bool,
        location: SourceLocation,
    },
    Binary {
        op: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        location: SourceLocation,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
        location: SourceLocation,
    },
    /// Application of a user-declared infix operator.
    Infix {
        symbol: String,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        location: SourceLocation,
    },
}

impl Expression {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Int(_, loc)
            | Expression::Double(_, loc)
            | Expression::Bool(_, loc)
            | Expression::Str(_, loc)
            | Expression::Identifier(_, loc) => *loc,
            Expression::Call { location, .. }
            | Expression::Binary { location, .. }
            | Expression::Unary { location, .. }
            | Expression::Infix { location, .. } => *location,
        }
    }
}

/// `{ ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

/// One name inside a declaration list: `x`, `x = 1`, `arr[10]`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub initializer: Option<Expression>,
    pub dimensions: Vec<Expression>,
    pub location: SourceLocation,
}

impl Declaration {
    pub fn is_array(&self) -> bool {
        !self.dimensions.is_empty()
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        location: SourceLocation,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
        location: SourceLocation,
    },
    For {
        init: Option<Expression>,
        condition: Option<Expression>,
        post: Option<Expression>,
        body: Box<Statement>,
        location: SourceLocation,
    },
    Return {
        value: Option<Expression>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    Expr {
        expr: Expression,
        location: SourceLocation,
    },
    DeclarationList {
        ty: BasicType,
        declarations: Vec<Declaration>,
        location: SourceLocation,
    },
}

impl Statement {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Block(block) => block.location,
            Statement::If { location, .. }
            | Statement::While { location, .. }
            | Statement::For { location, .. }
            | Statement::Return { location, .. }
            | Statement::Break { location }
            | Statement::Continue { location }
            | Statement::Expr { location, .. }
            | Statement::DeclarationList { location, .. } => *location,
        }
    }

    /// An empty block, standing in for `;` where a statement is required.
    pub fn empty(location: SourceLocation) -> Self {
        Statement::Block(Block {
            statements: Vec::new(),
            location,
        })
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: BasicType,
    pub location: SourceLocation,
}

/// `type name(params) statement`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub return_type: BasicType,
    pub params: Vec<Parameter>,
    pub body: Statement,
    pub location: SourceLocation,
}

/// Body of an infix operator: `= expr;` or any statement that returns a value
#[derive(Debug, Clone, PartialEq)]
pub enum InfixBody {
    Expr(Expression),
    Statement(Statement),
}

/// `infix [precedence] lhs SYMBOL rhs body`
#[derive(Debug, Clone, PartialEq)]
pub struct InfixDefinition {
    pub symbol: String,
    pub lhs: String,
    pub rhs: String,
    pub precedence: u8,
    pub body: InfixBody,
    pub location: SourceLocation,
}

/// Everything the parser produces for one source unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub functions: BTreeMap<String, FunctionDefinition>,
    pub infix_operators: BTreeMap<String, InfixDefinition>,
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
