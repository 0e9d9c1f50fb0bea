//! Indented tree rendering of a parsed [`Program`], used by `--dump-ast`

use crate::parser::ast::*;
use std::fmt::{self, Write};

const BRANCH: &str = "|-- ";
const LAST_BRANCH: &str = "`-- ";
const PIPE: &str = "|   ";
const SPACE: &str = "    ";

trait Dump {
    /// Write this node's own line, then its children indented under `prefix`.
    fn dump_into(&self, out: &mut String, prefix: &str) -> fmt::Result;
}

fn child(out: &mut String, prefix: &str, last: bool, node: &dyn Dump) -> fmt::Result {
    write!(out, "{prefix}{}", if last { LAST_BRANCH } else { BRANCH })?;
    let nested = format!("{prefix}{}", if last { SPACE } else { PIPE });
    node.dump_into(out, &nested)
}

fn children(out: &mut String, prefix: &str, nodes: &[&dyn Dump]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        child(out, prefix, i + 1 == nodes.len(), *node)?;
    }
    Ok(())
}

/// Leaf carrying fixed text, e.g. a missing `for` clause
struct Label(&'static str);

impl Dump for Label {
    fn dump_into(&self, out: &mut String, _prefix: &str) -> fmt::Result {
        writeln!(out, "{}", self.0)
    }
}

fn binary_name(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Add => "Add",
        BinaryOperator::Sub => "Sub",
        BinaryOperator::Mul => "Mul",
        BinaryOperator::Div => "Div",
        BinaryOperator::Mod => "Mod",
        BinaryOperator::LogicalAnd => "And",
        BinaryOperator::LogicalOr => "Or",
        BinaryOperator::BitwiseAnd => "BitAnd",
        BinaryOperator::BitwiseOr => "BitOr",
        BinaryOperator::BitwiseXor => "Xor",
        BinaryOperator::Index => "Index",
        other => other.symbol(),
    }
}

impl Dump for Expression {
    fn dump_into(&self, out: &mut String, prefix: &str) -> fmt::Result {
        match self {
            Expression::Int(n, _) => writeln!(out, "(int){n}"),
            Expression::Double(d, _) => writeln!(out, "(double){d:?}"),
            Expression::Bool(b, _) => writeln!(out, "(bool){b}"),
            Expression::Str(s, _) => writeln!(out, "(string){s:?}"),
            Expression::Identifier(name, _) => writeln!(out, "(Id){name}"),
            Expression::Call {
                callee,
                args,
                dynamic,
                ..
            } => {
                let marker = if *dynamic { "!" } else { "" };
                writeln!(out, "(call{marker}){callee}")?;
                let nodes: Vec<&dyn Dump> = args.iter().map(|a| a as &dyn Dump).collect();
                children(out, prefix, &nodes)
            }
            Expression::Binary { op, lhs, rhs, .. } => {
                writeln!(out, "{}", binary_name(*op))?;
                children(out, prefix, &[&**lhs, &**rhs])
            }
            Expression::Unary { op, operand, .. } => {
                writeln!(out, "({})", op.symbol())?;
                children(out, prefix, &[&**operand])
            }
            Expression::Infix {
                symbol, lhs, rhs, ..
            } => {
                writeln!(out, "(infix){symbol}")?;
                children(out, prefix, &[&**lhs, &**rhs])
            }
        }
    }
}

impl Dump for Declaration {
    fn dump_into(&self, out: &mut String, prefix: &str) -> fmt::Result {
        writeln!(out, "{}{}", self.name, "[]".repeat(self.dimensions.len()))?;
        let mut nodes: Vec<&dyn Dump> = self.dimensions.iter().map(|d| d as &dyn Dump).collect();
        if let Some(init) = &self.initializer {
            nodes.push(init);
        }
        children(out, prefix, &nodes)
    }
}

impl Dump for Option<Expression> {
    fn dump_into(&self, out: &mut String, prefix: &str) -> fmt::Result {
        match self {
            Some(expr) => expr.dump_into(out, prefix),
            None => Label("(none)").dump_into(out, prefix),
        }
    }
}

impl Dump for Statement {
    fn dump_into(&self, out: &mut String, prefix: &str) -> fmt::Result {
        match self {
            Statement::Block(block) => {
                writeln!(out, "Block")?;
                let nodes: Vec<&dyn Dump> =
                    block.statements.iter().map(|s| s as &dyn Dump).collect();
                children(out, prefix, &nodes)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                writeln!(out, "If")?;
                let mut nodes: Vec<&dyn Dump> = Vec::new();
                nodes.push(condition);
                nodes.push(&**then_branch);
                if let Some(else_branch) = else_branch {
                    nodes.push(&**else_branch);
                }
                children(out, prefix, &nodes)
            }
            Statement::While {
                condition, body, ..
            } => {
                writeln!(out, "While")?;
                children(out, prefix, &[condition, &**body])
            }
            Statement::For {
                init,
                condition,
                post,
                body,
                ..
            } => {
                writeln!(out, "For")?;
                children(out, prefix, &[init, condition, post, &**body])
            }
            Statement::Return { value, .. } => {
                writeln!(out, "Return")?;
                match value {
                    Some(value) => children(out, prefix, &[value]),
                    None => Ok(()),
                }
            }
            Statement::Break { .. } => writeln!(out, "Break"),
            Statement::Continue { .. } => writeln!(out, "Continue"),
            Statement::Expr { expr, .. } => {
                writeln!(out, "ExprStmt")?;
                children(out, prefix, &[expr])
            }
            Statement::DeclarationList {
                ty, declarations, ..
            } => {
                writeln!(out, "Declare {ty}")?;
                let nodes: Vec<&dyn Dump> =
                    declarations.iter().map(|d| d as &dyn Dump).collect();
                children(out, prefix, &nodes)
            }
        }
    }
}

impl Dump for FunctionDefinition {
    fn dump_into(&self, out: &mut String, prefix: &str) -> fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name).trim_end().to_string())
            .collect();
        writeln!(
            out,
            "Function {} {}({})",
            self.return_type,
            self.name,
            params.join(", ")
        )?;
        children(out, prefix, &[&self.body])
    }
}

impl Dump for InfixDefinition {
    fn dump_into(&self, out: &mut String, prefix: &str) -> fmt::Result {
        writeln!(
            out,
            "Infix {} {} {} (precedence {})",
            self.lhs, self.symbol, self.rhs, self.precedence
        )?;
        match &self.body {
            InfixBody::Expr(expr) => children(out, prefix, &[expr]),
            InfixBody::Statement(statement) => children(out, prefix, &[statement]),
        }
    }
}

fn render(node: &dyn Dump) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = node.dump_into(&mut out, "");
    out
}

impl Expression {
    pub fn dump(&self) -> String {
        render(self)
    }
}

impl Statement {
    pub fn dump(&self) -> String {
        render(self)
    }
}

impl Program {
    /// Function definitions, infix operators and top-level statements, each
    /// under its own banner.
    pub fn dump(&self) -> String {
        let mut out = String::new();

        if self.functions.is_empty() {
            out.push_str("Note: no user-defined function\n");
        } else {
            out.push_str("{---- Function definitions ----}\n");
            for function in self.functions.values() {
                out.push_str(&render(function));
                out.push('\n');
            }
        }
        out.push('\n');

        if self.infix_operators.is_empty() {
            out.push_str("Note: no user-defined infix operator\n");
        } else {
            out.push_str("{-----  Infix operators   -----}\n");
            for infix in self.infix_operators.values() {
                out.push_str(&render(infix));
                out.push('\n');
            }
        }
        out.push('\n');

        if self.statements.is_empty() {
            out.push_str("Note: statement list is empty\n");
        } else {
            out.push_str("{----  Statement list AST  ----}\n");
            for statement in &self.statements {
                out.push_str(&render(statement));
            }
        }

        out
    }
}
