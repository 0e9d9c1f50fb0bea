//! Built-in function implementations
//!
//! Native functions are plain Rust functions looked up by name when a call
//! does not match a user-defined function. Embedders can add their own with
//! [`Interpreter::register_native`](crate::interpreter::engine::Interpreter::register_native).
//!
//! # Supported Built-ins
//!
//! - `print(args...)`: writes every argument, no separator, no newline
//! - `println(args...)`: like `print`, followed by a newline
//! - `system(command)`: runs `command` through the platform shell and
//!   returns its exit status as an `int`
//!
//! Built-ins return `void` unless stated otherwise.

use crate::runtime::value::Value;
use rustc_hash::FxHashMap;
use std::io::{self, Write};
use std::process::Command;

/// Signature shared by every native function
pub type NativeFunction = fn(&mut OutputTerminal, &[Value]) -> Result<Value, String>;

/// Destination of program output: echoed to stdout, captured, or both
#[derive(Debug, Clone, Default)]
pub struct OutputTerminal {
    echo: bool,
    buffer: String,
}

impl OutputTerminal {
    /// Writes straight through to the process's stdout
    pub fn stdout() -> Self {
        OutputTerminal {
            echo: true,
            buffer: String::new(),
        }
    }

    /// Keeps output in memory for later inspection
    pub fn captured() -> Self {
        OutputTerminal::default()
    }

    pub fn is_capturing(&self) -> bool {
        !self.echo
    }

    /// Print without newline
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        if self.echo {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        } else {
            self.buffer.push_str(text);
        }
        Ok(())
    }

    /// Everything captured so far
    pub fn output(&self) -> &str {
        &self.buffer
    }
}

pub(crate) fn native_functions() -> FxHashMap<String, NativeFunction> {
    let mut natives: FxHashMap<String, NativeFunction> = FxHashMap::default();
    natives.insert("print".to_string(), native_print);
    natives.insert("println".to_string(), native_println);
    natives.insert("system".to_string(), native_system);
    natives
}

fn concat(args: &[Value]) -> String {
    args.iter().map(Value::to_string).collect()
}

fn native_print(terminal: &mut OutputTerminal, args: &[Value]) -> Result<Value, String> {
    terminal.print(&concat(args)).map_err(|e| e.to_string())?;
    Ok(Value::Void)
}

fn native_println(terminal: &mut OutputTerminal, args: &[Value]) -> Result<Value, String> {
    let mut line = concat(args);
    line.push('\n');
    terminal.print(&line).map_err(|e| e.to_string())?;
    Ok(Value::Void)
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

fn native_system(terminal: &mut OutputTerminal, args: &[Value]) -> Result<Value, String> {
    let [command] = args else {
        return Err(format!("expects 1 argument, {} provided", args.len()));
    };
    let command = command.expect_str()?;
    tracing::debug!(%command, "running shell command");

    let status = if terminal.is_capturing() {
        let output = shell(command).output().map_err(|e| e.to_string())?;
        terminal
            .print(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| e.to_string())?;
        output.status
    } else {
        shell(command).status().map_err(|e| e.to_string())?
    };

    // Killed by a signal: no exit code
    Ok(Value::Int(status.code().unwrap_or(-1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_concatenates_without_separator() {
        let mut terminal = OutputTerminal::captured();
        native_print(
            &mut terminal,
            &[Value::Str("x = ".into()), Value::Int(3), Value::Double(1.5)],
        )
        .unwrap();
        assert_eq!(terminal.output(), "x = 31.5");
    }

    #[test]
    fn test_println_appends_newline() {
        let mut terminal = OutputTerminal::captured();
        native_println(&mut terminal, &[Value::Bool(true)]).unwrap();
        native_println(&mut terminal, &[]).unwrap();
        assert_eq!(terminal.output(), "true\n\n");
    }

    #[test]
    fn test_system_rejects_non_string() {
        let mut terminal = OutputTerminal::captured();
        assert!(native_system(&mut terminal, &[Value::Int(1)]).is_err());
        assert!(native_system(&mut terminal, &[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_returns_exit_status() {
        let mut terminal = OutputTerminal::captured();
        let status = native_system(&mut terminal, &[Value::Str("echo hi; exit 3".into())]).unwrap();
        assert_eq!(status, Value::Int(3));
        assert_eq!(terminal.output(), "hi\n");
    }

    #[test]
    fn test_registry_contents() {
        let natives = native_functions();
        assert!(natives.contains_key("print"));
        assert!(natives.contains_key("println"));
        assert!(natives.contains_key("system"));
    }
}
