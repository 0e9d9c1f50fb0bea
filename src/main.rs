// cmm: run a C-- script

use std::fs;
use std::process::ExitCode;

use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use cmm::cli::{usage, Options, UsageError};
use cmm::diagnostics::{Diagnostic, Severity};
use cmm::interpreter::Interpreter;
use cmm::parser::Parser;
use cmm::CmmError;

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "cmm".to_string());

    let options = match Options::parse(args) {
        Ok(options) => options,
        Err(UsageError::HelpRequested) => {
            println!("{}", usage(&program_name));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            eprintln!();
            eprintln!("{}", usage(&program_name));
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let label = match &e {
                CmmError::Runtime(_) => "Runtime Error:",
                CmmError::Parse(_) | CmmError::Io { .. } => "Error:",
            };
            eprintln!("{} {}", label.red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `CMM_LOG` (errors only by default)
fn init_logging() {
    let filter = EnvFilter::try_from_env("CMM_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(options: &Options) -> Result<(), CmmError> {
    let source = fs::read_to_string(&options.path).map_err(|source| CmmError::Io {
        path: options.path.clone(),
        source,
    })?;

    let mut parser = Parser::new(&source);
    let parsed = parser.parse_program();
    for warning in parser.diagnostics().warnings() {
        report(warning);
    }
    let program = parsed?;

    if options.dump_ast {
        print!("{}", program.dump());
    }
    if options.parse_only {
        return Ok(());
    }

    let mut interpreter = Interpreter::new(program);
    interpreter.run()?;
    Ok(())
}

fn report(diagnostic: &Diagnostic) {
    let text = diagnostic.to_string();
    match diagnostic.severity {
        Severity::Warning => eprintln!("{}", text.yellow()),
        Severity::Error => eprintln!("{}", text.red()),
    }
}
