//! Command-line options for the `cmm` binary

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub path: PathBuf,
    /// Print the parsed tree before running
    pub dump_ast: bool,
    /// Stop after parsing
    pub parse_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("no input file provided")]
    MissingInput,
    #[error("unknown option `{0}'")]
    UnknownOption(String),
    #[error("unexpected argument `{0}'")]
    ExtraArgument(String),
    #[error("help requested")]
    HelpRequested,
}

impl Options {
    /// Parse the arguments that follow the program name.
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut dump_ast = false;
        let mut parse_only = false;

        for arg in args {
            match arg.as_str() {
                "--dump-ast" => dump_ast = true,
                "--parse-only" => parse_only = true,
                "-h" | "--help" => return Err(UsageError::HelpRequested),
                flag if flag.starts_with('-') && flag != "-" => {
                    return Err(UsageError::UnknownOption(arg));
                }
                _ if path.is_some() => return Err(UsageError::ExtraArgument(arg)),
                _ => path = Some(PathBuf::from(arg)),
            }
        }

        Ok(Options {
            path: path.ok_or(UsageError::MissingInput)?,
            dump_ast,
            parse_only,
        })
    }
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--dump-ast] [--parse-only] <file.cmm>\n\
         \n\
         Options:\n\
         \x20 --dump-ast    print the syntax tree before running\n\
         \x20 --parse-only  stop after parsing\n\
         \x20 -h, --help    show this message\n\
         \n\
         Set CMM_LOG (e.g. CMM_LOG=debug) to enable interpreter logging."
    )
}
