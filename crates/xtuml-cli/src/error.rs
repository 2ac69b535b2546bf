//! CLI errors and their exit codes.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use xtuml_compiler::{CompilerError, ErrorKind};

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("input file not found: {}", path.display())]
    #[diagnostic(code(xtuml_ts::input_missing), help("Pass the path of an existing JSON model"))]
    InputMissing { path: PathBuf },

    #[error("input path is not a regular file: {}", path.display())]
    #[diagnostic(code(xtuml_ts::input_not_file))]
    InputNotAFile { path: PathBuf },

    #[error("output path exists but is not a directory: {}", path.display())]
    #[diagnostic(code(xtuml_ts::output_not_dir))]
    OutputNotADirectory { path: PathBuf },

    #[error("output directory is not empty: {}", path.display())]
    #[diagnostic(
        code(xtuml_ts::output_not_empty),
        help("Use --force to overwrite or --clean to empty it first")
    )]
    OutputNotEmpty { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompilerError),

    #[error("I/O error at {}: {message}", path.display())]
    #[diagnostic(code(xtuml_ts::io))]
    Io { path: PathBuf, message: String },

    #[error("unexpected failure: {0}")]
    #[diagnostic(code(xtuml_ts::unexpected))]
    Unexpected(String),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// 1 precondition, 2 parse/validation, 3 I/O, 4 anything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputMissing { .. }
            | Self::InputNotAFile { .. }
            | Self::OutputNotADirectory { .. }
            | Self::OutputNotEmpty { .. } => 1,
            Self::Compile(err) => match err.kind() {
                ErrorKind::Precondition => 1,
                ErrorKind::Validation => 2,
                ErrorKind::Io => 3,
            },
            Self::Io { .. } => 3,
            Self::Unexpected(_) => 4,
        }
    }
}
