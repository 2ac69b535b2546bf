//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a compilation run.
///
/// Unresolved references inside a structurally valid model (unknown action
/// step types, attributes missing from a class) are never errors; they are
/// emitted as disabled code instead.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Input file not found: {}", path.display())]
    #[diagnostic(code(xtuml::input::not_found))]
    InputNotFound {
        path: PathBuf,
    },

    #[error("Input path is not a file: {}", path.display())]
    #[diagnostic(code(xtuml::input::not_a_file))]
    InputNotAFile {
        path: PathBuf,
    },

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("I/O error on '{}': {message}", path.display())]
    #[diagnostic(code(xtuml::io::failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON content must not be empty")]
    #[diagnostic(code(xtuml::parse::empty_input))]
    EmptyInput,

    #[error("Malformed model JSON at line {line}, column {column}: {message}")]
    #[diagnostic(
        code(xtuml::parse::invalid_json),
        help("The model must be a JSON object with system_name, version and domains")
    )]
    InvalidJson {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Model must not be null")]
    #[diagnostic(code(xtuml::parse::null_model))]
    NullModel,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("System name must not be empty")]
    #[diagnostic(code(xtuml::validate::system_name))]
    MissingSystemName,

    #[error("Version must not be empty")]
    #[diagnostic(code(xtuml::validate::version))]
    MissingVersion,

    #[error("Model must have at least one domain")]
    #[diagnostic(
        code(xtuml::validate::no_domains),
        help("Add an entry to the top-level \"domains\" array")
    )]
    NoDomains,

    #[error("Domain #{index} has no name")]
    #[diagnostic(code(xtuml::validate::domain_name))]
    DomainWithoutName {
        /// 1-based position of the domain in the model.
        index: usize,
    },

    #[error("Domain '{domain}' has no key letter")]
    #[diagnostic(code(xtuml::validate::domain_key_letter))]
    DomainWithoutKeyLetter {
        domain: String,
    },

    #[error("Domain '{domain}' must have at least one class")]
    #[diagnostic(code(xtuml::validate::domain_classes))]
    DomainWithoutClasses {
        domain: String,
    },
}

/// Coarse classification used to pick a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The run could not start (missing or unusable input).
    Precondition,
    /// The model could not be parsed or is structurally incomplete.
    Validation,
    /// Reading the input or writing the output failed.
    Io,
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputNotFound { .. } | Self::InputNotAFile { .. } => ErrorKind::Precondition,
            Self::IoError { .. } => ErrorKind::Io,
            Self::EmptyInput
            | Self::InvalidJson { .. }
            | Self::NullModel
            | Self::MissingSystemName
            | Self::MissingVersion
            | Self::NoDomains
            | Self::DomainWithoutName { .. }
            | Self::DomainWithoutKeyLetter { .. }
            | Self::DomainWithoutClasses { .. } => ErrorKind::Validation,
        }
    }
}

impl From<serde_json::Error> for CompilerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CompilerError::InputNotFound { path: "model.json".into() }.kind(),
            ErrorKind::Precondition
        );
        assert_eq!(CompilerError::io("out", "denied").kind(), ErrorKind::Io);
        assert_eq!(CompilerError::NoDomains.kind(), ErrorKind::Validation);
        assert_eq!(CompilerError::EmptyInput.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_messages() {
        let err = CompilerError::DomainWithoutName { index: 2 };
        assert_eq!(err.to_string(), "Domain #2 has no name");

        let err = CompilerError::DomainWithoutClasses {
            domain: "Akademik".to_string(),
        };
        assert!(err.to_string().contains("Akademik"));
    }
}
