//! Compiler configuration.

use std::path::PathBuf;

/// How interfaces and classes are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Interface and class share one file per class.
    #[default]
    Merged,
    /// Interface in `i<name>.ts`, class in `<name>.ts`.
    Split,
}

/// Configuration for the xTUML compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Path of the JSON model.
    pub input: PathBuf,

    /// Directory to write generated TypeScript to.
    pub out_dir: PathBuf,

    pub emit_mode: EmitMode,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("model.json"),
            out_dir: PathBuf::from("./output"),
            emit_mode: EmitMode::Merged,
        }
    }
}
