//! # xTUML Compiler
//!
//! This crate compiles an xTUML domain model, written as JSON, into
//! TypeScript: one interface/class pair per model class, with state
//! machines compiled into guarded transition methods, plus index files
//! re-exporting everything.
//!
//! ## Architecture
//!
//! ```text
//! Model (JSON)
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Loader    │  serde wire types → canonical model
//! │ (JSON → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Structural checks (fatal)
//! │   + Lint     │  Referential checks (warnings)
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Registry → class emitter → state machine
//! │  (IR → TS)   │  compiler → action interpreter → printer
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Write     │  <out>/<domain>/*.ts, <out>/index.ts
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xtuml_compiler::{Compiler, CompilerConfig, EmitMode};
//!
//! let config = CompilerConfig {
//!     input: "model.json".into(),
//!     out_dir: "output".into(),
//!     emit_mode: EmitMode::Merged,
//! };
//!
//! let result = Compiler::new(config).compile()?;
//! println!("{} files written", result.files_written);
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod registry;
pub mod validate;

use tracing::{info, warn};

pub use codegen::GeneratedCode;
pub use config::{CompilerConfig, EmitMode};
pub use diagnostic::{CompilerError, ErrorKind};
pub use model::Model;
pub use validate::LintWarning;

/// The main compiler struct that orchestrates the compilation pipeline.
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles the model file into TypeScript.
    ///
    /// This runs the full pipeline:
    /// 1. Load and structurally validate the model
    /// 2. Lint referential integrity (warnings only)
    /// 3. Generate TypeScript
    /// 4. Write output files
    pub fn compile(&self) -> Result<CompileResult, CompilerError> {
        // Phase 1: Load
        let model = loader::load_path(&self.config.input)?;

        // Phase 2: Lint
        let warnings = lint_and_log(&model);

        // Phase 3: Generate
        let generated = codegen::generate(&model, self.config.emit_mode);

        // Phase 4: Write output
        self.write_output(&generated)?;
        info!(
            files = generated.files.len(),
            out_dir = %self.config.out_dir.display(),
            "compilation finished"
        );

        Ok(CompileResult::new(&model, generated.files.len(), warnings))
    }

    /// Loads and validates the model without generating code.
    pub fn check(&self) -> Result<Vec<LintWarning>, CompilerError> {
        let model = loader::load_path(&self.config.input)?;
        Ok(lint_and_log(&model))
    }

    /// Writes generated code to the output directory.
    fn write_output(&self, generated: &GeneratedCode) -> Result<(), CompilerError> {
        std::fs::create_dir_all(&self.config.out_dir)
            .map_err(|e| CompilerError::io(&self.config.out_dir, e.to_string()))?;

        for (filename, content) in &generated.files {
            let path = self.config.out_dir.join(filename);
            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CompilerError::io(parent, e.to_string()))?;
            }
            std::fs::write(&path, content).map_err(|e| CompilerError::io(&path, e.to_string()))?;
        }

        Ok(())
    }
}

fn lint_and_log(model: &Model) -> Vec<LintWarning> {
    let warnings = validate::lint(model);
    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings
}

/// Loads a model from JSON text and generates its files in memory.
pub fn generate_from_str(json: &str, mode: EmitMode) -> Result<GeneratedCode, CompilerError> {
    let model = loader::load_str(json)?;
    Ok(codegen::generate(&model, mode))
}

/// Result of a successful compilation.
#[derive(Debug)]
pub struct CompileResult {
    pub system_name: String,
    pub version: String,
    /// Per-domain counts, in model order.
    pub domains: Vec<DomainSummary>,
    /// Number of files written, indexes included.
    pub files_written: usize,
    pub warnings: Vec<LintWarning>,
}

/// What was compiled for one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSummary {
    pub name: String,
    pub classes: usize,
    pub association_classes: usize,
    pub relationships: usize,
    pub state_machines: usize,
}

impl CompileResult {
    fn new(model: &Model, files_written: usize, warnings: Vec<LintWarning>) -> Self {
        let domains = model
            .domains
            .iter()
            .map(|domain| DomainSummary {
                name: domain.name.clone(),
                classes: domain.classes.len(),
                association_classes: domain.association_classes().len(),
                relationships: domain.relationships.len(),
                state_machines: domain.state_machine_count(),
            })
            .collect();

        Self {
            system_name: model.system_name.clone(),
            version: model.version.clone(),
            domains,
            files_written,
            warnings,
        }
    }

    /// Classes across all domains, association classes included.
    pub fn total_classes(&self) -> usize {
        self.domains
            .iter()
            .map(|d| d.classes + d.association_classes)
            .sum()
    }
}
