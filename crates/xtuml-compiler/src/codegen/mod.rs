//! TypeScript code generation from a validated model.
//!
//! Generators build a small syntax tree ([`ts_ast`]) which [`printer`]
//! renders. Every class becomes an interface/class pair; each domain gets
//! an `index.ts` and the output root gets one re-exporting all domains.

pub mod action;
pub mod class;
mod header;
pub mod module;
pub mod printer;
pub mod state_machine;
pub mod ts_ast;
pub mod ts_names;

use tracing::{debug, info};

use crate::config::EmitMode;
use crate::model::Model;
use crate::registry::ClassRegistry;

/// Generated TypeScript code.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCode {
    /// Relative path and content of each file, in emission order.
    pub files: Vec<(String, String)>,
}

impl GeneratedCode {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.as_str())
    }
}

/// Generates every file for the model. Pure: nothing touches the disk.
pub fn generate(model: &Model, mode: EmitMode) -> GeneratedCode {
    let registry = ClassRegistry::new(model);
    let mut files = Vec::new();

    for domain in &model.domains {
        let domain_files = module::assemble_domain(model, domain, &registry, mode);
        info!(
            domain = %domain.name,
            files = domain_files.len(),
            "domain generated"
        );
        files.extend(domain_files);
    }

    files.push(module::assemble_root_index(model));
    debug!(total = files.len(), ?mode, "generation finished");

    GeneratedCode { files }
}
