//! Validation of a loaded model.

mod lint;
mod structure;

pub use lint::{lint, LintWarning};

use crate::diagnostic::CompilerError;
use crate::model::Model;

/// Validates the structure of the model, failing on the first violation.
pub fn validate_model(model: &Model) -> Result<(), CompilerError> {
    structure::validate_structure(model)
}
