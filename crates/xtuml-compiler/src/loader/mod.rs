//! Model loading: JSON text or file → validated [`Model`].

mod wire;

use std::path::Path;

use tracing::{info, warn};

use crate::diagnostic::CompilerError;
use crate::model::Model;
use crate::validate;
use wire::WireModel;

/// Deserializes a model without validating it.
///
/// Absent optional collections become empty; `null` at the top level is
/// rejected.
pub fn parse_model(json: &str) -> Result<Model, CompilerError> {
    if json.trim().is_empty() {
        return Err(CompilerError::EmptyInput);
    }

    let wire: Option<WireModel> = serde_json::from_str(json)?;
    let wire = wire.ok_or(CompilerError::NullModel)?;
    Ok(wire.into_model())
}

/// Parses and structurally validates a model from JSON text.
pub fn load_str(json: &str) -> Result<Model, CompilerError> {
    let model = parse_model(json)?;
    validate::validate_model(&model)?;
    info!(system = %model.system_name, domains = model.domains.len(), "model loaded");
    Ok(model)
}

/// Reads, parses and validates a model file.
pub fn load_path(path: &Path) -> Result<Model, CompilerError> {
    if !path.exists() {
        return Err(CompilerError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(CompilerError::InputNotAFile {
            path: path.to_path_buf(),
        });
    }
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        warn!(path = %path.display(), "input file does not have a .json extension");
    }

    let json = std::fs::read_to_string(path)
        .map_err(|e| CompilerError::io(path, e.to_string()))?;
    load_str(&json)
}
