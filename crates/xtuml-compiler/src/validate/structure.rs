//! Structure validation for models.
//!
//! Checks run in a fixed order and stop at the first failure:
//! system name, version, domain list, then each domain's name, key letter
//! and class list. References between classes and states are not checked
//! here; see the lint pass.

use crate::diagnostic::CompilerError;
use crate::model::{Domain, Model};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Validates the structure of the model.
pub fn validate_structure(model: &Model) -> Result<(), CompilerError> {
    if is_blank(&model.system_name) {
        return Err(CompilerError::MissingSystemName);
    }
    if is_blank(&model.version) {
        return Err(CompilerError::MissingVersion);
    }
    if model.domains.is_empty() {
        return Err(CompilerError::NoDomains);
    }

    for (i, domain) in model.domains.iter().enumerate() {
        validate_domain(i + 1, domain)?;
    }

    Ok(())
}

fn validate_domain(index: usize, domain: &Domain) -> Result<(), CompilerError> {
    if is_blank(&domain.name) {
        return Err(CompilerError::DomainWithoutName { index });
    }
    if is_blank(&domain.key_letter) {
        return Err(CompilerError::DomainWithoutKeyLetter {
            domain: domain.name.clone(),
        });
    }
    if domain.classes.is_empty() {
        return Err(CompilerError::DomainWithoutClasses {
            domain: domain.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassDefinition;

    fn domain(name: &str, key_letter: &str, classes: usize) -> Domain {
        Domain {
            name: name.to_string(),
            key_letter: key_letter.to_string(),
            classes: (0..classes)
                .map(|i| ClassDefinition {
                    name: format!("C{i}"),
                    ..Default::default()
                })
                .collect(),
            relationships: Vec::new(),
        }
    }

    fn model(system_name: &str, version: &str, domains: Vec<Domain>) -> Model {
        Model {
            system_name: system_name.to_string(),
            version: version.to_string(),
            domains,
        }
    }

    #[test]
    fn test_valid_model() {
        let m = model("Sys", "1.0", vec![domain("Akademik", "AK", 1)]);
        assert!(validate_structure(&m).is_ok());
    }

    #[test]
    fn test_blank_system_name() {
        let m = model("  ", "1.0", vec![domain("Akademik", "AK", 1)]);
        assert!(matches!(
            validate_structure(&m),
            Err(CompilerError::MissingSystemName)
        ));
    }

    #[test]
    fn test_checks_run_in_order() {
        // Both version and domains are wrong; version is reported first.
        let m = model("Sys", "", vec![]);
        assert!(matches!(
            validate_structure(&m),
            Err(CompilerError::MissingVersion)
        ));

        let m = model("Sys", "1", vec![]);
        assert!(matches!(validate_structure(&m), Err(CompilerError::NoDomains)));
    }

    #[test]
    fn test_domain_checks() {
        let m = model("Sys", "1", vec![domain("A", "A", 1), domain("", "B", 1)]);
        assert!(matches!(
            validate_structure(&m),
            Err(CompilerError::DomainWithoutName { index: 2 })
        ));

        let m = model("Sys", "1", vec![domain("A", " ", 1)]);
        assert!(matches!(
            validate_structure(&m),
            Err(CompilerError::DomainWithoutKeyLetter { .. })
        ));

        let m = model("Sys", "1", vec![domain("A", "A", 0)]);
        assert!(matches!(
            validate_structure(&m),
            Err(CompilerError::DomainWithoutClasses { .. })
        ));
    }
}
