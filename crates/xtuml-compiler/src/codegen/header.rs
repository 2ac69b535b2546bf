//! Leading block comments of generated files.
//!
//! Headers only contain model data, so output stays byte-identical
//! between runs.

use crate::model::{ClassDefinition, Domain, Model};

const GENERATED_NOTICE: &str = "Generated by xtuml-ts. Do not edit by hand.";

fn system_line(model: &Model) -> String {
    format!("System: {} v{}", model.system_name, model.version)
}

fn domain_line(domain: &Domain) -> String {
    format!("Domain: {} ({})", domain.name, domain.key_letter)
}

fn class_line(label: &str, class: &ClassDefinition) -> String {
    match &class.key_letter {
        Some(key_letter) => format!(
            "{}: {} ({}), {}",
            label,
            class.name,
            key_letter,
            class.kind.as_str()
        ),
        None => format!("{}: {}, {}", label, class.name, class.kind.as_str()),
    }
}

/// Header of the root `index.ts`.
pub fn root_index(model: &Model) -> Vec<String> {
    let mut lines = vec![system_line(model)];
    lines.push(format!("Domains: {}", model.domains.len()));
    lines.push(String::new());
    lines.push(GENERATED_NOTICE.to_string());
    lines
}

/// Header of a domain `index.ts`, listing its relationships.
pub fn domain_index(model: &Model, domain: &Domain) -> Vec<String> {
    let mut lines = vec![system_line(model), domain_line(domain)];

    if !domain.relationships.is_empty() {
        lines.push(String::new());
        lines.push("Relationships:".to_string());
        for rel in &domain.relationships {
            match rel.description.as_deref().filter(|d| !d.trim().is_empty()) {
                Some(description) => lines.push(format!("  {}: {}", rel.id, description.trim())),
                None => lines.push(format!("  {}", rel.id)),
            }
        }
    }

    lines.push(String::new());
    lines.push(GENERATED_NOTICE.to_string());
    lines
}

/// Header of a file holding a class (and, when merged, its interface).
pub fn class_file(model: &Model, domain: &Domain, class: &ClassDefinition) -> Vec<String> {
    vec![
        system_line(model),
        domain_line(domain),
        class_line("Class", class),
        String::new(),
        GENERATED_NOTICE.to_string(),
    ]
}

/// Header of a split-mode interface file.
pub fn interface_file(model: &Model, domain: &Domain, class: &ClassDefinition) -> Vec<String> {
    vec![
        system_line(model),
        domain_line(domain),
        class_line("Interface of", class),
        String::new(),
        GENERATED_NOTICE.to_string(),
    ]
}
