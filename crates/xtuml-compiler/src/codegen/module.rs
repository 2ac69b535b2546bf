//! Module assembler: per-class files and the index files that re-export them.

use tracing::debug;

use super::action::ClassContext;
use super::class::{build_class, build_interface};
use super::header;
use super::printer::print_module;
use super::ts_ast::{Import, Item, TsModule};
use super::ts_names::{to_camel_case, to_file_stem, to_interface_name, to_pascal_case, SOURCE_EXTENSION};
use crate::config::EmitMode;
use crate::model::{ClassDefinition, Domain, Model};
use crate::registry::ClassRegistry;

const INDEX_STEM: &str = "index";

/// Directory a domain's files are written to.
pub fn domain_dir(domain: &Domain) -> String {
    to_camel_case(&domain.name)
}

fn class_stem(name: &str) -> String {
    to_file_stem(&to_pascal_case(name))
}

fn interface_stem(name: &str) -> String {
    to_file_stem(&to_interface_name(name))
}

fn file_path(dir: &str, stem: &str) -> String {
    format!("{}/{}{}", dir, stem, SOURCE_EXTENSION)
}

/// Module specifier of `stem` in the parent's domain, as seen from `domain`.
fn sibling_module(
    registry: &ClassRegistry<'_>,
    domain: &Domain,
    parent: &str,
    stem: &str,
) -> String {
    match registry.domain_of(parent) {
        Some(parent_domain) if parent_domain.name != domain.name => {
            format!("../{}/{}", domain_dir(parent_domain), stem)
        }
        _ => format!("./{}", stem),
    }
}

/// All files of one domain, index last. Paths are relative to the output root.
pub fn assemble_domain(
    model: &Model,
    domain: &Domain,
    registry: &ClassRegistry<'_>,
    mode: EmitMode,
) -> Vec<(String, String)> {
    let dir = domain_dir(domain);
    let association_classes = domain.association_classes();
    let mut files = Vec::new();
    let mut exports = Vec::new();

    for class in domain.classes.iter().chain(association_classes.iter()) {
        let ctx = ClassContext::new(class, registry);
        let emitted = match mode {
            EmitMode::Merged => merged_class_file(model, domain, &ctx),
            EmitMode::Split => split_class_files(model, domain, &ctx),
        };
        for file in emitted {
            debug!(path = %file_path(&dir, &file.stem), "generated");
            exports.push(Item::ExportNamed {
                names: file.exports,
                from: format!("./{}", file.stem),
            });
            files.push((file_path(&dir, &file.stem), print_module(&file.module)));
        }
    }

    let index = TsModule {
        header: header::domain_index(model, domain),
        imports: Vec::new(),
        items: exports,
    };
    files.push((file_path(&dir, INDEX_STEM), print_module(&index)));
    files
}

/// The root `index.ts` re-exporting every domain.
pub fn assemble_root_index(model: &Model) -> (String, String) {
    let index = TsModule {
        header: header::root_index(model),
        imports: Vec::new(),
        items: model
            .domains
            .iter()
            .map(|domain| Item::ExportAll {
                from: format!("./{}", domain_dir(domain)),
            })
            .collect(),
    };
    (
        format!("{}{}", INDEX_STEM, SOURCE_EXTENSION),
        print_module(&index),
    )
}

/// A generated file before it gets a directory.
struct EmittedFile {
    stem: String,
    exports: Vec<String>,
    module: TsModule,
}

fn merged_class_file(model: &Model, domain: &Domain, ctx: &ClassContext<'_>) -> Vec<EmittedFile> {
    let class = ctx.class;
    let imports = class
        .inherits_from
        .as_deref()
        .map(|parent| Import {
            names: vec![to_interface_name(parent), to_pascal_case(parent)],
            from: sibling_module(ctx.registry, domain, parent, &class_stem(parent)),
        })
        .into_iter()
        .collect();

    vec![EmittedFile {
        stem: class_stem(&class.name),
        exports: declared_names(class),
        module: TsModule {
            header: header::class_file(model, domain, class),
            imports,
            items: vec![
                Item::Interface(build_interface(ctx)),
                Item::Class(build_class(ctx)),
            ],
        },
    }]
}

fn split_class_files(model: &Model, domain: &Domain, ctx: &ClassContext<'_>) -> Vec<EmittedFile> {
    let class = ctx.class;
    let interface_name = to_interface_name(&class.name);
    let parent = class.inherits_from.as_deref();

    let interface_imports = parent
        .map(|parent| Import {
            names: vec![to_interface_name(parent)],
            from: sibling_module(ctx.registry, domain, parent, &interface_stem(parent)),
        })
        .into_iter()
        .collect();

    let mut class_imports = vec![Import {
        names: vec![interface_name.clone()],
        from: format!("./{}", interface_stem(&class.name)),
    }];
    if let Some(parent) = parent {
        class_imports.push(Import {
            names: vec![to_pascal_case(parent)],
            from: sibling_module(ctx.registry, domain, parent, &class_stem(parent)),
        });
    }

    vec![
        EmittedFile {
            stem: interface_stem(&class.name),
            exports: vec![interface_name],
            module: TsModule {
                header: header::interface_file(model, domain, class),
                imports: interface_imports,
                items: vec![Item::Interface(build_interface(ctx))],
            },
        },
        EmittedFile {
            stem: class_stem(&class.name),
            exports: vec![to_pascal_case(&class.name)],
            module: TsModule {
                header: header::class_file(model, domain, class),
                imports: class_imports,
                items: vec![Item::Class(build_class(ctx))],
            },
        },
    ]
}

fn declared_names(class: &ClassDefinition) -> Vec<String> {
    vec![to_interface_name(&class.name), to_pascal_case(&class.name)]
}
