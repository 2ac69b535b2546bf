//! Interface and class emitter.

use super::action::{ClassContext, STATE_PROPERTY};
use super::state_machine::compile_state_machine;
use super::ts_ast::{
    ClassDecl, ClassProperty, Constructor, Expr, InterfaceDecl, Param, PropertySignature, Stmt,
    TsType,
};
use super::ts_names::{
    convert_data_type, doc_lines, to_camel_case, to_interface_name, to_parameter_name,
    to_pascal_case,
};
use crate::model::{Attribute, StateMachine};

fn attribute_type(attr: &Attribute) -> TsType {
    TsType::named(convert_data_type(attr.data_type.as_deref()))
}

/// Union of the declared state names; plain `string` when none are declared.
fn state_type(machine: &StateMachine) -> TsType {
    if machine.states.is_empty() {
        TsType::named("string")
    } else {
        TsType::StringUnion(machine.state_names())
    }
}

/// `I<Name>`: one property per attribute plus `state` for state machines.
pub fn build_interface(ctx: &ClassContext<'_>) -> InterfaceDecl {
    let class = ctx.class;
    let mut properties: Vec<PropertySignature> = class
        .attributes
        .iter()
        .map(|attr| PropertySignature {
            name: to_camel_case(&attr.name),
            optional: !attr.is_naming(),
            typ: attribute_type(attr),
        })
        .collect();

    if let Some(machine) = &class.state_machine {
        properties.push(PropertySignature {
            name: STATE_PROPERTY.to_string(),
            optional: false,
            typ: state_type(machine),
        });
    }

    InterfaceDecl {
        name: to_interface_name(&class.name),
        extends: class.inherits_from.as_deref().map(to_interface_name),
        properties,
    }
}

/// The class implementing [`build_interface`]'s interface.
pub fn build_class(ctx: &ClassContext<'_>) -> ClassDecl {
    let class = ctx.class;
    let mut properties: Vec<ClassProperty> = class.attributes.iter().map(class_property).collect();

    let state_methods = class.state_machine.as_ref().map(|machine| {
        properties.push(ClassProperty {
            name: STATE_PROPERTY.to_string(),
            optional: false,
            typ: state_type(machine),
            initializer: machine.initial_state.as_deref().map(Expr::string),
        });
        compile_state_machine(ctx, machine)
    });

    ClassDecl {
        doc: doc_lines(class.description.as_deref()).unwrap_or_default(),
        name: to_pascal_case(&class.name),
        is_abstract: class.is_abstract,
        extends: class.inherits_from.as_deref().map(to_pascal_case),
        implements: vec![to_interface_name(&class.name)],
        properties,
        constructor: build_constructor(ctx),
        state_methods,
    }
}

fn class_property(attr: &Attribute) -> ClassProperty {
    let typ = attribute_type(attr);
    let initializer = attr.default_value.as_deref().map(|value| match &typ {
        TsType::Named(name) if name == "string" => Expr::string(value),
        _ => Expr::Verbatim(value.to_string()),
    });
    ClassProperty {
        name: to_camel_case(&attr.name),
        optional: !attr.is_naming(),
        typ,
        initializer,
    }
}

/// Constructor taking every naming attribute of the ancestor chain, oldest
/// first, then the class's own.
///
/// A class with a parent always calls `super(...)` with the inherited
/// parameters, even when there are none.
pub fn build_constructor(ctx: &ClassContext<'_>) -> Constructor {
    let inherited = ctx.registry.inherited_naming_attributes(ctx.class);
    let own: Vec<&Attribute> = ctx.class.naming_attributes().collect();

    let params = inherited
        .iter()
        .chain(own.iter())
        .map(|attr| Param {
            name: to_parameter_name(&attr.name),
            typ: attribute_type(attr),
        })
        .collect();

    let mut body = Vec::new();
    if ctx.class.inherits_from.is_some() {
        body.push(Stmt::Expression(Expr::Call {
            callee: "super".to_string(),
            arguments: inherited
                .iter()
                .map(|attr| Expr::Identifier(to_parameter_name(&attr.name)))
                .collect(),
        }));
    }
    for attr in own {
        body.push(Stmt::Assign {
            target: Expr::member(to_camel_case(&attr.name)),
            value: Expr::Identifier(to_parameter_name(&attr.name)),
        });
    }

    Constructor { params, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::printer::{print_class, print_interface};
    use crate::model::{ClassDefinition, Domain, Model, State, Transition, TransitionBody};
    use crate::registry::ClassRegistry;

    fn attr(name: &str, data_type: &str, naming: bool, default: Option<&str>) -> Attribute {
        Attribute {
            name: name.to_string(),
            data_type: Some(data_type.to_string()),
            attribute_type: Some(if naming { "naming" } else { "descriptive" }.to_string()),
            default_value: default.map(str::to_string),
        }
    }

    fn model() -> Model {
        let person = ClassDefinition {
            name: "Person".to_string(),
            is_abstract: true,
            attributes: vec![attr("nama", "string", true, None)],
            ..Default::default()
        };
        let mahasiswa = ClassDefinition {
            name: "Mahasiswa".to_string(),
            inherits_from: Some("Person".to_string()),
            description: Some("Seorang mahasiswa.".to_string()),
            attributes: vec![
                attr("NIM", "string", true, None),
                attr("angkatan", "integer", false, Some("2024")),
                attr("status", "string", false, Some("Aktif")),
            ],
            state_machine: Some(StateMachine {
                initial_state: Some("Aktif".to_string()),
                states: vec![
                    State {
                        name: "Aktif".to_string(),
                    },
                    State {
                        name: "Lulus".to_string(),
                    },
                ],
                transitions: vec![Transition {
                    from_state: "Aktif".to_string(),
                    to_state: "Lulus".to_string(),
                    event: "lulus".to_string(),
                    body: TransitionBody::default(),
                }],
            }),
            ..Default::default()
        };
        let asisten = ClassDefinition {
            name: "Asisten".to_string(),
            inherits_from: Some("Mahasiswa".to_string()),
            attributes: vec![attr("class", "string", true, None)],
            ..Default::default()
        };
        Model {
            system_name: "Akademik".to_string(),
            version: "1.0".to_string(),
            domains: vec![Domain {
                name: "Kampus".to_string(),
                key_letter: "K".to_string(),
                classes: vec![person, mahasiswa, asisten],
                relationships: Vec::new(),
            }],
        }
    }

    fn with_context<T>(name: &str, f: impl FnOnce(&ClassContext<'_>) -> T) -> T {
        let model = model();
        let registry = ClassRegistry::new(&model);
        let class = registry.get(name).unwrap();
        f(&ClassContext::new(class, &registry))
    }

    #[test]
    fn test_naming_attribute_is_required() {
        let interface = with_context("Mahasiswa", build_interface);
        assert_eq!(interface.properties[0].name, "nim");
        assert!(!interface.properties[0].optional);
        assert_eq!(interface.properties[0].typ, TsType::named("string"));
        assert!(interface.properties[1].optional);

        assert_eq!(
            print_interface(&interface),
            "export interface IMahasiswa extends IPerson {\n\
             \x20 nim: string;\n\
             \x20 angkatan?: number;\n\
             \x20 status?: string;\n\
             \x20 state: 'Aktif' | 'Lulus';\n\
             }\n"
        );
    }

    #[test]
    fn test_constructor_delegates_to_parent() {
        let constructor = with_context("Mahasiswa", build_constructor);
        let names: Vec<&str> = constructor.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["nama", "nim"]);
        assert_eq!(
            constructor.body,
            vec![
                Stmt::Expression(Expr::Call {
                    callee: "super".to_string(),
                    arguments: vec![Expr::Identifier("nama".to_string())],
                }),
                Stmt::Assign {
                    target: Expr::member("nim"),
                    value: Expr::Identifier("nim".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_constructor_walks_whole_chain() {
        let constructor = with_context("Asisten", build_constructor);
        let names: Vec<&str> = constructor.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["nama", "nim", "class_"]);
        assert_eq!(
            constructor.body[1],
            Stmt::Assign {
                target: Expr::member("class"),
                value: Expr::Identifier("class_".to_string()),
            }
        );
    }

    #[test]
    fn test_root_class_has_no_super_call() {
        let constructor = with_context("Person", build_constructor);
        assert!(matches!(constructor.body[..], [Stmt::Assign { .. }]));
    }

    #[test]
    fn test_class_declaration() {
        let text = with_context("Mahasiswa", |ctx| print_class(&build_class(ctx)));
        assert!(text.starts_with(
            "/**\n * Seorang mahasiswa.\n */\n\
             export class Mahasiswa extends Person implements IMahasiswa {\n\
             \x20 public nim: string;\n\
             \x20 public angkatan?: number = 2024;\n\
             \x20 public status?: string = 'Aktif';\n\
             \x20 public state: 'Aktif' | 'Lulus' = 'Aktif';\n\
             \n\
             \x20 constructor(nama: string, nim: string) {\n"
        ));
        assert!(text.contains("\n  // State Machine Methods\n  public lulus(): boolean {\n"));
        assert!(text.ends_with("  }\n}\n"));
    }

    #[test]
    fn test_abstract_class() {
        let class = with_context("Person", build_class);
        assert!(class.is_abstract);
        assert_eq!(class.state_methods, None);
        assert!(print_class(&class).starts_with("export abstract class Person implements IPerson {\n"));
    }
}
