//! Action-step interpreter.
//!
//! Compiles one structured operation of a transition into a guarded
//! method. Steps that cannot be resolved degrade into comments; nothing in
//! here fails.

use tracing::debug;

use super::ts_ast::{Expr, MethodDecl, Param, Stmt, TsType};
use super::ts_names::{convert_data_type, to_camel_case, to_parameter_name};
use crate::model::{ActionStep, ClassDefinition, Operation, Parameter, Transition};
use crate::registry::ClassRegistry;

/// Attribute whose update is a state change on classes with a state machine.
pub const STATUS_ATTRIBUTE: &str = "Status";

/// The only update target the interpreter understands.
pub const RECEIVER: &str = "this";

/// Property holding the current state of a generated class.
pub const STATE_PROPERTY: &str = "state";

const LOG_FUNCTION: &str = "console.log";

/// Legacy log markers and the property each one reads.
pub(crate) const LEGACY_MARKERS: [(&str, &str); 2] =
    [("${self.NIM}", "nim"), ("${self.NIP}", "nip")];

/// The class being generated, passed explicitly to every step.
#[derive(Debug, Clone, Copy)]
pub struct ClassContext<'a> {
    pub class: &'a ClassDefinition,
    pub registry: &'a ClassRegistry<'a>,
}

impl<'a> ClassContext<'a> {
    pub fn new(class: &'a ClassDefinition, registry: &'a ClassRegistry<'a>) -> Self {
        Self { class, registry }
    }

    fn has_state_machine(&self) -> bool {
        self.class.state_machine.is_some()
    }
}

/// Statements produced by one step.
#[derive(Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub statements: Vec<Stmt>,
    /// The step already assigned `state`.
    pub assigns_state: bool,
}

impl StepOutcome {
    fn nothing() -> Self {
        Self::default()
    }

    fn single(stmt: Stmt) -> Self {
        Self {
            statements: vec![stmt],
            assigns_state: false,
        }
    }
}

/// Compiles an operation into a method guarded on the transition's source state.
pub fn compile_operation(
    ctx: &ClassContext<'_>,
    operation: &Operation,
    transition: &Transition,
) -> MethodDecl {
    let params = operation
        .parameters
        .iter()
        .map(|param| Param {
            name: to_parameter_name(&param.name),
            typ: TsType::named(convert_data_type(param.data_type.as_deref())),
        })
        .collect();

    let mut guarded = Vec::new();
    let mut state_assigned = false;
    for step in &operation.steps {
        let outcome = interpret_step(ctx, step, &operation.parameters);
        state_assigned |= outcome.assigns_state;
        guarded.extend(outcome.statements);
    }

    if !state_assigned {
        guarded.push(assign_state(&transition.to_state));
    }
    guarded.push(Stmt::Return(Expr::boolean(true)));

    MethodDecl {
        name: to_camel_case(&operation.name),
        params,
        return_type: TsType::boolean(),
        body: vec![
            Stmt::If {
                condition: state_guard(&transition.from_state),
                then_branch: guarded,
            },
            Stmt::Return(Expr::boolean(false)),
        ],
    }
}

/// Translates a single step.
pub fn interpret_step(
    ctx: &ClassContext<'_>,
    step: &ActionStep,
    parameters: &[Parameter],
) -> StepOutcome {
    match step {
        ActionStep::Update {
            target,
            attribute,
            value,
        } => interpret_update(
            ctx,
            target.as_deref(),
            attribute.as_deref(),
            value.as_deref(),
        ),
        ActionStep::Log { message: Some(message) } => {
            StepOutcome::single(log_statement(log_message_expr(message, parameters)))
        }
        ActionStep::Log { message: None } => {
            debug!(class = %ctx.class.name, "log step without message skipped");
            StepOutcome::nothing()
        }
        ActionStep::Unsupported { kind } => {
            let kind = kind.as_deref().unwrap_or("unknown");
            debug!(class = %ctx.class.name, kind, "unsupported action step");
            StepOutcome::single(Stmt::Comment(format!(
                "Action type '{}' not implemented",
                kind
            )))
        }
    }
}

fn interpret_update(
    ctx: &ClassContext<'_>,
    target: Option<&str>,
    attribute: Option<&str>,
    value: Option<&str>,
) -> StepOutcome {
    if target != Some(RECEIVER) {
        debug!(class = %ctx.class.name, ?target, "update step on foreign target skipped");
        return StepOutcome::nothing();
    }
    let (Some(attribute), Some(value)) = (attribute, value) else {
        debug!(class = %ctx.class.name, "incomplete update step skipped");
        return StepOutcome::nothing();
    };

    let literal = classify_literal(value);

    if attribute == STATUS_ATTRIBUTE && ctx.has_state_machine() {
        return StepOutcome {
            statements: vec![Stmt::Assign {
                target: Expr::member(STATE_PROPERTY),
                value: literal,
            }],
            assigns_state: true,
        };
    }

    let assignment = Stmt::Assign {
        target: Expr::member(to_camel_case(attribute)),
        value: literal,
    };

    if ctx.registry.has_attribute(ctx.class, attribute) {
        return StepOutcome::single(assignment);
    }

    debug!(class = %ctx.class.name, attribute, "update of unknown attribute disabled");
    StepOutcome {
        statements: vec![
            Stmt::Comment(format!("Update {} to {}", attribute, value)),
            Stmt::Disabled(Box::new(assignment)),
        ],
        assigns_state: false,
    }
}

/// Integer and boolean literals stay bare; anything else becomes a string.
pub fn classify_literal(value: &str) -> Expr {
    let is_integer = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    if is_integer || value == "true" || value == "false" {
        Expr::Verbatim(value.to_string())
    } else {
        Expr::string(value)
    }
}

/// Rewrites markers in a log message and picks the literal form.
///
/// Legacy markers read the matching property, `${param}` reads the
/// parameter identifier. A message that still interpolates is a template
/// literal; otherwise a plain string.
pub fn log_message_expr(message: &str, parameters: &[Parameter]) -> Expr {
    let mut text = message.to_string();
    for (marker, property) in LEGACY_MARKERS {
        text = text.replace(marker, &format!("${{this.{}}}", property));
    }
    for param in parameters {
        text = text.replace(
            &format!("${{{}}}", param.name),
            &format!("${{{}}}", to_parameter_name(&param.name)),
        );
    }

    if text.contains("${") {
        Expr::Template(text)
    } else {
        Expr::StringLiteral(text)
    }
}

pub(crate) fn log_statement(message: Expr) -> Stmt {
    Stmt::Expression(Expr::Call {
        callee: LOG_FUNCTION.to_string(),
        arguments: vec![message],
    })
}

pub(crate) fn state_guard(from_state: &str) -> Expr {
    Expr::strict_eq(Expr::member(STATE_PROPERTY), Expr::string(from_state))
}

pub(crate) fn assign_state(to_state: &str) -> Stmt {
    Stmt::Assign {
        target: Expr::member(STATE_PROPERTY),
        value: Expr::string(to_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::printer::print_method;
    use crate::model::{Attribute, Domain, Model, State, StateMachine, TransitionBody};

    fn attr(name: &str, data_type: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            data_type: Some(data_type.to_string()),
            attribute_type: Some("descriptive".to_string()),
            default_value: None,
        }
    }

    fn akademik() -> Model {
        let person = ClassDefinition {
            name: "Person".to_string(),
            attributes: vec![attr("nama", "string")],
            ..Default::default()
        };
        let mahasiswa = ClassDefinition {
            name: "Mahasiswa".to_string(),
            inherits_from: Some("Person".to_string()),
            attributes: vec![attr("ipk", "real")],
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
                transitions: Vec::new(),
            }),
            ..Default::default()
        };
        Model {
            system_name: "Akademik".to_string(),
            version: "1.0".to_string(),
            domains: vec![Domain {
                name: "Kampus".to_string(),
                key_letter: "K".to_string(),
                classes: vec![person, mahasiswa],
                relationships: Vec::new(),
            }],
        }
    }

    fn transition() -> Transition {
        Transition {
            from_state: "Aktif".to_string(),
            to_state: "Lulus".to_string(),
            event: "lulus".to_string(),
            body: TransitionBody::Operations(Vec::new()),
        }
    }

    fn update(attribute: &str, value: &str) -> ActionStep {
        ActionStep::Update {
            target: Some("this".to_string()),
            attribute: Some(attribute.to_string()),
            value: Some(value.to_string()),
        }
    }

    fn compile(model: &Model, operation: &Operation) -> String {
        let registry = ClassRegistry::new(model);
        let class = registry.get("Mahasiswa").unwrap();
        let ctx = ClassContext::new(class, &registry);
        print_method(&compile_operation(&ctx, operation, &transition()))
    }

    #[test]
    fn test_status_update_replaces_state_assignment() {
        let model = akademik();
        let operation = Operation {
            name: "luluskan".to_string(),
            parameters: Vec::new(),
            steps: vec![update("Status", "Lulus")],
        };
        assert_eq!(
            compile(&model, &operation),
            "  public luluskan(): boolean {\n\
             \x20   if (this.state === 'Aktif') {\n\
             \x20     this.state = 'Lulus';\n\
             \x20     return true;\n\
             \x20   }\n\
             \x20   return false;\n\
             \x20 }\n"
        );
    }

    #[test]
    fn test_status_on_class_without_machine_is_plain_update() {
        let model = akademik();
        let registry = ClassRegistry::new(&model);
        let person = registry.get("Person").unwrap();
        let ctx = ClassContext::new(person, &registry);

        let outcome = interpret_step(&ctx, &update("Status", "Lulus"), &[]);
        assert!(!outcome.assigns_state);
        assert!(matches!(outcome.statements[..], [Stmt::Comment(_), Stmt::Disabled(_)]));
    }

    #[test]
    fn test_log_with_parameter_becomes_template() {
        let model = akademik();
        let operation = Operation {
            name: "sapa".to_string(),
            parameters: vec![Parameter {
                name: "nama".to_string(),
                data_type: Some("string".to_string()),
            }],
            steps: vec![ActionStep::Log {
                message: Some("Halo ${nama}".to_string()),
            }],
        };
        let method = compile(&model, &operation);
        assert!(method.starts_with("  public sapa(nama: string): boolean {\n"));
        assert!(method.contains("      console.log(`Halo ${nama}`);\n"));
        assert!(method.contains("      this.state = 'Lulus';\n"));
    }

    #[test]
    fn test_log_message_forms() {
        let params = vec![Parameter {
            name: "class".to_string(),
            data_type: None,
        }];
        assert_eq!(
            log_message_expr("Kelas ${class}", &params),
            Expr::Template("Kelas ${class_}".to_string())
        );
        assert_eq!(
            log_message_expr("NIM ${self.NIM}", &[]),
            Expr::Template("NIM ${this.nim}".to_string())
        );
        assert_eq!(
            log_message_expr("Selesai", &[]),
            Expr::StringLiteral("Selesai".to_string())
        );
    }

    #[test]
    fn test_unknown_attribute_is_disabled() {
        let model = akademik();
        let operation = Operation {
            name: "setNilai".to_string(),
            parameters: Vec::new(),
            steps: vec![update("nilai", "90"), update("ipk", "4"), update("nama", "Budi")],
        };
        let method = compile(&model, &operation);
        assert!(method.contains("      // Update nilai to 90\n      // this.nilai = 90;\n"));
        assert!(method.contains("      this.ipk = 4;\n"));
        assert!(method.contains("      this.nama = 'Budi';\n"));
        assert!(!method.lines().any(|line| line.trim() == "this.nilai = 90;"));
    }

    #[test]
    fn test_multiline_model_text_stays_commented() {
        let model = akademik();
        let operation = Operation {
            name: "rusak".to_string(),
            parameters: Vec::new(),
            steps: vec![
                update("ghost", "x\nthis.ghost = 1;"),
                ActionStep::Unsupported {
                    kind: Some("rm\nthis.other = 2;".to_string()),
                },
            ],
        };
        let method = compile(&model, &operation);
        assert!(method.contains(
            "      // Update ghost to x\n\
             \x20     // this.ghost = 1;\n\
             \x20     // this.ghost = 'x\\nthis.ghost = 1;';\n\
             \x20     // Action type 'rm\n\
             \x20     // this.other = 2;' not implemented\n"
        ));
        for line in method.lines().map(str::trim) {
            assert!(
                !line.starts_with("this.ghost") && !line.starts_with("this.other"),
                "live line: {line}"
            );
        }
    }

    #[test]
    fn test_degraded_steps() {
        let model = akademik();
        let operation = Operation {
            name: "aneh".to_string(),
            parameters: Vec::new(),
            steps: vec![
                ActionStep::Unsupported {
                    kind: Some("create".to_string()),
                },
                ActionStep::Update {
                    target: Some("other".to_string()),
                    attribute: Some("ipk".to_string()),
                    value: Some("1".to_string()),
                },
                ActionStep::Log { message: None },
            ],
        };
        assert_eq!(
            compile(&model, &operation),
            "  public aneh(): boolean {\n\
             \x20   if (this.state === 'Aktif') {\n\
             \x20     // Action type 'create' not implemented\n\
             \x20     this.state = 'Lulus';\n\
             \x20     return true;\n\
             \x20   }\n\
             \x20   return false;\n\
             \x20 }\n"
        );
    }

    #[test]
    fn test_classify_literal() {
        assert_eq!(classify_literal("42"), Expr::Verbatim("42".to_string()));
        assert_eq!(classify_literal("true"), Expr::Verbatim("true".to_string()));
        assert_eq!(classify_literal("3.5"), Expr::string("3.5"));
        assert_eq!(classify_literal(""), Expr::string(""));
        assert_eq!(classify_literal("Lulus"), Expr::string("Lulus"));
    }
}
