//! Referential checks that never fail a run.
//!
//! The generator tolerates dangling state names, unknown parents and
//! colliding method names. These findings are reported so callers can log
//! them, but generation proceeds with first-occurrence-wins semantics.

use thiserror::Error;

use crate::codegen::state_machine::plan_methods;
use crate::model::{ClassDefinition, Model};
use crate::registry::ClassRegistry;

/// A non-fatal problem found in a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LintWarning {
    #[error("class '{class}': transition on '{event}' references undeclared state '{state}'")]
    UnknownTransitionState {
        class: String,
        event: String,
        state: String,
    },

    #[error("class '{class}': initial state '{state}' is not a declared state")]
    UnknownInitialState { class: String, state: String },

    #[error("class '{name}' is declared more than once; the first declaration is used")]
    DuplicateClass { name: String },

    #[error("class '{class}' inherits from unknown class '{parent}'")]
    UnknownParent { class: String, parent: String },

    #[error("class '{class}' has a cyclic inheritance chain")]
    InheritanceCycle { class: String },

    #[error("class '{class}': method '{method}' is generated once; later definitions are dropped")]
    DuplicateMethod { class: String, method: String },
}

/// Collects referential warnings for the whole model.
pub fn lint(model: &Model) -> Vec<LintWarning> {
    let registry = ClassRegistry::new(model);
    let mut warnings: Vec<LintWarning> = registry
        .duplicate_names()
        .iter()
        .map(|name| LintWarning::DuplicateClass {
            name: (*name).to_string(),
        })
        .collect();

    for (_, class) in model.classes() {
        lint_inheritance(&registry, class, &mut warnings);
        lint_state_machine(class, &mut warnings);
    }

    warnings
}

fn lint_inheritance(
    registry: &ClassRegistry<'_>,
    class: &ClassDefinition,
    warnings: &mut Vec<LintWarning>,
) {
    let Some(parent) = class.inherits_from.as_deref() else {
        return;
    };
    if registry.get(parent).is_none() {
        warnings.push(LintWarning::UnknownParent {
            class: class.name.clone(),
            parent: parent.to_string(),
        });
    } else if registry.has_inheritance_cycle(class) {
        warnings.push(LintWarning::InheritanceCycle {
            class: class.name.clone(),
        });
    }
}

fn lint_state_machine(class: &ClassDefinition, warnings: &mut Vec<LintWarning>) {
    let Some(machine) = &class.state_machine else {
        return;
    };

    if let Some(initial) = &machine.initial_state {
        if !machine.has_state(initial) {
            warnings.push(LintWarning::UnknownInitialState {
                class: class.name.clone(),
                state: initial.clone(),
            });
        }
    }

    for transition in &machine.transitions {
        for state in [&transition.from_state, &transition.to_state] {
            if !machine.has_state(state) {
                warnings.push(LintWarning::UnknownTransitionState {
                    class: class.name.clone(),
                    event: transition.event.clone(),
                    state: state.clone(),
                });
            }
        }
    }

    for method in plan_methods(machine).dropped {
        warnings.push(LintWarning::DuplicateMethod {
            class: class.name.clone(),
            method,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Domain, Operation, State, StateMachine, Transition, TransitionBody};

    fn machine(states: &[&str], transitions: &[(&str, &str, &str)]) -> StateMachine {
        StateMachine {
            initial_state: Some(states[0].to_string()),
            states: states
                .iter()
                .map(|s| State { name: s.to_string() })
                .collect(),
            transitions: transitions
                .iter()
                .map(|(from, to, event)| Transition {
                    from_state: from.to_string(),
                    to_state: to.to_string(),
                    event: event.to_string(),
                    body: TransitionBody::default(),
                })
                .collect(),
        }
    }

    fn model(classes: Vec<ClassDefinition>) -> Model {
        Model {
            system_name: "S".to_string(),
            version: "1".to_string(),
            domains: vec![Domain {
                name: "D".to_string(),
                key_letter: "D".to_string(),
                classes,
                relationships: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_clean_model_has_no_warnings() {
        let class = ClassDefinition {
            name: "Mahasiswa".to_string(),
            state_machine: Some(machine(&["Aktif", "Lulus"], &[("Aktif", "Lulus", "lulus")])),
            ..Default::default()
        };
        assert!(lint(&model(vec![class])).is_empty());
    }

    #[test]
    fn test_unknown_states_and_duplicate_methods() {
        let class = ClassDefinition {
            name: "Mahasiswa".to_string(),
            state_machine: Some(machine(
                &["Aktif", "Lulus"],
                &[("Aktif", "Cuti", "cuti"), ("Lulus", "Aktif", "CUTI")],
            )),
            ..Default::default()
        };
        let warnings = lint(&model(vec![class]));
        assert!(warnings.contains(&LintWarning::UnknownTransitionState {
            class: "Mahasiswa".to_string(),
            event: "cuti".to_string(),
            state: "Cuti".to_string(),
        }));
        assert!(warnings.contains(&LintWarning::DuplicateMethod {
            class: "Mahasiswa".to_string(),
            method: "cuti".to_string(),
        }));
    }

    #[test]
    fn test_duplicate_event_fallback_is_reported() {
        let op = |name: &str| Operation {
            name: name.to_string(),
            parameters: Vec::new(),
            steps: Vec::new(),
        };
        let mut sm = machine(
            &["Aktif", "Cuti", "Lulus"],
            &[
                ("Aktif", "Cuti", "cuti"),
                ("Cuti", "Aktif", "aktifkan"),
                ("Lulus", "Aktif", "aktifkan"),
            ],
        );
        sm.transitions[0].body = TransitionBody::Operations(vec![op("proses")]);
        sm.transitions[1].body = TransitionBody::Operations(vec![op("proses")]);
        let class = ClassDefinition {
            name: "Mahasiswa".to_string(),
            state_machine: Some(sm),
            ..Default::default()
        };
        let duplicates: Vec<LintWarning> = lint(&model(vec![class]))
            .into_iter()
            .filter(|w| matches!(w, LintWarning::DuplicateMethod { .. }))
            .collect();
        assert_eq!(
            duplicates,
            [
                LintWarning::DuplicateMethod {
                    class: "Mahasiswa".to_string(),
                    method: "proses".to_string(),
                },
                LintWarning::DuplicateMethod {
                    class: "Mahasiswa".to_string(),
                    method: "aktifkan".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_and_unknown_parent() {
        let a = ClassDefinition {
            name: "A".to_string(),
            ..Default::default()
        };
        let b = ClassDefinition {
            name: "B".to_string(),
            inherits_from: Some("Ghost".to_string()),
            ..Default::default()
        };
        let warnings = lint(&model(vec![a.clone(), b, a]));
        assert!(warnings.contains(&LintWarning::DuplicateClass {
            name: "A".to_string()
        }));
        assert!(warnings.contains(&LintWarning::UnknownParent {
            class: "B".to_string(),
            parent: "Ghost".to_string(),
        }));
    }
}
