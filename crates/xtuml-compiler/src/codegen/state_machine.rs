//! State machine compiler.
//!
//! Every transition becomes one or more guarded methods. Structured
//! operations produce one method each; otherwise a parameterless method
//! named after the event performs the transition and replays legacy logs.

use std::collections::HashSet;

use tracing::debug;

use super::action::{
    assign_state, compile_operation, log_statement, state_guard, ClassContext, LEGACY_MARKERS,
};
use super::ts_ast::{Expr, MethodDecl, Stmt, TsType};
use super::ts_names::to_camel_case;
use crate::model::{LogAction, Operation, StateMachine, Transition, TransitionBody};

/// Compiles a class's state machine into methods, first name wins.
pub fn compile_state_machine(ctx: &ClassContext<'_>, machine: &StateMachine) -> Vec<MethodDecl> {
    let plan = plan_methods(machine);
    for name in &plan.dropped {
        debug!(class = %ctx.class.name, method = %name, "duplicate method dropped");
    }

    plan.kept
        .into_iter()
        .map(|source| match source {
            MethodSource::Operation(transition, operation) => {
                compile_operation(ctx, operation, transition)
            }
            MethodSource::Event(transition) => match &transition.body {
                TransitionBody::Legacy(actions) => simple_transition_method(transition, actions),
                TransitionBody::Operations(_) => simple_transition_method(transition, &[]),
            },
        })
        .collect()
}

/// What a generated method is compiled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MethodSource<'a> {
    /// One structured operation of a transition.
    Operation(&'a Transition, &'a Operation),
    /// The parameterless method named after the transition's event.
    Event(&'a Transition),
}

impl MethodSource<'_> {
    pub fn method_name(&self) -> String {
        match self {
            Self::Operation(_, operation) => to_camel_case(&operation.name),
            Self::Event(transition) => to_camel_case(&transition.event),
        }
    }
}

/// Methods a state machine yields, in order, and the names dropped as duplicates.
#[derive(Debug, Default)]
pub struct MethodPlan<'a> {
    pub kept: Vec<MethodSource<'a>>,
    pub dropped: Vec<String>,
}

impl<'a> MethodPlan<'a> {
    fn push(&mut self, names: &mut HashSet<String>, source: MethodSource<'a>) -> bool {
        let name = source.method_name();
        if names.insert(name.clone()) {
            self.kept.push(source);
            true
        } else {
            self.dropped.push(name);
            false
        }
    }
}

/// Decides which methods a state machine produces.
///
/// Operations of a transition come first; when none of them survives, the
/// event method is tried instead.
pub fn plan_methods(machine: &StateMachine) -> MethodPlan<'_> {
    let mut plan = MethodPlan::default();
    let mut names = HashSet::new();

    for transition in &machine.transitions {
        if let TransitionBody::Operations(operations) = &transition.body {
            let mut generated = false;
            for operation in operations {
                generated |= plan.push(&mut names, MethodSource::Operation(transition, operation));
            }
            if generated {
                continue;
            }
        }
        plan.push(&mut names, MethodSource::Event(transition));
    }

    plan
}

/// `event(): boolean` moving from `from_state` to `to_state`.
pub fn simple_transition_method(transition: &Transition, actions: &[LogAction]) -> MethodDecl {
    let mut guarded = vec![assign_state(&transition.to_state)];
    guarded.extend(
        actions
            .iter()
            .map(|action| log_statement(legacy_message_expr(action.message.as_deref()))),
    );
    guarded.push(Stmt::Return(Expr::boolean(true)));

    MethodDecl {
        name: to_camel_case(&transition.event),
        params: Vec::new(),
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

/// Splits a legacy message around its markers into a `+` concatenation.
///
/// Text between markers never interpolates.
fn legacy_message_expr(message: Option<&str>) -> Expr {
    let Some(message) = message else {
        return Expr::string("");
    };

    let mut parts = Vec::new();
    let mut rest = message;
    while let Some((index, marker, property)) = next_marker(rest) {
        if index > 0 {
            parts.push(Expr::TemplateText(rest[..index].to_string()));
        }
        parts.push(Expr::member(property));
        rest = &rest[index + marker.len()..];
    }

    if parts.is_empty() {
        return Expr::string(message);
    }
    if !rest.is_empty() {
        parts.push(Expr::TemplateText(rest.to_string()));
    }
    // keep the expression a string when it opens with a property
    if !matches!(parts.first(), Some(Expr::TemplateText(_))) {
        parts.insert(0, Expr::TemplateText(String::new()));
    }
    Expr::Concat(parts)
}

fn next_marker(text: &str) -> Option<(usize, &'static str, &'static str)> {
    LEGACY_MARKERS
        .iter()
        .filter_map(|(marker, property)| text.find(marker).map(|index| (index, *marker, *property)))
        .min_by_key(|(index, _, _)| *index)
}
