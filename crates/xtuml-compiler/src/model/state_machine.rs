//! State machines and the action language attached to their transitions.

/// A finite state machine owned by a class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateMachine {
    pub initial_state: Option<String>,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
}

impl StateMachine {
    pub fn has_state(&self, name: &str) -> bool {
        self.states.iter().any(|state| state.name == name)
    }

    pub fn state_names(&self) -> Vec<String> {
        self.states.iter().map(|state| state.name.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub name: String,
}

/// A transition between two states, fired by an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    pub from_state: String,
    pub to_state: String,
    pub event: String,
    pub body: TransitionBody,
}

/// What a transition does besides changing state.
///
/// Both historical JSON shapes are folded into this at load time. When a
/// transition carries structured operations, its legacy log actions are
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionBody {
    /// Structured action language: one generated method per operation.
    Operations(Vec<Operation>),
    /// Legacy free-text log actions of a plain event method.
    Legacy(Vec<LogAction>),
}

impl Default for TransitionBody {
    fn default() -> Self {
        Self::Legacy(Vec::new())
    }
}

/// A legacy `log` action; its message may reference `${self.NIM}` / `${self.NIP}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogAction {
    pub message: Option<String>,
}

/// An operation of the action language.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub steps: Vec<ActionStep>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    pub name: String,
    pub data_type: Option<String>,
}

/// A single step of an operation body.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionStep {
    /// `target.attribute = value`
    Update {
        target: Option<String>,
        attribute: Option<String>,
        value: Option<String>,
    },
    /// Log a (possibly templated) message.
    Log { message: Option<String> },
    /// Any step type the compiler does not know how to translate.
    Unsupported { kind: Option<String> },
}

impl ActionStep {
    /// Builds a step from its `type` tag and type-specific fields.
    pub fn from_parts(
        kind: Option<String>,
        target: Option<String>,
        attribute: Option<String>,
        value: Option<String>,
        message: Option<String>,
    ) -> Self {
        match kind.as_deref() {
            Some("update") => Self::Update {
                target,
                attribute,
                value,
            },
            Some("log") => Self::Log { message },
            _ => Self::Unsupported { kind },
        }
    }
}
