//! Canonical model of an xTUML system.
//!
//! The loader resolves the JSON document into these types once; code
//! generators only ever read them. Nothing here carries behavior beyond
//! small lookups.

mod class;
mod state_machine;

pub use class::{AssociationClass, Attribute, ClassDefinition, EntityKind, Participant, Relationship};
pub use state_machine::{
    ActionStep, LogAction, Operation, Parameter, State, StateMachine, Transition, TransitionBody,
};

/// Root of a model: a named, versioned system made of domains.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub system_name: String,
    pub version: String,
    pub domains: Vec<Domain>,
}

/// A subject-matter domain and the classes that live in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub name: String,
    pub key_letter: String,
    pub classes: Vec<ClassDefinition>,
    pub relationships: Vec<Relationship>,
}

impl Model {
    /// Iterates over every class declared directly in a domain, in model order.
    pub fn classes(&self) -> impl Iterator<Item = (&Domain, &ClassDefinition)> {
        self.domains
            .iter()
            .flat_map(|domain| domain.classes.iter().map(move |class| (domain, class)))
    }
}

impl Domain {
    /// Association classes of this domain, promoted to ordinary class definitions.
    pub fn association_classes(&self) -> Vec<ClassDefinition> {
        self.relationships
            .iter()
            .filter_map(Relationship::association_class_definition)
            .collect()
    }

    /// Number of classes that own a state machine.
    pub fn state_machine_count(&self) -> usize {
        self.classes
            .iter()
            .filter(|class| class.state_machine.is_some())
            .count()
    }
}
