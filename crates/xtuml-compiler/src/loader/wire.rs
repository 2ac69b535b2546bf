//! Serde mirror of the JSON model document.
//!
//! Every field is optional here; absent collections become empty and
//! scalars are accepted wherever a string is expected. Resolution into the
//! canonical [`crate::model`] types happens in [`WireModel::into_model`].

use serde::{Deserialize, Deserializer};

use crate::model::{
    ActionStep, AssociationClass, Attribute, ClassDefinition, Domain, EntityKind, LogAction,
    Model, Operation, Parameter, Participant, Relationship, State, StateMachine, Transition,
    TransitionBody,
};

/// A string-valued field that also accepts JSON numbers and booleans.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Text(pub(crate) String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Text(s)),
            serde_json::Value::Number(n) => Ok(Text(n.to_string())),
            serde_json::Value::Bool(b) => Ok(Text(b.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a string, found {other}"
            ))),
        }
    }
}

fn text(value: Option<Text>) -> Option<String> {
    value.map(|t| t.0)
}

fn text_or_empty(value: Option<Text>) -> String {
    value.map(|t| t.0).unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireModel {
    system_name: Option<Text>,
    version: Option<Text>,
    domains: Option<Vec<WireDomain>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDomain {
    name: Option<Text>,
    key_letter: Option<Text>,
    classes: Option<Vec<WireClass>>,
    relationships: Option<Vec<WireRelationship>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireClass {
    entity_type: Option<Text>,
    name: Option<Text>,
    key_letter: Option<Text>,
    inherits_from: Option<Text>,
    is_abstract: Option<bool>,
    description: Option<Text>,
    attributes: Option<Vec<WireAttribute>>,
    state_machine: Option<WireStateMachine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAttribute {
    name: Option<Text>,
    data_type: Option<Text>,
    attribute_type: Option<Text>,
    default_value: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRelationship {
    relationship_id: Option<Text>,
    description: Option<Text>,
    participants: Option<Vec<WireParticipant>>,
    association_class: Option<WireAssociationClass>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireParticipant {
    class_name: Option<Text>,
    role: Option<Text>,
    multiplicity: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAssociationClass {
    name: Option<Text>,
    key_letter: Option<Text>,
    attributes: Option<Vec<WireAttribute>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireStateMachine {
    initial_state: Option<Text>,
    states: Option<Vec<WireState>>,
    transitions: Option<Vec<WireTransition>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireState {
    name: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTransition {
    from_state: Option<Text>,
    to_state: Option<Text>,
    event: Option<Text>,
    actions: Option<Vec<WireAction>>,
    #[serde(rename = "actionLanguage", alias = "action_language")]
    action_language: Option<WireActionLanguage>,
}

/// Legacy transition action: either an inline log message or a nested
/// action-language block.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAction {
    #[serde(rename = "type")]
    kind: Option<Text>,
    message: Option<Text>,
    #[serde(rename = "actionLanguage", alias = "action_language")]
    action_language: Option<WireActionLanguage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireActionLanguage {
    operations: Option<Vec<WireOperation>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireOperation {
    name: Option<Text>,
    parameters: Option<Vec<WireParameter>>,
    steps: Option<Vec<WireActionStep>>,
    actions: Option<Vec<WireActionStep>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireParameter {
    name: Option<Text>,
    #[serde(rename = "type", alias = "data_type")]
    data_type: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireActionStep {
    #[serde(rename = "type")]
    kind: Option<Text>,
    target: Option<Text>,
    attribute: Option<Text>,
    value: Option<Text>,
    message: Option<Text>,
}

impl WireModel {
    pub(crate) fn into_model(self) -> Model {
        Model {
            system_name: text_or_empty(self.system_name),
            version: text_or_empty(self.version),
            domains: self
                .domains
                .unwrap_or_default()
                .into_iter()
                .map(WireDomain::into_domain)
                .collect(),
        }
    }
}

impl WireDomain {
    fn into_domain(self) -> Domain {
        Domain {
            name: text_or_empty(self.name),
            key_letter: text_or_empty(self.key_letter),
            classes: self
                .classes
                .unwrap_or_default()
                .into_iter()
                .map(WireClass::into_class)
                .collect(),
            relationships: self
                .relationships
                .unwrap_or_default()
                .into_iter()
                .map(WireRelationship::into_relationship)
                .collect(),
        }
    }
}

impl WireClass {
    fn into_class(self) -> ClassDefinition {
        let kind = text(self.entity_type);
        ClassDefinition {
            kind: EntityKind::from_tag(kind.as_deref()),
            name: text_or_empty(self.name),
            key_letter: text(self.key_letter),
            inherits_from: text(self.inherits_from),
            is_abstract: self.is_abstract.unwrap_or(false),
            description: text(self.description),
            attributes: attributes(self.attributes),
            state_machine: self.state_machine.map(WireStateMachine::into_state_machine),
        }
    }
}

fn attributes(wire: Option<Vec<WireAttribute>>) -> Vec<Attribute> {
    wire.unwrap_or_default()
        .into_iter()
        .map(|attr| Attribute {
            name: text_or_empty(attr.name),
            data_type: text(attr.data_type),
            attribute_type: text(attr.attribute_type),
            default_value: text(attr.default_value),
        })
        .collect()
}

impl WireRelationship {
    fn into_relationship(self) -> Relationship {
        Relationship {
            id: text_or_empty(self.relationship_id),
            description: text(self.description),
            participants: self
                .participants
                .unwrap_or_default()
                .into_iter()
                .map(|p| Participant {
                    class_name: text_or_empty(p.class_name),
                    role: text(p.role),
                    multiplicity: text(p.multiplicity),
                })
                .collect(),
            association_class: self.association_class.map(|assoc| AssociationClass {
                name: text_or_empty(assoc.name),
                key_letter: text(assoc.key_letter),
                attributes: attributes(assoc.attributes),
            }),
        }
    }
}

impl WireStateMachine {
    fn into_state_machine(self) -> StateMachine {
        StateMachine {
            initial_state: text(self.initial_state),
            states: self
                .states
                .unwrap_or_default()
                .into_iter()
                .map(|s| State {
                    name: text_or_empty(s.name),
                })
                .collect(),
            transitions: self
                .transitions
                .unwrap_or_default()
                .into_iter()
                .map(WireTransition::into_transition)
                .collect(),
        }
    }
}

impl WireTransition {
    fn into_transition(self) -> Transition {
        Transition {
            from_state: text_or_empty(self.from_state),
            to_state: text_or_empty(self.to_state),
            event: text_or_empty(self.event),
            body: resolve_body(self.action_language, self.actions.unwrap_or_default()),
        }
    }
}

/// Folds the two historical action shapes into one [`TransitionBody`].
///
/// Priority: operations declared on the transition itself, then operations
/// nested inside legacy actions, then the legacy `log` actions.
fn resolve_body(
    action_language: Option<WireActionLanguage>,
    actions: Vec<WireAction>,
) -> TransitionBody {
    let direct = action_language
        .and_then(|al| al.operations)
        .unwrap_or_default();
    if !direct.is_empty() {
        return TransitionBody::Operations(
            direct.into_iter().map(WireOperation::into_operation).collect(),
        );
    }

    let mut operations = Vec::new();
    let mut logs = Vec::new();
    for action in actions {
        match action.action_language {
            Some(al) => {
                operations.extend(
                    al.operations
                        .unwrap_or_default()
                        .into_iter()
                        .map(WireOperation::into_operation),
                );
            }
            None => {
                if text(action.kind).as_deref() == Some("log") {
                    logs.push(LogAction {
                        message: text(action.message),
                    });
                }
            }
        }
    }

    if operations.is_empty() {
        TransitionBody::Legacy(logs)
    } else {
        TransitionBody::Operations(operations)
    }
}

impl WireOperation {
    fn into_operation(self) -> Operation {
        // `steps` is the current field name; `actions` is the older alias.
        let steps = self.steps.or(self.actions).unwrap_or_default();
        Operation {
            name: text_or_empty(self.name),
            parameters: self
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(|p| Parameter {
                    name: text_or_empty(p.name),
                    data_type: text(p.data_type),
                })
                .collect(),
            steps: steps
                .into_iter()
                .map(|step| {
                    ActionStep::from_parts(
                        text(step.kind),
                        text(step.target),
                        text(step.attribute),
                        text(step.value),
                        text(step.message),
                    )
                })
                .collect(),
        }
    }
}
