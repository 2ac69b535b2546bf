//! Classes, attributes and relationships.

use super::StateMachine;

/// Attribute role that marks identity attributes.
pub const NAMING_ROLE: &str = "naming";

/// What kind of entity a class definition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    #[default]
    Class,
    AssociationClass,
}

impl EntityKind {
    /// Parses the `entity_type` tag. Anything but `association_class` is a plain class.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("association_class") => Self::AssociationClass,
            _ => Self::Class,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::AssociationClass => "association_class",
        }
    }
}

/// A class of the domain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassDefinition {
    pub kind: EntityKind,
    pub name: String,
    pub key_letter: Option<String>,
    /// Name of the parent class (single inheritance).
    pub inherits_from: Option<String>,
    pub is_abstract: bool,
    pub description: Option<String>,
    pub attributes: Vec<Attribute>,
    pub state_machine: Option<StateMachine>,
}

impl ClassDefinition {
    /// Own attributes flagged as naming, in declared order.
    pub fn naming_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|attr| attr.is_naming())
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// A single attribute of a class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attribute {
    pub name: String,
    /// Semantic data type tag (`string`, `integer`, `uuid`, ...).
    pub data_type: Option<String>,
    /// Role tag; `naming` marks a required identity attribute.
    pub attribute_type: Option<String>,
    /// Default value literal, verbatim from the model.
    pub default_value: Option<String>,
}

impl Attribute {
    pub fn is_naming(&self) -> bool {
        self.attribute_type.as_deref() == Some(NAMING_ROLE)
    }
}

/// A relationship between classes, optionally carrying an association class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relationship {
    pub id: String,
    pub description: Option<String>,
    pub participants: Vec<Participant>,
    pub association_class: Option<AssociationClass>,
}

impl Relationship {
    /// Promotes the embedded association class to a class definition.
    ///
    /// The synthetic class never inherits and never owns a state machine.
    pub fn association_class_definition(&self) -> Option<ClassDefinition> {
        let assoc = self.association_class.as_ref()?;
        Some(ClassDefinition {
            kind: EntityKind::AssociationClass,
            name: assoc.name.clone(),
            key_letter: assoc.key_letter.clone(),
            inherits_from: None,
            is_abstract: false,
            description: Some(format!("Association class for relationship {}", self.id)),
            attributes: assoc.attributes.clone(),
            state_machine: None,
        })
    }
}

/// One side of a relationship.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Participant {
    pub class_name: String,
    pub role: Option<String>,
    pub multiplicity: Option<String>,
}

/// A class-like entity scoped to a relationship.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssociationClass {
    pub name: String,
    pub key_letter: Option<String>,
    pub attributes: Vec<Attribute>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_role() {
        let naming = Attribute {
            name: "NIM".to_string(),
            attribute_type: Some("naming".to_string()),
            ..Default::default()
        };
        let descriptive = Attribute {
            name: "Alamat".to_string(),
            attribute_type: Some("descriptive".to_string()),
            ..Default::default()
        };
        assert!(naming.is_naming());
        assert!(!descriptive.is_naming());
        assert!(!Attribute::default().is_naming());
    }

    #[test]
    fn test_association_class_promotion() {
        let relationship = Relationship {
            id: "R1".to_string(),
            association_class: Some(AssociationClass {
                name: "KRS".to_string(),
                key_letter: Some("KRS".to_string()),
                attributes: vec![Attribute {
                    name: "krs_id".to_string(),
                    attribute_type: Some("naming".to_string()),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        };

        let class = relationship.association_class_definition().unwrap();
        assert_eq!(class.kind, EntityKind::AssociationClass);
        assert_eq!(class.name, "KRS");
        assert_eq!(class.inherits_from, None);
        assert_eq!(
            class.description.as_deref(),
            Some("Association class for relationship R1")
        );
        assert_eq!(class.naming_attributes().count(), 1);
    }

    #[test]
    fn test_entity_kind_tag() {
        assert_eq!(EntityKind::from_tag(Some("association_class")), EntityKind::AssociationClass);
        assert_eq!(EntityKind::from_tag(Some("class")), EntityKind::Class);
        assert_eq!(EntityKind::from_tag(None), EntityKind::Class);
    }
}
