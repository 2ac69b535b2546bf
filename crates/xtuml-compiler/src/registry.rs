//! Name-keyed index over every class of a model.
//!
//! The registry borrows from the model; it never owns or clones class
//! definitions. When a name is declared twice, the first declaration wins.

use std::collections::{HashMap, HashSet};

use crate::model::{Attribute, ClassDefinition, Domain, Model};

/// Class lookup table used while generating code.
#[derive(Debug)]
pub struct ClassRegistry<'m> {
    classes: HashMap<&'m str, (&'m Domain, &'m ClassDefinition)>,
    duplicates: Vec<&'m str>,
}

impl<'m> ClassRegistry<'m> {
    /// Indexes every class declared directly in a domain.
    ///
    /// Association classes are not registered; nothing can inherit from them.
    pub fn new(model: &'m Model) -> Self {
        let mut classes = HashMap::new();
        let mut duplicates = Vec::new();

        for (domain, class) in model.classes() {
            if classes.contains_key(class.name.as_str()) {
                if !duplicates.contains(&class.name.as_str()) {
                    duplicates.push(class.name.as_str());
                }
                continue;
            }
            classes.insert(class.name.as_str(), (domain, class));
        }

        Self {
            classes,
            duplicates,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'m ClassDefinition> {
        self.classes.get(name).map(|(_, class)| *class)
    }

    /// The domain a class was declared in.
    pub fn domain_of(&self, name: &str) -> Option<&'m Domain> {
        self.classes.get(name).map(|(domain, _)| *domain)
    }

    /// Names declared more than once, in order of their second appearance.
    pub fn duplicate_names(&self) -> &[&'m str] {
        &self.duplicates
    }

    /// The immediate parent of a class, if it names a known class.
    pub fn parent(&self, class: &ClassDefinition) -> Option<&'m ClassDefinition> {
        class.inherits_from.as_deref().and_then(|name| self.get(name))
    }

    /// Ancestors of a class, nearest first.
    ///
    /// Stops at the first unknown parent or at the first class already seen,
    /// so cyclic chains terminate.
    pub fn ancestors(&self, class: &ClassDefinition) -> Vec<&'m ClassDefinition> {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(class.name.as_str());

        let mut chain = Vec::new();
        let mut current = self.parent(class);
        while let Some(parent) = current {
            if !seen.insert(parent.name.as_str()) {
                break;
            }
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// True when following `inherits_from` from this class revisits a class.
    pub fn has_inheritance_cycle(&self, class: &ClassDefinition) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(class.name.as_str());

        let mut current = self.parent(class);
        while let Some(parent) = current {
            if !seen.insert(parent.name.as_str()) {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Naming attributes contributed by the ancestors, oldest ancestor first.
    ///
    /// These are the leading constructor parameters of the class and the
    /// exact arguments of its `super(...)` call.
    pub fn inherited_naming_attributes(&self, class: &ClassDefinition) -> Vec<&'m Attribute> {
        self.ancestors(class)
            .into_iter()
            .rev()
            .flat_map(|ancestor| ancestor.naming_attributes())
            .collect()
    }

    /// Whether the attribute is declared on the class or any of its ancestors.
    pub fn has_attribute(&self, class: &ClassDefinition, name: &str) -> bool {
        class.attribute(name).is_some()
            || self
                .ancestors(class)
                .iter()
                .any(|ancestor| ancestor.attribute(name).is_some())
    }
}
