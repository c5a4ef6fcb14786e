//! Logical schema: the entity types a store holds.
//!
//! The store itself is type-agnostic; the schema only has to be present at
//! construction time and is consulted for inheritance when a fetch asks for
//! sub-entities. Inheritance is flat data: each descriptor names its optional
//! super-entity, and a snapshot's entity name is the discriminant.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_entity: Option<String>,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_entity: None,
        }
    }

    pub fn inheriting(name: impl Into<String>, super_entity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_entity: Some(super_entity.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    entities: BTreeMap<String, EntityDescriptor>,
}

impl Schema {
    pub fn new<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = EntityDescriptor>,
    {
        Self {
            entities: entities.into_iter().map(|e| (e.name.clone(), e)).collect(),
        }
    }

    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn entity(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities.get(name)
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// true if `entity` is `ancestor` or inherits from it (directly or not).
    /// Malformed cyclic hierarchies terminate.
    pub fn is_kind_of(&self, entity: &str, ancestor: &str) -> bool {
        let mut seen = HashSet::new();
        let mut cur = Some(entity);
        while let Some(name) = cur {
            if name == ancestor {
                return true;
            }
            if !seen.insert(name) {
                return false;
            }
            cur = self
                .entities
                .get(name)
                .and_then(|e| e.super_entity.as_deref());
        }
        false
    }

    /// `name` plus every schema entity that inherits from it.
    pub fn sub_entities_of(&self, name: &str) -> HashSet<String> {
        let mut out: HashSet<String> = self
            .entities
            .keys()
            .filter(|e| self.is_kind_of(e, name))
            .cloned()
            .collect();
        out.insert(name.to_string());
        out
    }
}

/// Reserved hook for schema evolution. Stores accept a plan and ignore it.
pub trait MigrationPlan {
    /// Schema versions the plan migrates through, oldest first.
    fn schemas(&self) -> Vec<Schema> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_schema() -> Schema {
        Schema::new([
            EntityDescriptor::new("App"),
            EntityDescriptor::new("Window"),
            EntityDescriptor::new("Component"),
            EntityDescriptor::inheriting("Button", "Component"),
            EntityDescriptor::inheriting("Field", "Component"),
        ])
    }

    #[test]
    fn sub_entities_follow_super_links() {
        let s = ui_schema();
        let subs = s.sub_entities_of("Component");
        assert_eq!(subs.len(), 3);
        assert!(subs.contains("Button") && subs.contains("Field") && subs.contains("Component"));
        assert_eq!(s.sub_entities_of("App").len(), 1);
        assert!(s.is_kind_of("Button", "Component"));
        assert!(!s.is_kind_of("Component", "Button"));
    }

    #[test]
    fn cyclic_hierarchy_terminates() {
        let s = Schema::new([
            EntityDescriptor::inheriting("A", "B"),
            EntityDescriptor::inheriting("B", "A"),
        ]);
        assert!(s.is_kind_of("A", "B"));
        assert!(!s.is_kind_of("A", "C"));
    }
}
