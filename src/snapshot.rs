//! Snapshot: serializable value copy of one persisted record.
//!
//! A snapshot is its identifier plus a field map. Relationship fields hold
//! identifiers of related snapshots (`ToOne` / `ToMany`); everything else is an
//! opaque JSON attribute. Snapshots are never mutated after construction: the
//! store derives new copies via [`Snapshot::copy`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::identifier::PersistentIdentifier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Attribute(serde_json::Value),
    ToOne(Option<PersistentIdentifier>),
    ToMany(Vec<PersistentIdentifier>),
}

impl FieldValue {
    pub fn attribute(v: impl Into<serde_json::Value>) -> Self {
        Self::Attribute(v.into())
    }

    pub fn to_one(id: Option<PersistentIdentifier>) -> Self {
        Self::ToOne(id)
    }

    pub fn to_many(ids: impl IntoIterator<Item = PersistentIdentifier>) -> Self {
        Self::ToMany(ids.into_iter().collect())
    }

    pub fn as_attribute(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Attribute(v) => Some(v),
            _ => None,
        }
    }

    /// Identifiers referenced by this value (empty for attributes).
    pub fn references(&self) -> impl Iterator<Item = &PersistentIdentifier> {
        let one = match self {
            Self::ToOne(id) => id.as_ref(),
            _ => None,
        };
        let many: &[PersistentIdentifier] = match self {
            Self::ToMany(ids) => ids,
            _ => &[],
        };
        one.into_iter().chain(many)
    }

    fn remapped(&self, remapped: &HashMap<PersistentIdentifier, PersistentIdentifier>) -> Self {
        let swap = |id: &PersistentIdentifier| remapped.get(id).unwrap_or(id).clone();
        match self {
            Self::Attribute(v) => Self::Attribute(v.clone()),
            Self::ToOne(id) => Self::ToOne(id.as_ref().map(swap)),
            Self::ToMany(ids) => Self::ToMany(ids.iter().map(swap).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    persistent_identifier: PersistentIdentifier,
    #[serde(default)]
    fields: BTreeMap<String, FieldValue>,
}

impl Snapshot {
    pub fn new(persistent_identifier: PersistentIdentifier) -> Self {
        Self {
            persistent_identifier,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn persistent_identifier(&self) -> &PersistentIdentifier {
        &self.persistent_identifier
    }

    pub fn entity_name(&self) -> &str {
        &self.persistent_identifier.entity_name
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// All identifiers referenced by relationship fields.
    pub fn references(&self) -> impl Iterator<Item = &PersistentIdentifier> {
        self.fields.values().flat_map(FieldValue::references)
    }

    /// New copy under `persistent_identifier`, with every relationship
    /// reference found in `remapped` substituted. Unknown references stay.
    pub fn copy(
        &self,
        persistent_identifier: PersistentIdentifier,
        remapped: &HashMap<PersistentIdentifier, PersistentIdentifier>,
    ) -> Self {
        Self {
            persistent_identifier,
            fields: self
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), v.remapped(remapped)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(entity: &str, key: &str) -> PersistentIdentifier {
        PersistentIdentifier::permanent("s.json", entity, key)
    }

    #[test]
    fn copy_rewrites_only_known_references() {
        let t1 = PersistentIdentifier::temporary("Author", "t1");
        let existing = id("Author", "old");
        let perm = id("Author", "new");

        let snap = Snapshot::new(PersistentIdentifier::temporary("Book", "t2"))
            .with_field("title", FieldValue::attribute("Emma"))
            .with_field("author", FieldValue::to_one(Some(t1.clone())))
            .with_field("coauthors", FieldValue::to_many([t1.clone(), existing.clone()]));

        let mut table = HashMap::new();
        table.insert(t1.clone(), perm.clone());

        let copy = snap.copy(id("Book", "b"), &table);
        assert_eq!(copy.persistent_identifier(), &id("Book", "b"));
        assert_eq!(copy.field("author"), Some(&FieldValue::ToOne(Some(perm.clone()))));
        assert_eq!(
            copy.field("coauthors"),
            Some(&FieldValue::ToMany(vec![perm, existing]))
        );
        assert_eq!(copy.field("title").and_then(FieldValue::as_attribute), Some(&json!("Emma")));
        // source snapshot untouched
        assert_eq!(snap.field("author"), Some(&FieldValue::ToOne(Some(t1))));
    }

    #[test]
    fn json_shape_is_tagged() {
        let snap = Snapshot::new(id("Person", "k"))
            .with_field("name", FieldValue::attribute("Alice"))
            .with_field("friend", FieldValue::to_one(None));
        let v = serde_json::to_value(&snap).unwrap();
        assert_eq!(v["persistentIdentifier"]["entityName"], json!("Person"));
        assert_eq!(v["fields"]["name"], json!({"kind": "attribute", "value": "Alice"}));
        assert_eq!(v["fields"]["friend"], json!({"kind": "toOne", "value": null}));
    }

    #[test]
    fn references_cover_to_one_and_to_many() {
        let snap = Snapshot::new(id("Window", "w"))
            .with_field("title", FieldValue::attribute("Main"))
            .with_field("app", FieldValue::to_one(Some(id("App", "a"))))
            .with_field("children", FieldValue::to_many([id("Button", "b"), id("Field", "f")]));
        let refs: Vec<_> = snap.references().map(|r| r.primary_key.as_str()).collect();
        assert_eq!(refs.len(), 3);
        assert!(refs.contains(&"a") && refs.contains(&"b") && refs.contains(&"f"));
    }
}
