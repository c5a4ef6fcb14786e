//! Persistent identifiers: (store identifier, entity name, primary key).
//!
//! Two flavors:
//! - temporary: handed in by the caller for records that do not exist yet;
//!   valid for one save batch and never written to disk;
//! - permanent: minted by the store at insert time (primary key = UUID v4).
//!
//! The flavor is an explicit flag; it is serialized only when set, so a
//! backing document only ever contains the three-field form.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentIdentifier {
    pub store_identifier: String,
    pub entity_name: String,
    pub primary_key: String,
    #[serde(default, skip_serializing_if = "is_false")]
    temporary: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl PersistentIdentifier {
    /// Permanent identifier with an explicit primary key.
    pub fn permanent(
        store_identifier: impl Into<String>,
        entity_name: impl Into<String>,
        primary_key: impl Into<String>,
    ) -> Self {
        Self {
            store_identifier: store_identifier.into(),
            entity_name: entity_name.into(),
            primary_key: primary_key.into(),
            temporary: false,
        }
    }

    /// Caller-side identifier for a record that has not been saved yet.
    /// The store identifier is left empty; only entity name and key matter.
    pub fn temporary(entity_name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            store_identifier: String::new(),
            entity_name: entity_name.into(),
            primary_key: primary_key.into(),
            temporary: true,
        }
    }

    /// Mint a fresh permanent identifier for `entity_name` in `store_identifier`.
    pub fn generate(store_identifier: &str, entity_name: &str) -> Self {
        Self::permanent(store_identifier, entity_name, Uuid::new_v4().to_string())
    }

    #[inline]
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }
}

impl fmt::Display for PersistentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.temporary {
            write!(f, "{}/{} (temporary)", self.entity_name, self.primary_key)
        } else {
            write!(
                f,
                "{}:{}/{}",
                self.store_identifier, self.entity_name, self.primary_key
            )
        }
    }
}
