//! Discovered variable namespace
//!
//! A [`Namespace`] is the immutable snapshot produced by one `LIST`
//! discovery: the ordered variable catalog, the wire type of every field
//! per group, and the classified (still value-less) entities.

use crate::entity::{Entity, EntityKind, EntityMap};
use crate::name::VariableName;
use crate::wire::WireType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields of one group and their wire types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub fields: BTreeMap<String, WireType>,
}

impl Group {
    pub fn wire_type(&self, field: &str) -> Option<&WireType> {
        self.fields.get(field)
    }
}

/// Ordered list of discovered variable names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCatalog {
    /// Every variable, in first-seen order
    pub all: Vec<String>,
    /// Value-carrying variables (`_VALUE` / `_VALUESET`), in first-seen order
    pub quick: Vec<String>,
}

impl VariableCatalog {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }
}

/// Snapshot of one discovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub catalog: VariableCatalog,
    pub groups: BTreeMap<String, Group>,
    /// Classified entities with no values read yet
    pub entities: EntityMap,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one discovered variable
    ///
    /// A field announced twice keeps a single catalog slot and the most
    /// recent wire type.
    pub fn record(&mut self, variable: &VariableName, wire_type: WireType) {
        let group = self.groups.entry(variable.group().to_string()).or_default();
        let first_seen = group
            .fields
            .insert(variable.field().to_string(), wire_type)
            .is_none();

        let entity = self
            .entities
            .entry(variable.group().to_string())
            .or_insert_with(Entity::default);
        if let Some(kind) = EntityKind::classify(variable.group(), variable.field()) {
            entity.classify(kind);
        }

        if first_seen {
            let full_name = variable.full_name();
            if variable.is_quick() {
                self.catalog.quick.push(full_name.clone());
            }
            self.catalog.all.push(full_name);
        }
    }

    /// Wire type of a discovered variable
    pub fn wire_type(&self, variable: &VariableName) -> Option<&WireType> {
        self.groups.get(variable.group())?.wire_type(variable.field())
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Fresh entity map seeded with the discovered classifications
    pub fn entity_skeleton(&self) -> EntityMap {
        self.entities
            .iter()
            .map(|(group, entity)| (group.clone(), Entity::new(entity.kind)))
            .collect()
    }
}
