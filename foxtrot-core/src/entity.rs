//! Entity model
//!
//! A group of dotted variables is aggregated into one [`Entity`]. The
//! entity kind is inferred from naming conventions of the controller's
//! function blocks, and field values are folded into named attributes.

use crate::wire::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Entities keyed by group name
pub type EntityMap = BTreeMap<String, Entity>;

/// Entity classification
///
/// Variants are declared in rule priority order; a lower variant wins when
/// several fields of one group match different rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Light,
    Pir,
    Jalousie,
    Temp,
    Relay,
    Display,
    Action,
}

impl EntityKind {
    /// Classify one `group.field` pair; the first matching rule wins
    pub fn classify(group: &str, field: &str) -> Option<Self> {
        const LIGHT_SUFFIXES: [&str; 4] = [".LIGHT", ".LIGHT1", ".LIGHT2", ".LIGHT3"];

        if LIGHT_SUFFIXES.iter().any(|suffix| group.ends_with(suffix)) {
            Some(EntityKind::Light)
        } else if group.ends_with(".PIR") {
            Some(EntityKind::Pir)
        } else if group.ends_with(".JALOUSIE") {
            Some(EntityKind::Jalousie)
        } else if group.ends_with(".TIMEPROGCONTROL") {
            Some(EntityKind::Temp)
        } else {
            match field {
                "GTSAP1_RELAY_NAME" => Some(EntityKind::Relay),
                "GTSAP1_DISPLAY_EDIT" => Some(EntityKind::Display),
                "GTSAP1_ACTION_EXEC" => Some(EntityKind::Action),
                _ => None,
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Light => "light",
            EntityKind::Pir => "pir",
            EntityKind::Jalousie => "jalousie",
            EntityKind::Temp => "temp",
            EntityKind::Relay => "relay",
            EntityKind::Display => "display",
            EntityKind::Action => "action",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic attribute a field is folded into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    Enable,
    Edit,
    Unit,
    Value,
    /// Unrecognized field, kept under its raw field name
    Other(String),
}

impl Attribute {
    /// Map a field name to its attribute by suffix
    pub fn for_field(field: &str) -> Self {
        if field.ends_with("_NAME") {
            Attribute::Name
        } else if field.ends_with("_ENABLE") {
            Attribute::Enable
        } else if field.ends_with("_EDIT") {
            Attribute::Edit
        } else if field.ends_with("_UNIT") {
            Attribute::Unit
        } else if field.ends_with("_VALUE") || field.ends_with("_VALUESET") {
            Attribute::Value
        } else {
            Attribute::Other(field.to_string())
        }
    }
}

/// Classified, attribute-bearing aggregation of one group's fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntityKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Fields with no semantic attribute, keyed by field name
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Entity {
    pub fn new(kind: Option<EntityKind>) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Record a classification, keeping the higher-priority kind
    pub fn classify(&mut self, kind: EntityKind) {
        self.kind = Some(match self.kind {
            Some(current) => current.min(kind),
            None => kind,
        });
    }

    /// Store a decoded field value under its semantic attribute
    pub fn apply(&mut self, field: &str, value: Value) {
        match Attribute::for_field(field) {
            Attribute::Name => self.name = Some(value),
            Attribute::Enable => self.enable = Some(value),
            Attribute::Edit => self.edit = Some(value),
            Attribute::Unit => self.unit = Some(value),
            Attribute::Value => self.value = Some(value),
            Attribute::Other(field) => {
                self.fields.insert(field, value);
            }
        }
    }

    pub fn attribute(&self, attribute: &Attribute) -> Option<&Value> {
        match attribute {
            Attribute::Name => self.name.as_ref(),
            Attribute::Enable => self.enable.as_ref(),
            Attribute::Edit => self.edit.as_ref(),
            Attribute::Unit => self.unit.as_ref(),
            Attribute::Value => self.value.as_ref(),
            Attribute::Other(field) => self.fields.get(field),
        }
    }
}
