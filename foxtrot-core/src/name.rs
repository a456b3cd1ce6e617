use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified dotted variable name split into group and field
///
/// `BUILDING.ROOM1.LIGHT.GTSAP1_LIGHT_VALUE` has the group
/// `BUILDING.ROOM1.LIGHT` and the field `GTSAP1_LIGHT_VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariableName {
    group: String,
    field: String,
}

impl VariableName {
    pub fn new(group: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            field: field.into(),
        }
    }

    /// Split a dotted name on its last `.`
    ///
    /// Returns `None` for single-segment names, which belong to no group.
    pub fn parse(name: &str) -> Option<Self> {
        let (group, field) = name.rsplit_once('.')?;
        Some(Self::new(group, field))
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Field names ending in `_VALUE` or `_VALUESET` carry live values
    pub fn is_quick(&self) -> bool {
        self.field.ends_with("_VALUE") || self.field.ends_with("_VALUESET")
    }

    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.field)
    }
}
