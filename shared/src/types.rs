//! Common types for the shared crate

use serde::{Deserialize, Serialize};

/// Server-side property identifier (SQL INTEGER primary key)
pub type PropertyId = i64;

/// Whether a form session creates a new listing or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit(PropertyId),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    /// Property id being edited, `None` in create mode
    pub fn property_id(&self) -> Option<PropertyId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for FormMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Edit(id) => write!(f, "edit({id})"),
        }
    }
}
