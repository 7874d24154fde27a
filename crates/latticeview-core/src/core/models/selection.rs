use serde::{Deserialize, Serialize};

/// The part of a system currently selected for display, described by its
/// structural type (e.g. `bulk`, `molecule`, `group`) and the types of its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Selection {
    pub structural_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_types: Vec<String>,
}

impl Selection {
    pub fn new(structural_type: impl Into<String>) -> Self {
        Self {
            structural_type: structural_type.into(),
            child_types: Vec::new(),
        }
    }

    pub fn with_children<I, S>(mut self, child_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.child_types = child_types.into_iter().map(Into::into).collect();
        self
    }
}
