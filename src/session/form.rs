// AttributeForm - user-entered metadata pending approval

use serde::{Deserialize, Serialize};

/// Attributes entered by the user for the feature being drawn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeForm {
    pub name: String,
    pub mapped_from: String,
    pub mapped_to: String,
    #[serde(rename = "type")]
    pub feature_type: String,
    pub tags: Vec<String>,
}

impl AttributeForm {
    /// Reset every field to its empty value
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
