// ChangeAction - one edit event emitted by the drawing surface

use crate::drawing::Feature;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

pub const DRAW_CREATE: &str = "draw.create";
pub const DRAW_UPDATE: &str = "draw.update";

/// Kind of edit
///
/// Serialized as the drawing library's event name. Unknown names are kept
/// verbatim in `Other` so they can be reported or logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeType {
    Create,
    Update,
    Other(String),
}

impl ChangeType {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeType::Create => DRAW_CREATE,
            ChangeType::Update => DRAW_UPDATE,
            ChangeType::Other(name) => name,
        }
    }
}

impl From<String> for ChangeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            DRAW_CREATE => ChangeType::Create,
            DRAW_UPDATE => ChangeType::Update,
            _ => ChangeType::Other(value),
        }
    }
}

impl From<&str> for ChangeType {
    fn from(value: &str) -> Self {
        ChangeType::from(value.to_string())
    }
}

impl From<ChangeType> for String {
    fn from(value: ChangeType) -> Self {
        match value {
            ChangeType::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle into the drawing surface's own object graph
///
/// Only meaningful while the event is being handled. Never serialized and
/// never copied into the change log.
pub struct SurfaceTarget(Box<dyn Any + Send>);

impl SurfaceTarget {
    pub fn new<T: Any + Send>(target: T) -> Self {
        Self(Box::new(target))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for SurfaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SurfaceTarget(..)")
    }
}

/// An edit event
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeAction {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(skip)]
    pub target: Option<SurfaceTarget>,
}

impl ChangeAction {
    pub fn new(change_type: impl Into<ChangeType>, features: Vec<Feature>) -> Self {
        Self {
            change_type: change_type.into(),
            features,
            target: None,
        }
    }

    pub fn create(feature: Feature) -> Self {
        Self::new(ChangeType::Create, vec![feature])
    }

    pub fn update(feature: Feature) -> Self {
        Self::new(ChangeType::Update, vec![feature])
    }

    pub fn with_target(mut self, target: SurfaceTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// The feature the dispatcher acts on
    pub fn primary_feature(&self) -> Option<&Feature> {
        self.features.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_type_from_wire_name() {
        assert_eq!(ChangeType::from("draw.create"), ChangeType::Create);
        assert_eq!(ChangeType::from("draw.update"), ChangeType::Update);
        assert_eq!(
            ChangeType::from("draw.delete"),
            ChangeType::Other("draw.delete".to_string())
        );
    }

    #[test]
    fn test_action_json_skips_target() {
        let action = ChangeAction::create(Feature::new("f-9")).with_target(SurfaceTarget::new(7u32));
        let json = serde_json::to_string(&action).unwrap();

        assert!(json.contains(r#""type":"draw.create""#));
        assert!(!json.contains("target"));

        let back: ChangeAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.change_type, ChangeType::Create);
        assert!(back.target.is_none());
    }

    #[test]
    fn test_action_without_features_key_parses_empty() {
        let action: ChangeAction = serde_json::from_str(r#"{"type":"draw.update"}"#).unwrap();

        assert_eq!(action.change_type, ChangeType::Update);
        assert!(action.features.is_empty());
        assert!(action.primary_feature().is_none());
    }

    #[test]
    fn test_target_downcast() {
        let target = SurfaceTarget::new(String::from("draw-instance"));
        assert_eq!(target.downcast_ref::<String>().map(String::as_str), Some("draw-instance"));
        assert!(target.downcast_ref::<u32>().is_none());
    }
}
