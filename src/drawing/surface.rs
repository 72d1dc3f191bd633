// DrawingSurface trait and an in-memory implementation

use crate::drawing::feature::{Feature, FeatureId, PropertyValue};
use std::collections::BTreeMap;

/// The drawing surface owns features and exposes per-feature property writes.
///
/// Writes return the surface itself so calls can be chained:
///
/// ```
/// use map_changes::drawing::{DrawingSurface, Feature, FeatureId, InMemorySurface};
///
/// let mut surface = InMemorySurface::new();
/// surface.insert_feature(Feature::new("f-1"));
///
/// let id = FeatureId::new("f-1");
/// surface
///     .set_feature_property(&id, "name", "Main street".into())
///     .set_feature_property(&id, "approved", "false".into());
///
/// assert_eq!(surface.mutations().len(), 2);
/// ```
pub trait DrawingSurface {
    /// Write a property on the feature with the given id
    fn set_feature_property(&mut self, id: &FeatureId, key: &str, value: PropertyValue)
    -> &mut Self;

    /// Look up a feature by id
    fn feature(&self, id: &FeatureId) -> Option<&Feature>;
}

/// One recorded call to `set_feature_property`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMutation {
    pub feature_id: FeatureId,
    pub key: String,
    pub value: PropertyValue,
    /// False when the feature id was unknown to the surface
    pub applied: bool,
}

/// Surface that keeps features in memory and records every write in call order
#[derive(Debug, Default)]
pub struct InMemorySurface {
    features: BTreeMap<FeatureId, Feature>,
    mutations: Vec<PropertyMutation>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a feature, as the drawing library does on draw.create
    pub fn insert_feature(&mut self, feature: Feature) {
        self.features.insert(feature.id.clone(), feature);
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    /// All writes issued so far, oldest first
    pub fn mutations(&self) -> &[PropertyMutation] {
        &self.mutations
    }

    pub fn clear_mutations(&mut self) {
        self.mutations.clear();
    }
}

impl DrawingSurface for InMemorySurface {
    fn set_feature_property(
        &mut self,
        id: &FeatureId,
        key: &str,
        value: PropertyValue,
    ) -> &mut Self {
        let applied = match self.features.get_mut(id) {
            Some(feature) => {
                feature.properties.insert(key.to_string(), value.clone());
                true
            }
            None => {
                log::warn!("set_feature_property on unknown feature {}", id);
                false
            }
        };

        self.mutations.push(PropertyMutation {
            feature_id: id.clone(),
            key: key.to_string(),
            value,
            applied,
        });

        self
    }

    fn feature(&self, id: &FeatureId) -> Option<&Feature> {
        self.features.get(id)
    }
}
