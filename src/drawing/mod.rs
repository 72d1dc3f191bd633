// Drawing surface - the map canvas that owns geometry features
//
// The change dispatcher never creates or destroys features. It only asks the
// surface to write properties on a feature identified by id.

pub mod feature;
pub mod surface;

pub use feature::{Feature, FeatureId, PropertyValue};
pub use surface::{DrawingSurface, InMemorySurface, PropertyMutation};
