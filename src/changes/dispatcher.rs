// ChangeDispatcher - apply a change event to the surface and the edit session

use crate::changes::action::{ChangeAction, ChangeType};
use crate::changes::error::{ChangeError, ChangeResult};
use crate::changes::history::{ChangeLog, LayerId};
use crate::drawing::{DrawingSurface, Feature, FeatureId, PropertyValue};
use crate::session::{AttributeForm, EditSession, SessionUpdate};

/// Value written to `approved` on every attributed feature.
/// Kept as a string for compatibility with the stored feature collections.
pub const APPROVED_PENDING: &str = "false";

/// Dispatcher switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Append every accepted action to the change log
    pub log_changes: bool,
    /// Reject unknown change types with `InvalidChangeType` instead of ignoring them
    pub strict_change_types: bool,
}

/// Everything the dispatcher reads or mutates while handling one action
pub struct DispatchContext<'a, S: DrawingSurface> {
    pub current_layer: Option<&'a LayerId>,
    pub session: &'a mut EditSession,
    pub surface: &'a mut S,
    pub log: &'a mut ChangeLog,
}

/// What a dispatch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// draw.create handled; `attributed` is false when the form was not valid
    Created { feature: FeatureId, attributed: bool },
    /// draw.update handled
    Updated { feature: FeatureId },
    /// Unknown change type, nothing was touched
    Ignored { change_type: String },
}

/// Interprets change events
#[derive(Debug, Clone, Default)]
pub struct ChangeDispatcher {
    config: DispatcherConfig,
}

impl ChangeDispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Apply one change event
    ///
    /// Only the first feature of the action is acted on.
    ///
    /// # Errors
    /// - `InvalidChangeAction` if the action has no features or the first one has an empty id
    /// - `InvalidChangeType` for unknown types when `strict_change_types` is set
    /// - `VersionOverflow` when logging is on and the log cannot take another entry
    pub fn apply_change<S: DrawingSurface>(
        &self,
        mut action: ChangeAction,
        ctx: DispatchContext<'_, S>,
    ) -> ChangeResult<DispatchOutcome> {
        let feature = validate(&action)?.clone();

        // Fail before touching the surface if the entry could not be logged
        if self.config.log_changes {
            ctx.log.next_version()?;
        }

        if action.features.len() > 1 {
            log::debug!(
                "{} carries {} features, only {} is applied",
                action.change_type,
                action.features.len(),
                feature.id
            );
        }

        let outcome = match &action.change_type {
            ChangeType::Create => {
                // Surface-owned object, must not outlive this call
                drop(action.target.take());
                Self::apply_create(feature, ctx.session, ctx.surface)
            }
            ChangeType::Update => {
                let form = ctx.session.state().attribute_form.clone();
                write_attributes(ctx.surface, &feature.id, &form);
                DispatchOutcome::Updated { feature: feature.id }
            }
            ChangeType::Other(name) => {
                if self.config.strict_change_types {
                    return Err(ChangeError::InvalidChangeType(name.clone()));
                }
                log::warn!("ignoring unrecognized change type {}", name);
                DispatchOutcome::Ignored {
                    change_type: name.clone(),
                }
            }
        };

        if self.config.log_changes {
            action.target = None;
            ctx.log.record(action, ctx.current_layer.cloned())?;
        }

        Ok(outcome)
    }

    fn apply_create<S: DrawingSurface>(
        feature: Feature,
        session: &mut EditSession,
        surface: &mut S,
    ) -> DispatchOutcome {
        let id = feature.id.clone();
        session.commit(SessionUpdate::UpdateSelectedFeature(feature));

        if !session.state().is_attribute_form_valid {
            return DispatchOutcome::Created {
                feature: id,
                attributed: false,
            };
        }

        let form = session.state().attribute_form.clone();
        write_attributes(surface, &id, &form);

        session.commit_batch(vec![
            SessionUpdate::UpdateAttributeFormValidity(false),
            SessionUpdate::UpdateEditionStatus(false),
            SessionUpdate::ClearAttributeForm,
        ]);

        DispatchOutcome::Created {
            feature: id,
            attributed: true,
        }
    }
}

fn validate(action: &ChangeAction) -> ChangeResult<&Feature> {
    let feature = action.primary_feature().ok_or_else(|| {
        ChangeError::InvalidChangeAction(format!("{} has no features", action.change_type))
    })?;

    if feature.id.as_str().is_empty() {
        return Err(ChangeError::InvalidChangeAction(format!(
            "{} feature has an empty id",
            action.change_type
        )));
    }

    Ok(feature)
}

/// Write the form's attributes to a feature, then reset its approval
fn write_attributes<S: DrawingSurface>(surface: &mut S, id: &FeatureId, form: &AttributeForm) {
    surface
        .set_feature_property(id, "name", PropertyValue::from(form.name.clone()))
        .set_feature_property(id, "mappedFrom", PropertyValue::from(form.mapped_from.clone()))
        .set_feature_property(id, "mappedTo", PropertyValue::from(form.mapped_to.clone()))
        .set_feature_property(id, "type", PropertyValue::from(form.feature_type.clone()))
        .set_feature_property(id, "tags", PropertyValue::from(form.tags.clone()))
        .set_feature_property(id, "approved", PropertyValue::from(APPROVED_PENDING));
}
