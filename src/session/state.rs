// EditSessionState - state shared between the map canvas and the attribute panel

use crate::drawing::Feature;
use crate::session::form::AttributeForm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared editing state
///
/// Only mutated through [`EditSession::commit`] and [`EditSession::commit_batch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSessionState {
    pub attribute_form: AttributeForm,
    pub is_attribute_form_valid: bool,
    pub selected_feature: Option<Feature>,
    /// True while the user is in edit mode
    pub edition_status: bool,
}

/// Named transitions of the edit session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    UpdateSelectedFeature(Feature),
    UpdateAttributeFormValidity(bool),
    UpdateEditionStatus(bool),
    SetAttributeForm(AttributeForm),
    ClearAttributeForm,
}

impl SessionUpdate {
    fn apply(&self, state: &mut EditSessionState) {
        match self {
            SessionUpdate::UpdateSelectedFeature(feature) => {
                state.selected_feature = Some(feature.clone());
            }
            SessionUpdate::UpdateAttributeFormValidity(valid) => {
                state.is_attribute_form_valid = *valid;
            }
            SessionUpdate::UpdateEditionStatus(status) => {
                state.edition_status = *status;
            }
            SessionUpdate::SetAttributeForm(form) => {
                state.attribute_form = form.clone();
            }
            SessionUpdate::ClearAttributeForm => {
                state.attribute_form.clear();
            }
        }
    }
}

/// Receives every committed transition after it has been applied
pub trait SessionObserver {
    /// Called once per commit with the state as it is after all `updates`
    fn on_transition(&self, state: &EditSessionState, updates: &[SessionUpdate]);
}

/// Edit session state plus the observers watching it
#[derive(Default)]
pub struct EditSession {
    state: EditSessionState,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: EditSessionState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &EditSessionState {
        &self.state
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Apply a single named transition
    pub fn commit(&mut self, update: SessionUpdate) {
        self.commit_batch(vec![update]);
    }

    /// Apply several transitions as one
    ///
    /// Observers are notified once, after every update has been applied.
    pub fn commit_batch(&mut self, updates: Vec<SessionUpdate>) {
        if updates.is_empty() {
            return;
        }

        for update in &updates {
            update.apply(&mut self.state);
        }

        for observer in &self.observers {
            observer.on_transition(&self.state, &updates);
        }
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        seen: Rc<RefCell<Vec<(EditSessionState, usize)>>>,
    }

    impl SessionObserver for Recorder {
        fn on_transition(&self, state: &EditSessionState, updates: &[SessionUpdate]) {
            self.seen.borrow_mut().push((state.clone(), updates.len()));
        }
    }

    fn filled_form() -> AttributeForm {
        AttributeForm {
            name: "Canal".to_string(),
            feature_type: "waterway".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_commit_single_update() {
        let mut session = EditSession::new();
        session.commit(SessionUpdate::UpdateEditionStatus(true));
        assert!(session.state().edition_status);
    }

    #[test]
    fn test_batch_notifies_once_with_final_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = EditSession::with_state(EditSessionState {
            attribute_form: filled_form(),
            is_attribute_form_valid: true,
            selected_feature: None,
            edition_status: true,
        });
        session.subscribe(Box::new(Recorder { seen: seen.clone() }));

        session.commit_batch(vec![
            SessionUpdate::UpdateAttributeFormValidity(false),
            SessionUpdate::UpdateEditionStatus(false),
            SessionUpdate::ClearAttributeForm,
        ]);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let (state, count) = &seen[0];
        assert_eq!(*count, 3);
        assert!(!state.is_attribute_form_valid);
        assert!(!state.edition_status);
        assert!(state.attribute_form.is_empty());
    }

    #[test]
    fn test_empty_batch_is_silent() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = EditSession::new();
        session.subscribe(Box::new(Recorder { seen: seen.clone() }));

        session.commit_batch(Vec::new());
        assert!(seen.borrow().is_empty());
    }
}
