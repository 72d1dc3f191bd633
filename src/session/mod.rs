// Edit session - shared state touched by the change dispatcher
//
// Holds the attribute form, its validity flag, the selected feature and the
// edit-mode flag. Every change goes through a named SessionUpdate so that
// observers can react to each transition.

pub mod form;
pub mod state;

pub use form::AttributeForm;
pub use state::{EditSession, EditSessionState, SessionObserver, SessionUpdate};
