// Map Changes - change dispatch and undo history for live map drawing edits

pub mod changes;
pub mod changesets;
pub mod config;
pub mod drawing;
pub mod editor;
pub mod messaging;
pub mod session;
pub mod users;

// Re-export commonly used types for convenience
pub use changes::{
    ChangeAction, ChangeDispatcher, ChangeError, ChangeLog, ChangeLogEntry, ChangeType,
    DispatcherConfig, LayerId, PendingUndo, RevertStrategy, UndoCoordinator,
};
pub use config::EditorConfig;
pub use drawing::{DrawingSurface, Feature, FeatureId, InMemorySurface, PropertyValue};
pub use editor::MapEditor;
pub use messaging::channels::create_notification_channel;
pub use session::{AttributeForm, EditSession, EditSessionState, SessionUpdate};
