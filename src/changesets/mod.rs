// Change sets - server-synced groups of logged changes
//
// The remote service is a collaborator behind the ChangeSetService trait.
// ChangeSetStore caches what was last fetched and tracks a loading flag.

pub mod service;
pub mod store;
pub mod types;

pub use service::{ChangeSetService, InMemoryChangeSetService};
pub use store::{ChangeSetStore, LoadStatus};
pub use types::{Change, ChangeSet};

/// Result type for change-set operations
pub type ChangeSetResult<T> = Result<T, ChangeSetError>;

/// Change-set error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangeSetError {
    #[error("Change set service error: {0}")]
    Service(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
