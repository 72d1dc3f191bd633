// Errors surfaced by change dispatch and undo

/// Result type for change operations
pub type ChangeResult<T> = Result<T, ChangeError>;

/// Errors that can occur while applying or undoing a change
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangeError {
    /// The action type is not one the dispatcher knows (strict mode only)
    #[error("Invalid change type: {0}")]
    InvalidChangeType(String),

    /// The action is malformed (no features, empty feature id)
    #[error("Invalid change action: {0}")]
    InvalidChangeAction(String),

    /// Undo was requested with nothing in the change log
    #[error("There is nothing more to undo")]
    EmptyUndoHistory,

    /// The history already holds the highest representable version
    #[error("Change log version space exhausted")]
    VersionOverflow,

    /// The revert strategy could not invert a staged change
    #[error("Revert failed: {0}")]
    RevertFailed(String),
}
