// Changes - live drawing edits and their undo history
//
// Architecture:
// - ChangeAction: one user edit emitted by the map canvas
// - ChangeDispatcher: interprets an action and mutates the surface and session
// - ChangeLog: ordered history of accepted changes plus the pending-undo slot
// - UndoCoordinator: stages the last change, runs the revert strategy, clears
//
// Everything here is synchronous. One action is handled to completion before
// the next one is looked at (see MapEditor for the queue that guarantees it).

pub mod action;
pub mod dispatcher;
pub mod error;
pub mod history;
pub mod undo;

pub use action::{ChangeAction, ChangeType, SurfaceTarget};
pub use dispatcher::{ChangeDispatcher, DispatchContext, DispatchOutcome, DispatcherConfig};
pub use error::{ChangeError, ChangeResult};
pub use history::{ChangeLog, ChangeLogEntry, LayerId, PendingUndo, UndoState};
pub use undo::{NoopRevert, RevertStrategy, UndoCoordinator};
