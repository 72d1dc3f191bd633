// UndoCoordinator - stage the last change, revert it, clear the slot

use crate::changes::error::{ChangeError, ChangeResult};
use crate::changes::history::{ChangeLog, ChangeLogEntry, PendingUndo};
use crate::drawing::DrawingSurface;

/// Inverts a staged change on the drawing surface
///
/// Inverse semantics for feature edits are not defined yet, so the default
/// strategy only reports what would be undone. Plug a real strategy in with
/// [`UndoCoordinator::with_strategy`].
pub trait RevertStrategy<S: DrawingSurface> {
    fn revert(&mut self, entry: &ChangeLogEntry, surface: &mut S) -> ChangeResult<()>;
}

/// Strategy that leaves the surface untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRevert;

impl<S: DrawingSurface> RevertStrategy<S> for NoopRevert {
    fn revert(&mut self, entry: &ChangeLogEntry, _surface: &mut S) -> ChangeResult<()> {
        log::info!(
            "undo action {} v{} ({} feature(s)), no revert strategy installed",
            entry.change_type,
            entry.version,
            entry.features.len()
        );
        Ok(())
    }
}

/// Drives one undo cycle over a change log
///
/// Idle -> PendingReversion (pop) -> revert -> Idle (clear). The pending slot
/// is cleared at the end of every cycle, whether the revert succeeded or not.
pub struct UndoCoordinator<S: DrawingSurface> {
    strategy: Box<dyn RevertStrategy<S>>,
}

impl<S: DrawingSurface> UndoCoordinator<S> {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(NoopRevert))
    }

    pub fn with_strategy(strategy: Box<dyn RevertStrategy<S>>) -> Self {
        Self { strategy }
    }

    /// Undo the most recent change
    ///
    /// Returns the entry that was undone.
    ///
    /// # Errors
    /// - `EmptyUndoHistory` if the log has nothing to undo
    /// - whatever the revert strategy returns
    pub fn undo_change(&mut self, log: &mut ChangeLog, surface: &mut S) -> ChangeResult<ChangeLogEntry> {
        let result = match log.pop_last_change() {
            PendingUndo::Empty => {
                log::info!("There is nothing more to undo");
                Err(ChangeError::EmptyUndoHistory)
            }
            PendingUndo::Staged(entry) => self.strategy.revert(entry, surface),
        };

        let staged = log.clear_pending_undo();
        result?;

        staged.ok_or(ChangeError::EmptyUndoHistory)
    }
}

impl<S: DrawingSurface> Default for UndoCoordinator<S> {
    fn default() -> Self {
        Self::new()
    }
}
