// MapEditor - owns the drawing session and serializes change handling
//
// Events coming from the canvas are queued and drained one at a time, so a
// dispatch never observes another one half done.

use crate::changes::{
    ChangeAction, ChangeDispatcher, ChangeError, ChangeLog, ChangeLogEntry, ChangeResult,
    DispatchContext, DispatchOutcome, LayerId, RevertStrategy, UndoCoordinator,
};
use crate::config::EditorConfig;
use crate::drawing::DrawingSurface;
use crate::messaging::{
    Notification, NotificationCategory, NotificationConsumer, NotificationProducer,
    create_notification_channel,
};
use crate::session::EditSession;
use ringbuf::traits::Producer;
use std::collections::VecDeque;

/// Drawing session facade: surface, edit state, change history and undo
pub struct MapEditor<S: DrawingSurface> {
    surface: S,
    session: EditSession,
    dispatcher: ChangeDispatcher,
    log: ChangeLog,
    undo: UndoCoordinator<S>,
    current_layer: Option<LayerId>,
    pending: VecDeque<ChangeAction>,
    notifications: NotificationProducer,
}

impl<S: DrawingSurface> MapEditor<S> {
    /// Build an editor; the returned consumer receives user-facing notifications
    pub fn new(surface: S, config: &EditorConfig) -> (Self, NotificationConsumer) {
        let (notifications, notification_rx) =
            create_notification_channel(config.notification_capacity.max(1));

        let log = match config.max_history {
            Some(max) => ChangeLog::with_max_history(max),
            None => ChangeLog::new(),
        };

        let editor = Self {
            surface,
            session: EditSession::new(),
            dispatcher: ChangeDispatcher::new(config.dispatcher_config()),
            log,
            undo: UndoCoordinator::new(),
            current_layer: None,
            pending: VecDeque::new(),
            notifications,
        };

        (editor, notification_rx)
    }

    /// Replace the revert strategy used by undo
    pub fn set_revert_strategy(&mut self, strategy: Box<dyn RevertStrategy<S>>) {
        self.undo = UndoCoordinator::with_strategy(strategy);
    }

    pub fn set_current_layer(&mut self, layer: Option<LayerId>) {
        self.current_layer = layer;
    }

    pub fn current_layer(&self) -> Option<&LayerId> {
        self.current_layer.as_ref()
    }

    /// Apply one change event right away
    pub fn apply_change(&mut self, action: ChangeAction) -> ChangeResult<DispatchOutcome> {
        let change_type = action.change_type.clone();
        let result = self.dispatcher.apply_change(
            action,
            DispatchContext {
                current_layer: self.current_layer.as_ref(),
                session: &mut self.session,
                surface: &mut self.surface,
                log: &mut self.log,
            },
        );

        if let Err(e) = &result {
            log::warn!("change {} rejected: {}", change_type, e);
            self.notify(Notification::error(NotificationCategory::Changes, e.to_string()));
        }

        result
    }

    /// Queue an event to be applied by `process_pending`
    pub fn enqueue(&mut self, action: ChangeAction) {
        self.pending.push_back(action);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued event in arrival order, each to completion
    ///
    /// A rejected event does not stop the queue; every outcome is returned.
    pub fn process_pending(&mut self) -> Vec<ChangeResult<DispatchOutcome>> {
        let mut results = Vec::with_capacity(self.pending.len());
        while let Some(action) = self.pending.pop_front() {
            results.push(self.apply_change(action));
        }
        results
    }

    /// Undo the most recent logged change
    pub fn undo_change(&mut self) -> ChangeResult<ChangeLogEntry> {
        let result = self.undo.undo_change(&mut self.log, &mut self.surface);

        match &result {
            Ok(entry) => self.notify(Notification::info(
                NotificationCategory::Changes,
                format!("Undid {}", entry.change_type),
            )),
            Err(ChangeError::EmptyUndoHistory) => self.notify(Notification::info(
                NotificationCategory::Changes,
                ChangeError::EmptyUndoHistory.to_string(),
            )),
            Err(e) => self.notify(Notification::error(
                NotificationCategory::Changes,
                e.to_string(),
            )),
        }

        result
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.log
    }

    fn notify(&mut self, notification: Notification) {
        if self.notifications.try_push(notification).is_err() {
            log::warn!("notification channel full, dropping notification");
        }
    }
}
