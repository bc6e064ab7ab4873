//! Notifications from the manager to its host.
//!
//! The manager announces button presses, closes, maximize/restore requests,
//! activation, and painting through a [`NotificationSink`]. Events that the
//! host may veto return a [`NotificationResult`]; the manager only proceeds
//! on [`NotificationResult::Proceed`].

use crate::pane::{ButtonKind, PaneIndex, PaneInfo};

/// Outcome of a cancelable notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationResult {
    #[default]
    Proceed,
    Cancel,
}

impl NotificationResult {
    #[must_use]
    pub const fn is_cancel(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// Something the manager is about to do, or just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerEvent<'a> {
    /// A caption button fired. Canceling stops the button's default action.
    PaneButton {
        index: PaneIndex,
        pane: &'a PaneInfo,
        button: ButtonKind,
    },
    /// The pane is about to close.
    PaneClose { index: PaneIndex, pane: &'a PaneInfo },
    /// The pane is about to be maximized.
    PaneMaximize { index: PaneIndex, pane: &'a PaneInfo },
    /// The pane is about to be restored from maximized.
    PaneRestore { index: PaneIndex, pane: &'a PaneInfo },
    /// The pane became active. Not cancelable.
    PaneActivated { index: PaneIndex, pane: &'a PaneInfo },
    /// The manager is about to paint its parts. Canceling means the host
    /// painted them itself.
    Render,
}

impl ManagerEvent<'_> {
    /// The pane the event is about.
    #[must_use]
    pub fn pane(&self) -> Option<&PaneInfo> {
        match *self {
            Self::PaneButton { pane, .. }
            | Self::PaneClose { pane, .. }
            | Self::PaneMaximize { pane, .. }
            | Self::PaneRestore { pane, .. }
            | Self::PaneActivated { pane, .. } => Some(pane),
            Self::Render => None,
        }
    }
}

/// Receives manager events.
pub trait NotificationSink {
    fn notify(&mut self, event: &ManagerEvent<'_>) -> NotificationResult;
}

/// Sink that lets everything proceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceedSink;

impl NotificationSink for ProceedSink {
    fn notify(&mut self, _event: &ManagerEvent<'_>) -> NotificationResult {
        NotificationResult::Proceed
    }
}

impl<F> NotificationSink for F
where
    F: FnMut(&ManagerEvent<'_>) -> NotificationResult,
{
    fn notify(&mut self, event: &ManagerEvent<'_>) -> NotificationResult {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut closes = 0;
        {
            let mut sink = |event: &ManagerEvent<'_>| {
                if matches!(event, ManagerEvent::PaneClose { .. }) {
                    closes += 1;
                    NotificationResult::Cancel
                } else {
                    NotificationResult::Proceed
                }
            };
            let pane = PaneInfo::new().name("log");
            let close = ManagerEvent::PaneClose {
                index: 0,
                pane: &pane,
            };
            assert!(sink.notify(&close).is_cancel());
            assert!(!sink.notify(&ManagerEvent::Render).is_cancel());
            assert_eq!(close.pane().map(|p| p.name.as_str()), Some("log"));
        }
        assert_eq!(closes, 1);
    }

    #[test]
    fn proceed_sink_never_cancels() {
        let pane = PaneInfo::new();
        let mut sink = ProceedSink;
        let event = ManagerEvent::PaneMaximize {
            index: 3,
            pane: &pane,
        };
        assert_eq!(sink.notify(&event), NotificationResult::Proceed);
        assert!(ManagerEvent::Render.pane().is_none());
    }
}
