use nightowl_core::schedule::dto::{DEFAULT_SLEEP_TIME, SAMPLE_TASKS, ScheduleEntry};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::timeline::dto::{Glyph, TimelineView};
use crate::timeline::handler::render_timeline;

pub const ERROR_TOAST_DURATION: Duration = Duration::from_secs(4);
pub const TIP_TOAST_DURATION: Duration = Duration::from_secs(5);

/// The editable inputs of the schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub tasks: String,
    pub sleep_time: String,
}

/// What the schedule page shows at any moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerView {
    pub is_loading: bool,
    pub schedule: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast, dismissed after `duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub duration: Duration,
    pub icon: Option<Glyph>,
}

pub struct ComposerHandle {
    pub view: watch::Receiver<ComposerView>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            tasks: SAMPLE_TASKS.join("\n"),
            sleep_time: DEFAULT_SLEEP_TIME.to_string(),
        }
    }
}

impl ComposerView {
    pub fn trigger_enabled(&self) -> bool {
        !self.is_loading
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.is_loading {
            "Optimizing..."
        } else {
            "Generate Schedule"
        }
    }

    pub fn timeline(&self) -> TimelineView {
        render_timeline(&self.schedule, self.is_loading)
    }
}

impl Notification {
    pub fn error(message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.to_string(),
            duration: ERROR_TOAST_DURATION,
            icon: None,
        }
    }

    pub fn tip(message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.to_string(),
            duration: TIP_TOAST_DURATION,
            icon: Some(Glyph::Moon),
        }
    }
}
