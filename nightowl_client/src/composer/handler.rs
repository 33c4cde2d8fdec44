use nightowl_core::helpers::utils::normalize_tasks;
use nightowl_core::schedule::dto::{ScheduleRequest, ScheduleResponse};
use nightowl_core::schedule::error::GenerationError;
use tokio::sync::{mpsc, watch};

use super::dto::{ComposerHandle, ComposerView, Notification, ScheduleForm};
use crate::transport::handler::ScheduleTransport;

/// Drives one schedule page. Taking `&mut self` in `submit` keeps a single
/// request in flight per composer.
pub struct ScheduleComposer<T> {
    transport: T,
    view: watch::Sender<ComposerView>,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl<T: ScheduleTransport> ScheduleComposer<T> {
    pub fn new(transport: T) -> (Self, ComposerHandle) {
        let (view, view_rx) = watch::channel(ComposerView::default());
        let (notifications, notifications_rx) = mpsc::unbounded_channel();

        let composer = Self {
            transport,
            view,
            notifications,
        };

        let handle = ComposerHandle {
            view: view_rx,
            notifications: notifications_rx,
        };

        (composer, handle)
    }

    pub fn view(&self) -> ComposerView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ComposerView> {
        self.view.subscribe()
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            log::debug!("Notification dropped, nobody is listening");
        }
    }

    pub async fn submit_form(
        &mut self,
        form: &ScheduleForm,
    ) -> Result<ScheduleResponse, GenerationError> {
        self.submit(&form.tasks, &form.sleep_time).await
    }

    pub async fn submit(
        &mut self,
        raw_tasks: &str,
        sleep_time: &str,
    ) -> Result<ScheduleResponse, GenerationError> {
        let tasks = normalize_tasks(raw_tasks);

        self.view.send_modify(|view| view.schedule.clear());

        if tasks.is_empty() {
            let err = GenerationError::EmptyTaskList;
            self.notify(Notification::error(err.user_message()));
            return Err(err);
        }

        self.view.send_modify(|view| view.is_loading = true);

        let request = ScheduleRequest::from((tasks, sleep_time.to_string()));
        let result = self.transport.generate(&request).await;

        match &result {
            Ok(response) => {
                let schedule = response.schedule.clone();
                self.view.send_modify(|view| {
                    view.is_loading = false;
                    view.schedule = schedule;
                });

                if let Some(tip) = response.tip() {
                    self.notify(Notification::tip(tip));
                }
            }
            Err(err) => {
                log::error!("Schedule generation failed: {}", err);

                self.view.send_modify(|view| view.is_loading = false);
                self.notify(Notification::error(err.user_message()));
            }
        }

        result
    }
}
