pub mod message;
pub mod scheduler;
pub mod sms;
pub mod submit;

use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use crate::config::Config;
use crate::form::FormView;

use message::{Message, MessageKind, MessageSlot};
use scheduler::{Scheduler, TaskKey};
use sms::SmsSection;
use submit::SubmitControl;

/// Everything a host needs to render the form chrome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub sms: SmsSection,
    pub submit: SubmitControl,
    pub message: MessageSlot,
}

impl ViewState {
    pub fn message(&self) -> Option<&Message> {
        self.message.current()
    }
}

/// Called after every view change so the host can re-render.
pub trait ViewListener: Send + Sync {
    fn render(&self, view: &ViewState);
}

/// Owns the view state and the deferred tasks that mutate it.
pub struct View {
    state: Mutex<ViewState>,
    scheduler: Scheduler,
    listener: RwLock<Option<Arc<dyn ViewListener>>>,
    fade_in_delay: Duration,
    error_clear_delay: Duration,
}

impl View {
    pub fn new(config: &Config) -> Self {
        Self {
            state: Mutex::new(ViewState::default()),
            scheduler: Scheduler::new(),
            listener: RwLock::new(None),
            fade_in_delay: config.fade_in_delay,
            error_clear_delay: config.error_clear_delay,
        }
    }

    /// Install or replace the render hook. Current state and pending tasks
    /// are kept; the new listener is rendered once immediately.
    pub fn set_listener(&self, listener: Arc<dyn ViewListener>) {
        *self.listener.write().unwrap_or_else(|e| e.into_inner()) = Some(listener);
        self.update(|_| ());
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.scheduler.is_pending(key)
    }

    pub fn cancel(&self, key: TaskKey) -> bool {
        self.scheduler.cancel(key)
    }

    /// Show or hide the SMS section for the current phone value. Showing
    /// schedules the fade-in; hiding drops any fade still waiting. Without a
    /// Tokio runtime the fade is applied immediately.
    pub fn phone_input(self: &Arc<Self>, phone: &str, min_len: usize) {
        if SmsSection::should_show(phone, min_len) {
            let needs_fade = self.update(|s| {
                s.sms.show();
                !s.sms.faded_in
            });
            if needs_fade {
                let view = Arc::clone(self);
                let scheduled =
                    self.scheduler
                        .schedule(TaskKey::SmsFadeIn, self.fade_in_delay, move || {
                            view.update(|s| s.sms.fade_in());
                        });
                if let Err(fade_in) = scheduled {
                    fade_in();
                }
            }
        } else {
            self.scheduler.cancel(TaskKey::SmsFadeIn);
            self.update(|s| s.sms.hide());
        }
    }

    /// Replace the message slot. Error messages clear themselves after the
    /// configured delay unless something else replaced them first.
    pub fn show_message(self: &Arc<Self>, kind: MessageKind, text: &str) {
        self.scheduler.cancel(TaskKey::MessageClear);
        let generation = self.update(|s| s.message.set(kind, text));

        if let (Some(generation), MessageKind::Error) = (generation, kind) {
            let view = Arc::clone(self);
            // Without a runtime the message simply stays until replaced.
            let _ = self
                .scheduler
                .schedule(TaskKey::MessageClear, self.error_clear_delay, move || {
                    view.update(|s| s.message.clear_if(generation));
                });
        }
    }

    pub fn clear_message(&self) {
        self.scheduler.cancel(TaskKey::MessageClear);
        self.update(|s| s.message.clear());
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|s| s.submit.set_loading(loading));
    }

    /// After `delay`, reset the form fields, hide the SMS section and clear
    /// the message area.
    pub fn schedule_reset(self: &Arc<Self>, delay: Duration, form: Arc<dyn FormView>) {
        let view = Arc::clone(self);
        let scheduled = self.scheduler.schedule(TaskKey::FormReset, delay, move || {
            tracing::debug!("Resetting form after successful submission");
            form.reset();
            view.scheduler.cancel(TaskKey::SmsFadeIn);
            view.scheduler.cancel(TaskKey::MessageClear);
            view.update(|s| {
                s.sms.hide();
                s.message.clear();
            });
        });
        if let Err(reset) = scheduled {
            reset();
        }
    }

    /// Wait for a pending post-success reset. Returns true if one ran.
    pub async fn wait_for_reset(&self) -> bool {
        self.scheduler.join(TaskKey::FormReset).await
    }

    pub fn shutdown(&self) {
        self.scheduler.cancel_all();
    }

    fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.lock();
            let result = f(&mut state);
            (result, state.clone())
        };

        let listener = self
            .listener
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(listener) = listener {
            listener.render(&snapshot);
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
