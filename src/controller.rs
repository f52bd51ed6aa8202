use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::config::Config;
use crate::delivery::policy::{self, RetryPolicy};
use crate::delivery::{Encoding, WebhookTransport};
use crate::error::{DeliveryError, ValidationError};
use crate::form::validate::validate;
use crate::form::{Field, FormView, Payload};
use crate::ui::message::{FAILURE_MESSAGE, MessageKind, SUCCESS_MESSAGE};
use crate::ui::scheduler::TaskKey;
use crate::ui::{View, ViewListener, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// What a submit event ended in. Transport faults are folded in here and
/// never surface as errors to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; the event was ignored.
    Busy,
    Rejected(ValidationError),
    Delivered(Encoding),
    Failed(DeliveryError),
}

/// The onboarding form controller. Collaborators are injected so the whole
/// flow runs without a real page.
///
/// Deferred view work (SMS fade-in, error auto-clear, post-success reset) is
/// spawned on the current Tokio runtime. Outside a runtime those steps are
/// applied immediately instead of after their delay.
pub struct OnboardingForm {
    config: Config,
    form: Arc<dyn FormView>,
    transport: Arc<dyn WebhookTransport>,
    policy: RetryPolicy,
    view: Arc<View>,
    state: Mutex<SubmissionState>,
}

impl OnboardingForm {
    pub fn new(config: Config, form: Arc<dyn FormView>, transport: Arc<dyn WebhookTransport>) -> Self {
        let policy = RetryPolicy::new(config.retry_on_network_fault);
        let view = Arc::new(View::new(&config));

        Self {
            config,
            form,
            transport,
            policy,
            view,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    /// Attach a render hook. Existing view state and pending timers are kept.
    pub fn with_listener(self, listener: Arc<dyn ViewListener>) -> Self {
        self.view.set_listener(listener);
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock_state()
    }

    pub fn view(&self) -> ViewState {
        self.view.snapshot()
    }

    pub fn has_pending_reset(&self) -> bool {
        self.view.is_pending(TaskKey::FormReset)
    }

    /// Wait until the post-success reset has run. Returns false if none was
    /// scheduled or it was cancelled.
    pub async fn wait_for_reset(&self) -> bool {
        self.view.wait_for_reset().await
    }

    /// React to a change of the phone input.
    pub fn handle_phone_input(&self) {
        let phone = self.form.value(Field::Phone);
        self.view.phone_input(&phone, self.config.sms_min_phone_len);
    }

    /// Handle a submit event: validate, deliver, report.
    pub async fn handle_submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.lock_state();
            if *state == SubmissionState::Submitting {
                tracing::debug!("Submit ignored, a submission is already in flight");
                return SubmitOutcome::Busy;
            }

            let sms_visible = self.view.snapshot().sms.visible;
            let payload =
                Payload::collect(self.form.as_ref(), sms_visible, &self.config.source, Utc::now());

            if let Err(e) = validate(&payload) {
                tracing::debug!("Validation failed: {e}");
                self.view.show_message(MessageKind::Error, e.message());
                return SubmitOutcome::Rejected(e);
            }

            *state = SubmissionState::Submitting;
            payload
        };

        if self.view.cancel(TaskKey::FormReset) {
            tracing::debug!("Dropped pending reset from previous submission");
        }

        let _loading = LoadingGuard::engage(self);
        self.view.clear_message();

        let result = policy::deliver(self.transport.as_ref(), &payload, &self.policy).await;

        match result {
            Ok(encoding) => {
                self.set_state(SubmissionState::Success);
                self.view.show_message(MessageKind::Success, SUCCESS_MESSAGE);
                self.view
                    .schedule_reset(self.config.reset_delay, Arc::clone(&self.form));
                SubmitOutcome::Delivered(encoding)
            }
            Err(e) => {
                tracing::error!("Submission error: {e}");
                self.set_state(SubmissionState::Failed);
                self.view.show_message(MessageKind::Error, FAILURE_MESSAGE);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn set_state(&self, next: SubmissionState) {
        let mut state = self.lock_state();
        tracing::debug!("Submission state {:?} -> {next:?}", *state);
        *state = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for OnboardingForm {
    fn drop(&mut self) {
        self.view.shutdown();
    }
}

/// Keeps the submit control busy for the lifetime of a submission. Restores
/// it on drop, including when the submit future is dropped mid-flight.
struct LoadingGuard<'a> {
    form: &'a OnboardingForm,
}

impl<'a> LoadingGuard<'a> {
    fn engage(form: &'a OnboardingForm) -> Self {
        form.view.set_loading(true);
        Self { form }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.form.view.set_loading(false);
        let mut state = self.form.lock_state();
        if *state == SubmissionState::Submitting {
            *state = SubmissionState::Idle;
        }
    }
}
