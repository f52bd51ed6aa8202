pub mod config;
pub mod controller;
pub mod delivery;
pub mod error;
pub mod form;
pub mod ui;

use std::sync::Arc;

use crate::config::Config;
use crate::controller::OnboardingForm;
use crate::delivery::webhook::HttpWebhook;
use crate::form::FormView;
use crate::ui::ViewListener;

/// Wire a controller to the configured webhook over HTTP.
///
/// Deferred view updates need a Tokio runtime to honour their delays; see
/// [`OnboardingForm`].
pub fn build_form(
    config: Config,
    form: Arc<dyn FormView>,
    listener: Option<Arc<dyn ViewListener>>,
) -> Result<OnboardingForm, String> {
    let transport = HttpWebhook::new(&config.webhook_url, config.request_timeout)?;
    tracing::info!("Submitting to {}", transport.url());

    let controller = OnboardingForm::new(config, form, Arc::new(transport));
    Ok(match listener {
        Some(listener) => controller.with_listener(listener),
        None => controller,
    })
}
