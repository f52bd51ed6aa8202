use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use onboarder::config::Config;
use onboarder::controller::SubmitOutcome;
use onboarder::form::{FormSnapshot, FormValues};
use onboarder::ui::message::{Message, MessageKind};
use onboarder::ui::{ViewListener, ViewState};

/// Prints each new message to the terminal.
#[derive(Default)]
struct Console {
    last: Mutex<Option<Message>>,
}

impl ViewListener for Console {
    fn render(&self, view: &ViewState) {
        let current = view.message().cloned();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if *last == current {
            return;
        }
        match &current {
            Some(Message { kind: MessageKind::Success, text }) => println!("{text}"),
            Some(Message { kind: MessageKind::Error, text }) => eprintln!("{text}"),
            None => {}
        }
        *last = current;
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    let values: FormValues = serde_json::from_str(&input)
        .map_err(|e| format!("Invalid form JSON on stdin: {e}"))?;

    let form = Arc::new(FormSnapshot::new(values));
    let controller = onboarder::build_form(config, form, Some(Arc::new(Console::default())))?;

    controller.handle_phone_input();
    let outcome = controller.handle_submit().await;

    // Let the post-success reset run before exiting
    controller.wait_for_reset().await;

    Ok(match outcome {
        SubmitOutcome::Delivered(encoding) => {
            tracing::info!("Delivered as {encoding}");
            ExitCode::SUCCESS
        }
        SubmitOutcome::Busy | SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => {
            ExitCode::FAILURE
        }
    })
}
