use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{Map, Value};

use onboarder::config::Config;
use onboarder::form::{FormSnapshot, FormValues};

/// One request as the webhook saw it.
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: String,
    pub body: String,
}

impl Received {
    /// Decode the body into a flat JSON object, whatever the encoding.
    pub fn fields(&self) -> Map<String, Value> {
        if self.content_type.starts_with("application/json") {
            match serde_json::from_str(&self.body) {
                Ok(Value::Object(map)) => map,
                other => panic!("expected JSON object, got {other:?}"),
            }
        } else {
            form_urlencoded::parse(self.body.as_bytes())
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect()
        }
    }
}

struct HookState {
    statuses: Mutex<VecDeque<u16>>,
    received: Mutex<Vec<Received>>,
}

/// A webhook receiver on a random local port. Answers with the scripted
/// statuses in order, then 200.
pub struct MockWebhook {
    pub addr: SocketAddr,
    state: Arc<HookState>,
}

impl MockWebhook {
    pub fn url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().unwrap().clone()
    }
}

async fn hook(
    State(state): State<Arc<HookState>>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    state.received.lock().unwrap().push(Received { content_type, body });

    let code = state.statuses.lock().unwrap().pop_front().unwrap_or(200);
    StatusCode::from_u16(code).unwrap()
}

pub async fn spawn_webhook(statuses: Vec<u16>) -> MockWebhook {
    let state = Arc::new(HookState {
        statuses: Mutex::new(statuses.into()),
        received: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/hook", post(hook))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    MockWebhook { addr, state }
}

/// A URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/hook")
}

pub fn config_for(url: &str) -> Config {
    Config {
        webhook_url: url.to_string(),
        log_level: "warn".to_string(),
        ..Config::default()
    }
}

pub fn filled_form() -> Arc<FormSnapshot> {
    Arc::new(FormSnapshot::new(FormValues {
        business_name: "Joe's Plumbing Co.".to_string(),
        email: "joe@plumbing.example".to_string(),
        phone: "555 123 4567".to_string(),
        booking_link: "https://cal.example/joe".to_string(),
        service_type: "plumbing".to_string(),
        service_area: "Austin, TX".to_string(),
        lead_handling_method: Some("call".to_string()),
        sms: Some("TRUE".to_string()),
        page_url: "https://onboard.example/start".to_string(),
    }))
}
