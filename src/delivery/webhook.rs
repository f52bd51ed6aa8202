use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::{Encoding, WebhookTransport};
use crate::error::TransportFault;
use crate::form::Payload;

/// Posts payloads to one fixed webhook URL over HTTP.
pub struct HttpWebhook {
    client: reqwest::Client,
    url: String,
}

impl HttpWebhook {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhook {
    async fn send(&self, payload: &Payload, encoding: Encoding) -> Result<(), TransportFault> {
        let body = match encoding {
            Encoding::Json => payload
                .to_json()
                .map_err(|e| TransportFault::Encode(e.to_string()))?,
            Encoding::FormUrlEncoded => payload.to_form_urlencoded(),
        };

        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, encoding.content_type())
            .body(body)
            .send()
            .await
            .map_err(|e| TransportFault::Network(e.to_string()))?;

        // Response body is never inspected.
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportFault::Status(status.as_u16()))
        }
    }
}
