pub mod policy;
pub mod webhook;

use async_trait::async_trait;

use crate::error::TransportFault;
use crate::form::Payload;

/// Body encoding for one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    FormUrlEncoded,
}

impl Encoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            Encoding::Json => "application/json",
            Encoding::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Json => write!(f, "JSON"),
            Encoding::FormUrlEncoded => write!(f, "form data"),
        }
    }
}

/// How the retry policy judged a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    /// Failed, but another attempt follows.
    SoftFailure(TransportFault),
    /// Failed and delivery stops here.
    HardFailure(TransportFault),
}

/// Mechanism for posting a payload once. `Ok` means a 2xx response; anything
/// else is a `TransportFault`. Retrying is the policy's job, not the transport's.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn send(&self, payload: &Payload, encoding: Encoding) -> Result<(), TransportFault>;
}
