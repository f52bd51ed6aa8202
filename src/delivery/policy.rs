use super::{AttemptOutcome, Encoding, WebhookTransport};
use crate::error::{DeliveryError, TransportFault};
use crate::form::Payload;

/// Which encodings to try, in order, and whether a network fault is worth
/// retrying against the same endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub encodings: Vec<Encoding>,
    pub retry_on_network_fault: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            encodings: vec![Encoding::Json, Encoding::FormUrlEncoded],
            retry_on_network_fault: true,
        }
    }
}

impl RetryPolicy {
    pub fn new(retry_on_network_fault: bool) -> Self {
        Self {
            retry_on_network_fault,
            ..Self::default()
        }
    }

    /// Judge the result of attempt number `attempt` (zero-based).
    pub fn classify(&self, attempt: usize, result: Result<(), TransportFault>) -> AttemptOutcome {
        let fault = match result {
            Ok(()) => return AttemptOutcome::Success,
            Err(fault) => fault,
        };

        let is_last = attempt + 1 >= self.encodings.len();
        if is_last || (fault.is_network() && !self.retry_on_network_fault) {
            AttemptOutcome::HardFailure(fault)
        } else {
            AttemptOutcome::SoftFailure(fault)
        }
    }
}

/// Run the policy against a transport. Returns the encoding that got through.
pub async fn deliver(
    transport: &dyn WebhookTransport,
    payload: &Payload,
    policy: &RetryPolicy,
) -> Result<Encoding, DeliveryError> {
    for (attempt, &encoding) in policy.encodings.iter().enumerate() {
        let result = transport.send(payload, encoding).await;

        match policy.classify(attempt, result) {
            AttemptOutcome::Success => {
                tracing::info!(
                    "Submission for {} delivered as {encoding} (attempt {})",
                    payload.client_id,
                    attempt + 1
                );
                return Ok(encoding);
            }
            AttemptOutcome::SoftFailure(fault) => {
                tracing::warn!("{encoding} submission failed ({fault}), will retry");
            }
            AttemptOutcome::HardFailure(fault) => {
                let attempts = attempt + 1;
                return Err(if attempts == policy.encodings.len() {
                    DeliveryError::Exhausted {
                        attempts,
                        last: fault,
                    }
                } else {
                    DeliveryError::FailFast { fault }
                });
            }
        }
    }

    Err(DeliveryError::Exhausted {
        attempts: 0,
        last: TransportFault::Encode("no encodings configured".to_string()),
    })
}
