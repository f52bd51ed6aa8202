/// A required field is missing or malformed. Each variant carries its own
/// user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingBusinessName,
    InvalidEmail,
    MissingServiceType,
    MissingServiceArea,
    MissingLeadHandling,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingBusinessName => "Please enter a business name",
            ValidationError::InvalidEmail => "Please enter a valid email address",
            ValidationError::MissingServiceType => "Please select a service type",
            ValidationError::MissingServiceArea => "Please enter your service area",
            ValidationError::MissingLeadHandling => {
                "Please select how we should handle your leads"
            }
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// A single delivery attempt did not reach a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFault {
    Status(u16),
    Network(String),
    Encode(String),
}

impl TransportFault {
    pub fn is_network(&self) -> bool {
        matches!(self, TransportFault::Network(_))
    }
}

impl std::fmt::Display for TransportFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportFault::Status(code) => write!(f, "HTTP {code}"),
            TransportFault::Network(msg) => write!(f, "Network error: {msg}"),
            TransportFault::Encode(msg) => write!(f, "Encoding error: {msg}"),
        }
    }
}

impl std::error::Error for TransportFault {}

/// Delivery gave up. `Exhausted` means every configured encoding was tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    Exhausted { attempts: usize, last: TransportFault },
    FailFast { fault: TransportFault },
}

impl DeliveryError {
    pub fn fault(&self) -> &TransportFault {
        match self {
            DeliveryError::Exhausted { last, .. } => last,
            DeliveryError::FailFast { fault } => fault,
        }
    }
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::Exhausted { attempts, last } => {
                write!(f, "Delivery failed after {attempts} attempts: {last}")
            }
            DeliveryError::FailFast { fault } => write!(f, "Delivery aborted: {fault}"),
        }
    }
}

impl std::error::Error for DeliveryError {}
