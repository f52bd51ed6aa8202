use std::time::Duration;

pub const DEFAULT_WEBHOOK_URL: &str = "https://hook.us2.make.com/o4usttjoooyfl7asj32u94tdgkxsuvay";
pub const DEFAULT_SOURCE: &str = "client_onboarding";

#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    pub source: String,
    pub request_timeout: Option<Duration>,
    pub retry_on_network_fault: bool,
    pub sms_min_phone_len: usize,
    pub fade_in_delay: Duration,
    pub error_clear_delay: Duration,
    pub reset_delay: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            request_timeout: None,
            retry_on_network_fault: true,
            sms_min_phone_len: 6,
            fade_in_delay: Duration::from_millis(10),
            error_clear_delay: Duration::from_millis(5000),
            reset_delay: Duration::from_millis(3000),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Config::default();

        let webhook_url = env_or("ONBOARDER_WEBHOOK_URL", &defaults.webhook_url);
        if !webhook_url.starts_with("http://") && !webhook_url.starts_with("https://") {
            return Err(format!("Invalid ONBOARDER_WEBHOOK_URL: {webhook_url}"));
        }

        let source = env_or("ONBOARDER_SOURCE", &defaults.source);

        let request_timeout = match std::env::var("ONBOARDER_REQUEST_TIMEOUT_SECS").ok() {
            Some(secs) if !secs.trim().is_empty() => Some(Duration::from_secs(
                secs.trim()
                    .parse()
                    .map_err(|e| format!("Invalid ONBOARDER_REQUEST_TIMEOUT_SECS: {e}"))?,
            )),
            _ => None,
        };

        let retry_on_network_fault = match env_or("ONBOARDER_RETRY_ON_NETWORK_FAULT", "true")
            .to_lowercase()
            .as_str()
        {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => {
                return Err(format!(
                    "Invalid ONBOARDER_RETRY_ON_NETWORK_FAULT: {other}"
                ));
            }
        };

        let sms_min_phone_len: usize = env_or("ONBOARDER_SMS_MIN_PHONE_LEN", "6")
            .parse()
            .map_err(|e| format!("Invalid ONBOARDER_SMS_MIN_PHONE_LEN: {e}"))?;

        let fade_in_delay = env_millis("ONBOARDER_FADE_IN_MS", defaults.fade_in_delay)?;
        let error_clear_delay = env_millis("ONBOARDER_ERROR_CLEAR_MS", defaults.error_clear_delay)?;
        let reset_delay = env_millis("ONBOARDER_RESET_DELAY_MS", defaults.reset_delay)?;

        let log_level = env_or("ONBOARDER_LOG_LEVEL", &defaults.log_level);

        Ok(Config {
            webhook_url,
            source,
            request_timeout,
            retry_on_network_fault,
            sms_min_phone_len,
            fade_in_delay,
            error_clear_delay,
            reset_delay,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_millis(key: &str, default: Duration) -> Result<Duration, String> {
    match std::env::var(key) {
        Ok(ms) => ms
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| format!("Invalid {key}: {e}")),
        Err(_) => Ok(default),
    }
}
