use std::time::Duration;

use crate::domain::types::{OTP_TTL_SECS, SWEEP_INTERVAL_SECS};
use crate::infra::notifier::GATEWAY_TIMEOUT_SECS;

/// OTP service configuration loaded from environment variables.
#[derive(Debug)]
pub struct OtpConfig {
    /// TCP port to listen on (default 3120). Env var: `OTP_PORT`.
    pub otp_port: u16,
    /// Code validity window in seconds (default 120). Env var: `OTP_TTL_SECS`.
    pub ttl_secs: i64,
    /// Seconds between sweeps of expired codes (default 60).
    /// Env var: `OTP_SWEEP_INTERVAL_SECS`.
    pub sweep_interval_secs: u64,
    /// Base URL of the SMS/email gateway. Codes are only logged when unset.
    /// Env var: `NOTIFY_GATEWAY_URL`.
    pub gateway_url: Option<String>,
    /// Bearer token for the gateway. Env var: `NOTIFY_GATEWAY_API_KEY`.
    pub gateway_api_key: Option<String>,
    /// Per-request gateway timeout in seconds (default 10).
    /// Env var: `NOTIFY_GATEWAY_TIMEOUT_SECS`.
    pub gateway_timeout_secs: u64,
}

impl OtpConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparsable, non-positive or
    /// out-of-range numbers fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            otp_port: lookup("OTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            ttl_secs: lookup("OTP_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|&v: &i64| v > 0 && chrono::Duration::try_seconds(v).is_some())
                .unwrap_or(OTP_TTL_SECS),
            sweep_interval_secs: lookup("OTP_SWEEP_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|&v: &u64| v > 0)
                .unwrap_or(SWEEP_INTERVAL_SECS),
            gateway_url: non_empty("NOTIFY_GATEWAY_URL"),
            gateway_api_key: non_empty("NOTIFY_GATEWAY_API_KEY"),
            gateway_timeout_secs: lookup("NOTIFY_GATEWAY_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|&v: &u64| v > 0)
                .unwrap_or(GATEWAY_TIMEOUT_SECS),
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::try_seconds(self.ttl_secs)
            .unwrap_or_else(|| chrono::Duration::seconds(OTP_TTL_SECS))
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
