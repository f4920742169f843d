use std::time::Duration as StdDuration;

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::repository::Notifier;
use crate::domain::types::{Channel, Identifier};
use crate::error::OtpServiceError;

/// Default per-request timeout for gateway calls, in seconds.
pub const GATEWAY_TIMEOUT_SECS: u64 = 10;

/// Text sent to the applicant.
pub fn code_message(code: &str, ttl: Duration) -> String {
    let minutes = (ttl.num_seconds().max(1) + 59) / 60;
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!("Your verification code is {code}. It expires in {minutes} {unit}.")
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    message: &'a str,
}

/// Posts codes to an SMS/email gateway over HTTP.
#[derive(Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    ttl: Duration,
}

impl HttpNotifier {
    pub fn new(base_url: &str, api_key: Option<String>, ttl: Duration) -> anyhow::Result<Self> {
        Self::with_timeout(
            base_url,
            api_key,
            ttl,
            StdDuration::from_secs(GATEWAY_TIMEOUT_SECS),
        )
    }

    /// A gateway call that exceeds `timeout` fails with `Gateway`.
    pub fn with_timeout(
        base_url: &str,
        api_key: Option<String>,
        ttl: Duration,
        timeout: StdDuration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            ttl,
        })
    }

    fn endpoint(&self, channel: Channel) -> String {
        match channel {
            Channel::Sms => format!("{}/sms", self.base_url),
            Channel::Email => format!("{}/email", self.base_url),
        }
    }
}

impl Notifier for HttpNotifier {
    async fn send_code(&self, identifier: &Identifier, code: &str) -> Result<(), OtpServiceError> {
        let message = code_message(code, self.ttl);
        let mut request = self
            .client
            .post(self.endpoint(identifier.channel()))
            .json(&SendRequest {
                to: identifier.as_str(),
                message: &message,
            });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| OtpServiceError::Gateway(e.into()))?;

        info!(
            identifier = %identifier.masked(),
            channel = ?identifier.channel(),
            "code dispatched"
        );
        Ok(())
    }
}

/// Development notifier: records the dispatch in the log instead of sending.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    ttl: Duration,
}

impl LogNotifier {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Notifier for LogNotifier {
    async fn send_code(&self, identifier: &Identifier, code: &str) -> Result<(), OtpServiceError> {
        info!(
            identifier = %identifier.masked(),
            channel = ?identifier.channel(),
            "code dispatch skipped, no gateway configured"
        );
        debug!(text = %code_message(code, self.ttl), "code message");
        Ok(())
    }
}

/// Notifier selected at startup from configuration.
#[derive(Clone)]
pub enum GatewayNotifier {
    Http(HttpNotifier),
    Log(LogNotifier),
}

impl Notifier for GatewayNotifier {
    async fn send_code(&self, identifier: &Identifier, code: &str) -> Result<(), OtpServiceError> {
        match self {
            Self::Http(n) => n.send_code(identifier, code).await,
            Self::Log(n) => n.send_code(identifier, code).await,
        }
    }
}
