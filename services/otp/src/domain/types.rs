use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use serde::Serialize;

use crate::error::OtpServiceError;

/// Number of digits in a one-time code.
pub const OTP_LEN: usize = 6;

/// One-time code time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 120;

/// Interval between background sweeps of expired codes, in seconds.
pub const SWEEP_INTERVAL_SECS: u64 = 60;

const PHONE_MIN_DIGITS: usize = 6;
const PHONE_MAX_DIGITS: usize = 15;

/// Delivery channel implied by the shape of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
}

/// A phone number or email address a code is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    value: String,
    channel: Channel,
}

impl Identifier {
    pub fn parse(raw: &str) -> Result<Self, OtpServiceError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(OtpServiceError::InvalidIdentifier);
        }

        let channel = if value.contains('@') {
            if !is_email(value) {
                return Err(OtpServiceError::InvalidIdentifier);
            }
            Channel::Email
        } else {
            if !is_phone(value) {
                return Err(OtpServiceError::InvalidIdentifier);
            }
            Channel::Sms
        };

        Ok(Self {
            value: value.to_owned(),
            channel,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Log-safe rendering: last four phone digits, or the first character of
    /// the email local part plus the domain.
    pub fn masked(&self) -> String {
        match self.channel {
            Channel::Sms => {
                let tail = self.value.len().saturating_sub(4);
                format!("***{}", &self.value[tail..])
            }
            Channel::Email => {
                let (local, domain) = self.value.split_once('@').unwrap_or(("", ""));
                let first = local.chars().next().map(String::from).unwrap_or_default();
                format!("{first}***@{domain}")
            }
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn is_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// A pending one-time code. The identifier is the key it is stored under.
#[derive(Debug, Clone)]
pub struct CodeEntry {
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

impl CodeEntry {
    /// Expired strictly after `ttl` has elapsed; a code is still valid at
    /// exactly `issued_at + ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.issued_at > ttl
    }
}

/// Outcome of checking a supplied code against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Success,
    NotFound,
    Expired,
    Mismatch,
}

impl Verification {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::Success => "code verified",
            Self::NotFound => "no pending code; request a new one",
            Self::Expired => "code expired; request a new one",
            Self::Mismatch => "invalid code; try again",
        }
    }
}

/// Normalise a caller-supplied numeric code to `OTP_LEN` digits, left-padding
/// with zeros.
pub fn format_code(raw: &str) -> Result<String, OtpServiceError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > OTP_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OtpServiceError::InvalidCode);
    }
    Ok(format!("{raw:0>width$}", width = OTP_LEN))
}

pub fn generate_code() -> String {
    let mut rng = rand::rng();
    let n: u32 = rng.random_range(0..10u32.pow(OTP_LEN as u32));
    format!("{n:0width$}", width = OTP_LEN)
}
