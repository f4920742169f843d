use std::sync::Arc;

use tracing::info;

use crate::domain::repository::{CodeStore, Notifier};
use crate::domain::types::{Channel, Identifier, Verification, format_code, generate_code};
use crate::error::OtpServiceError;

// ── IssueOtp ─────────────────────────────────────────────────────────────────

pub struct IssueOtpInput {
    pub identifier: String,
    /// Caller-chosen code; generated when absent.
    pub code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub identifier: Identifier,
    pub channel: Channel,
    pub expires_in_secs: i64,
}

pub struct IssueOtpUseCase<S, N>
where
    S: CodeStore,
    N: Notifier,
{
    pub store: Arc<S>,
    pub notifier: N,
}

impl<S, N> IssueOtpUseCase<S, N>
where
    S: CodeStore,
    N: Notifier,
{
    pub async fn execute(&self, input: IssueOtpInput) -> Result<IssuedOtp, OtpServiceError> {
        // 1. Validate identifier → 400
        let identifier = Identifier::parse(&input.identifier)?;

        // 2. Normalise the supplied code or generate one → 400 on bad format
        let code = match input.code.as_deref() {
            Some(raw) => format_code(raw)?,
            None => generate_code(),
        };

        // 3. Deliver first; a code the applicant never received is not stored
        self.notifier.send_code(&identifier, &code).await?;

        // 4. Replace any pending code for this identifier
        self.store.issue(&identifier, &code);
        info!(identifier = %identifier.masked(), "code issued");

        Ok(IssuedOtp {
            channel: identifier.channel(),
            identifier,
            expires_in_secs: self.store.ttl().num_seconds(),
        })
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub identifier: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<S>
where
    S: CodeStore,
{
    pub store: Arc<S>,
}

impl<S> VerifyOtpUseCase<S>
where
    S: CodeStore,
{
    /// The supplied code is compared verbatim: `"42917"` does not match a
    /// stored `"042917"`.
    pub fn execute(&self, input: VerifyOtpInput) -> Result<Verification, OtpServiceError> {
        let identifier = Identifier::parse(&input.identifier)?;
        let outcome = self.store.verify(&identifier, &input.code);
        info!(
            identifier = %identifier.masked(),
            outcome = ?outcome,
            "code verification"
        );

        match outcome {
            Verification::Success => Ok(outcome),
            Verification::NotFound => Err(OtpServiceError::OtpNotFound),
            Verification::Expired => Err(OtpServiceError::OtpExpired),
            Verification::Mismatch => Err(OtpServiceError::InvalidOtp),
        }
    }
}
