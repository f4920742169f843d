#![allow(async_fn_in_trait)]

use chrono::{DateTime, Duration, Utc};

use crate::domain::types::{Identifier, Verification};
use crate::error::OtpServiceError;

/// Source of the current time for expiry arithmetic.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Holds at most one pending code per identifier.
///
/// All operations are in-memory and never suspend, so the trait is sync.
pub trait CodeStore: Send + Sync {
    /// Insert or overwrite the pending code for `identifier`.
    fn issue(&self, identifier: &Identifier, code: &str);

    /// Check `supplied` against the pending code. Consumes the entry on
    /// success and on expiry; a mismatch leaves it in place.
    fn verify(&self, identifier: &Identifier, supplied: &str) -> Verification;

    /// Evict every expired entry. Returns the number evicted.
    fn sweep(&self) -> usize;

    /// How long an issued code stays valid.
    fn ttl(&self) -> Duration;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Delivers a code to the identifier over SMS or email.
pub trait Notifier: Send + Sync {
    async fn send_code(&self, identifier: &Identifier, code: &str) -> Result<(), OtpServiceError>;
}
