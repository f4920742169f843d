use std::sync::{Arc, Mutex};

use chrono::Duration;

use loanform_otp::domain::repository::Notifier;
use loanform_otp::domain::types::{Identifier, OTP_TTL_SECS};
use loanform_otp::error::OtpServiceError;
use loanform_otp::infra::clock::ManualClock;
use loanform_otp::infra::notifier::{GatewayNotifier, LogNotifier};
use loanform_otp::infra::store::InMemoryCodeStore;
use loanform_otp::state::AppState;

// ── MockNotifier ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNotifier {
    /// Returns a shared handle to the dispatched (identifier, code) pairs.
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl Notifier for MockNotifier {
    async fn send_code(&self, identifier: &Identifier, code: &str) -> Result<(), OtpServiceError> {
        self.sent
            .lock()
            .unwrap()
            .push((identifier.as_str().to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── FailingNotifier ──────────────────────────────────────────────────────────

pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    async fn send_code(&self, _identifier: &Identifier, _code: &str) -> Result<(), OtpServiceError> {
        Err(OtpServiceError::Gateway(anyhow::anyhow!("gateway down")))
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PHONE: &str = "+97517644572";
pub const TEST_EMAIL: &str = "applicant@bank.bt";

pub fn test_store() -> (Arc<InMemoryCodeStore>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let store = InMemoryCodeStore::new(Duration::seconds(OTP_TTL_SECS), clock.clone());
    (Arc::new(store), clock)
}

pub fn test_state() -> (AppState, Arc<ManualClock>) {
    let (store, clock) = test_store();
    let state = AppState {
        store,
        notifier: GatewayNotifier::Log(LogNotifier::new(Duration::seconds(OTP_TTL_SECS))),
    };
    (state, clock)
}
