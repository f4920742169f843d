use std::sync::Arc;

use crate::infra::notifier::GatewayNotifier;
use crate::infra::store::InMemoryCodeStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryCodeStore>,
    pub notifier: GatewayNotifier,
}
