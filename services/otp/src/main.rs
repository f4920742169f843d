use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use loanform_core::tracing::init_tracing;
use loanform_otp::config::OtpConfig;
use loanform_otp::infra::clock::SystemClock;
use loanform_otp::infra::notifier::{GatewayNotifier, HttpNotifier, LogNotifier};
use loanform_otp::infra::store::InMemoryCodeStore;
use loanform_otp::infra::sweeper::Sweeper;
use loanform_otp::router::build_router;
use loanform_otp::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = OtpConfig::from_env();

    let store = Arc::new(InMemoryCodeStore::new(config.ttl(), Arc::new(SystemClock)));

    let notifier = match &config.gateway_url {
        Some(url) => {
            info!(gateway_url = %url, "using HTTP notification gateway");
            GatewayNotifier::Http(
                HttpNotifier::with_timeout(
                    url,
                    config.gateway_api_key.clone(),
                    config.ttl(),
                    config.gateway_timeout(),
                )
                .expect("failed to build gateway client"),
            )
        }
        None => {
            tracing::warn!("NOTIFY_GATEWAY_URL unset; codes will not be delivered");
            GatewayNotifier::Log(LogNotifier::new(config.ttl()))
        }
    };

    let sweeper = Sweeper::new(Arc::clone(&store), config.sweep_interval()).start();

    let state = AppState { store, notifier };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.otp_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("otp service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(sweeper.token()))
        .await
        .expect("server error");

    sweeper.stop().await;
    info!("otp service stopped");
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
    shutdown.cancel();
}
