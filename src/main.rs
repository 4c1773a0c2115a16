//! req2uml — Binary Entrypoint
//! Boots the Axum HTTP server: config, tracing, metrics, routes.

use req2uml::{api, config::ServiceConfig, metrics::Metrics, AppState};
use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber unless the runtime already did.
/// REQ2UML_LOG_FORMAT=json switches to JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("req2uml=info,warn"));

    let json = std::env::var("REQ2UML_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = ServiceConfig::from_env()?;
    let state = AppState::from_config(config);
    info!(
        catalog_entries = state.catalog.len(),
        max_requirement_chars = state.config.limits.max_requirement_chars,
        "req2uml starting"
    );

    let mut router = api::router(state.clone());
    match Metrics::init(state.catalog.len()) {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = %e, "metrics disabled"),
    }

    Ok(router.into())
}
