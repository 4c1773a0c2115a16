use axum::{extract::State, routing::get, Router};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const EXTRACT_REQUESTS: &str = "req2uml_extract_requests_total";
pub const REFINE_REQUESTS: &str = "req2uml_refine_requests_total";
pub const CATALOG_ENTRIES: &str = "req2uml_catalog_entries";

/// `intent` label value for refine requests rejected before resolution.
pub const NO_INTENT: &str = "none";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if one is already installed.
    pub fn init(catalog_entries: usize) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;

        gauge!(CATALOG_ENTRIES).set(catalog_entries as f64);

        Ok(Self { handle })
    }

    /// `GET /metrics`, merged next to the API router.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(exposition))
            .with_state(self.handle.clone())
    }
}

async fn exposition(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// outcome: "ok" | "client_error" | "internal_error"
pub fn record_extract(outcome: &'static str) {
    counter!(EXTRACT_REQUESTS, "outcome" => outcome).increment(1);
}

/// intent: `refine::Intent::as_str`, or [`NO_INTENT`] when the request failed first.
pub fn record_refine(outcome: &'static str, intent: &'static str) {
    counter!(REFINE_REQUESTS, "outcome" => outcome, "intent" => intent).increment(1);
}
