use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Response, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::ServiceConfig;
use crate::devlog::InputId;
use crate::error::ServiceError;
use crate::extract::{extract_with_catalog, Catalog};
use crate::metrics;
use crate::model::Model;
use crate::refine::{resolve, ChatTurn, RefineReply, Resolution};

const EXTRACT_FAILED: &str = "Failed to extract UML model";
const REFINE_FAILED: &str = "Failed to process refinement";
const LOGGED_CLASS_NAMES: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn from_config(config: ServiceConfig) -> Self {
        let catalog = match &config.catalog.path {
            Some(p) => Catalog::load_from_file(p),
            None => Catalog::builtin().clone(),
        };
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::from_config(ServiceConfig::from_env()?))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(ServiceConfig::default())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/extract-uml", post(extract_uml))
        .route("/api/refine-uml", post(refine_uml))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<String> {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(target: "api", %detail, "handler panicked");

    let mut resp = Response::new(json!({ "error": "Internal error" }).to_string());
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    resp
}

fn body_or_client_error<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ServiceError::client(format!("Invalid request body: {}", e.body_text())))
}

fn check_len(text: &str, limit: usize, what: &str) -> Result<(), ServiceError> {
    if text.chars().count() > limit {
        return Err(ServiceError::client(format!(
            "{what} exceeds {limit} characters"
        )));
    }
    Ok(())
}

fn outcome_of<T>(r: &Result<T, ServiceError>) -> &'static str {
    match r {
        Ok(_) => "ok",
        Err(ServiceError::ClientInput(_)) => "client_error",
        Err(ServiceError::Internal { .. }) => "internal_error",
    }
}

/* ----------------------------
POST /api/extract-uml
---------------------------- */

#[derive(Debug, Deserialize)]
pub struct ExtractReq {
    #[serde(default)]
    pub requirement: Option<String>,
}

async fn extract_uml(
    State(state): State<AppState>,
    payload: Result<Json<ExtractReq>, JsonRejection>,
) -> Result<Json<Model>, ServiceError> {
    let result = run_extract(&state, payload);
    metrics::record_extract(outcome_of(&result));
    result.map(Json)
}

fn run_extract(
    state: &AppState,
    payload: Result<Json<ExtractReq>, JsonRejection>,
) -> Result<Model, ServiceError> {
    let body = body_or_client_error(payload)?;
    let requirement = body
        .requirement
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| ServiceError::client("Requirement is required"))?;
    check_len(
        &requirement,
        state.config.limits.max_requirement_chars,
        "Requirement",
    )?;

    let model = extract_with_catalog(&requirement, &state.catalog);
    model
        .validate()
        .map_err(|e| ServiceError::internal(EXTRACT_FAILED, e))?;

    if state.config.logging.class_names {
        let names: Vec<&str> = model.class_names().take(LOGGED_CLASS_NAMES).collect();
        info!(target: "api", id = %InputId::of(&requirement), ?names, "extracted classes");
    }
    Ok(model)
}

/* ----------------------------
POST /api/refine-uml
---------------------------- */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineReq {
    #[serde(default)]
    pub current_model: Option<Model>,
    #[serde(default)]
    pub user_feedback: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<ChatTurn>>,
}

async fn refine_uml(
    State(state): State<AppState>,
    payload: Result<Json<RefineReq>, JsonRejection>,
) -> Result<Json<RefineReply>, ServiceError> {
    let result = run_refine(&state, payload);
    let intent = result
        .as_ref()
        .map_or(metrics::NO_INTENT, |res| res.intent.as_str());
    metrics::record_refine(outcome_of(&result), intent);
    result.map(|res| Json(res.reply))
}

fn run_refine(
    state: &AppState,
    payload: Result<Json<RefineReq>, JsonRejection>,
) -> Result<Resolution, ServiceError> {
    let body = body_or_client_error(payload)?;
    let (Some(model), Some(feedback)) = (
        body.current_model,
        body.user_feedback.filter(|f| !f.trim().is_empty()),
    ) else {
        return Err(ServiceError::client("Missing required fields"));
    };
    check_len(&feedback, state.config.limits.max_feedback_chars, "Feedback")?;
    model
        .validate()
        .map_err(|e| ServiceError::client(format!("currentModel is invalid: {e}")))?;

    let history = body.conversation_history.unwrap_or_default();
    let res = resolve(&model, &feedback, &history);
    if let Some(updated) = &res.reply.updated_model {
        updated
            .validate()
            .map_err(|e| ServiceError::internal(REFINE_FAILED, e))?;
    }
    Ok(res)
}
