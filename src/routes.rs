//! Router assembly and JSON handlers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The single-page UI is embedded at `/`; everything else is a small JSON
//! API over the session controller. Every mutating endpoint responds with
//! the full session view so the page re-renders from one source of truth.

use axum::Router;
use axum::extract::{Path, State};
use axum::response::{Html, Json};
use axum::routing::{delete, get, post};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::services::refine;
use crate::services::session::SessionState;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/session", get(get_session))
        .route("/api/refine", post(run_refine))
        .route("/api/clear", post(clear_session))
        .route("/api/history/{id}/recall", post(recall_entry))
        .route("/api/history/{id}", delete(delete_entry))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

/// `GET /api/session` — current session view.
async fn get_session(State(state): State<AppState>) -> Json<SessionState> {
    let session = state.session.lock().await;
    Json(session.state().clone())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineBody {
    #[serde(default)]
    pub base_prompt: String,
    #[serde(default)]
    pub instruction: String,
}

/// `POST /api/refine` — run one edit cycle.
///
/// The session lock is dropped while the remote call runs, so `clear`,
/// recall, and delete stay available. A submit while a request is already
/// in flight is rejected by the state-machine guard and returns the
/// unchanged view; a validation failure returns the `failed` view without
/// touching the network.
///
/// The refine-then-complete/fail cycle runs in a detached task: axum drops
/// the handler future when the client disconnects, and the session outlives
/// the page, so the cycle must reach `complete` or `fail` on its own or the
/// `Pending` guard would wedge the controller until restart.
async fn run_refine(State(state): State<AppState>, Json(body): Json<RefineBody>) -> Json<SessionState> {
    let request = {
        let mut session = state.session.lock().await;
        match session.begin_submit(body.base_prompt, body.instruction) {
            Ok(request) => request,
            Err(_) => return Json(session.state().clone()),
        }
    };

    let cycle = tokio::spawn({
        let state = state.clone();
        async move {
            let outcome = refine::refine(&state.llm, &request).await;
            let mut session = state.session.lock().await;
            match outcome {
                Ok(modified) => session.complete(modified),
                Err(e) => session.fail(e.to_string()),
            }
        }
    });
    // Cancelling the handler cancels this await, not the spawned cycle.
    let _ = cycle.await;

    let session = state.session.lock().await;
    Json(session.state().clone())
}

/// `POST /api/clear` — reset working fields; history untouched.
async fn clear_session(State(state): State<AppState>) -> Json<SessionState> {
    let mut session = state.session.lock().await;
    session.clear();
    Json(session.state().clone())
}

/// `POST /api/history/:id/recall` — copy a record into the working fields.
async fn recall_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<SessionState> {
    let mut session = state.session.lock().await;
    session.recall(id);
    Json(session.state().clone())
}

/// `DELETE /api/history/:id` — remove a record; no-op for unknown ids.
async fn delete_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<SessionState> {
    let mut session = state.session.lock().await;
    session.delete(id);
    Json(session.state().clone())
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
