mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let llm = llm::LlmClient::from_env().expect("LLM configuration failed (is LLM_API_KEY set?)");
    tracing::info!(model = llm.model(), "LLM client initialized");

    let store = services::history::HistoryStore::from_env();
    tracing::info!(path = %store.path().display(), "history store configured");

    let session = services::session::Session::new(store);
    let state = state::AppState::new(session, Arc::new(llm));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "promptpatch listening");
    axum::serve(listener, app).await.expect("server failed");
}
