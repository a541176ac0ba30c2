//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into axum handlers via the `State` extractor. The
//! single edit session lives behind an async mutex; handlers take the lock
//! for state transitions only and release it before awaiting the remote
//! edit call, so the session stays responsive while a request is pending.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm::GenerateText;
use crate::services::session::Session;

/// Shared application state. Clone is required by axum — all inner fields
/// are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub llm: Arc<dyn GenerateText>,
}

impl AppState {
    #[must_use]
    pub fn new(session: Session, llm: Arc<dyn GenerateText>) -> Self {
        Self { session: Arc::new(Mutex::new(session)), llm }
    }
}
