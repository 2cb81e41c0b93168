use crate::coaching::dispatcher::Dispatcher;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Template registry plus the generator behind it (Gemini in production).
    pub dispatcher: Dispatcher,
    /// In-memory sessions; nothing survives a restart.
    pub sessions: SessionStore,
}
