use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::pipeline::flows::AiFlows;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every external client lives here with an explicit construction path in
/// `main` — no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Prompt adapters for the processing pipeline. Production wires
    /// `LlmFlows`; tests substitute a mock.
    pub flows: Arc<dyn AiFlows>,
    pub config: Config,
}
