//! HTTP routes for cron endpoints.

use axum::{routing::get, Router};

use super::handlers::{run_kb_growth, CronHandlers};

/// Creates the cron router, mounted under `/api/cron`. Not behind session
/// auth; guarded by the shared secret inside the handler.
pub fn cron_routes(handlers: CronHandlers) -> Router {
    Router::new()
        .route("/kb-growth", get(run_kb_growth))
        .with_state(handlers)
}
