//! HTTP routes for bot and plan endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    create_bot, delete_bot, generate_plan, get_bot, get_plan, list_bots, update_bot,
    update_overrides, BotHandlers,
};

/// Creates the bot router, mounted under `/api/bots`.
pub fn bot_routes(handlers: BotHandlers) -> Router {
    Router::new()
        .route("/", post(create_bot))
        .route("/", get(list_bots))
        .route("/:id", get(get_bot))
        .route("/:id", put(update_bot))
        .route("/:id", delete(delete_bot))
        .route("/:id/plan", get(get_plan))
        .route("/:id/plan/generate", post(generate_plan))
        .route("/:id/plan/overrides", put(update_overrides))
        .with_state(handlers)
}
