//! HTTP adapter for secret-guarded cron endpoints.

mod handlers;
mod routes;

pub use handlers::{CronHandlers, KbGrowthResponse, SourceTallyResponse};
pub use routes::cron_routes;
