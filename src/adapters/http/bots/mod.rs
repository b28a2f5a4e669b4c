//! HTTP adapter for bot and plan endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BotResponse, CreateBotRequest, EffectivePlanResponse, GeneratePlanRequest, ListBotsParams,
    OverridesUpdateResponse, PlanResponse, TopicBudgetResponse, TopicSpecRequest,
    UpdateBotRequest, UpdateOverridesRequest,
};
pub use handlers::BotHandlers;
pub use routes::bot_routes;
