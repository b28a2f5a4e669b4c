//! Bot handlers - CRUD over the Bot aggregate.

mod create_bot;
mod delete_bot;
mod get_bot;
mod list_bots;
mod update_bot;

pub use create_bot::{CreateBotCommand, CreateBotError, CreateBotHandler, CreateBotResult};
pub use delete_bot::{DeleteBotCommand, DeleteBotError, DeleteBotHandler};
pub use get_bot::{GetBotError, GetBotHandler, GetBotQuery};
pub use list_bots::{ListBotsHandler, ListBotsQuery};
pub use update_bot::{UpdateBotCommand, UpdateBotError, UpdateBotHandler};
