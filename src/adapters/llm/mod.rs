//! LLM gateway adapters.

mod mock_gateway;
mod openai_gateway;

pub use mock_gateway::MockLlmGateway;
pub use openai_gateway::{OpenAiGateway, OpenAiGatewayConfig};
