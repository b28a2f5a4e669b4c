//! Interview session handlers.

mod get_interview;
mod send_message;
mod start_interview;

pub use get_interview::{GetInterviewError, GetInterviewHandler, GetInterviewQuery};
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult, FAREWELL,
    STOP_CONFIRMATION_PROMPT,
};
pub use start_interview::{
    StartInterviewCommand, StartInterviewError, StartInterviewHandler, StartInterviewResult,
    CONSENT_PROMPT,
};
