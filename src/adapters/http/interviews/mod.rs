//! HTTP adapter for interview endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    InterviewResponse, MessageResponse, SendMessageRequest, SendMessageResponse,
    StartInterviewRequest, StartInterviewResponse, TopicResultResponse,
};
pub use handlers::InterviewHandlers;
pub use routes::interview_routes;
