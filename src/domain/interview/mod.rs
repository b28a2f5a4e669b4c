//! Interview session domain: phase state machine, turn tracking, results.

mod message;
mod session;
mod state;
mod topic_result;

pub use message::{InterviewMessage, MessageRole};
pub use session::InterviewSession;
pub use state::InterviewPhase;
pub use topic_result::{TopicResult, TopicStatus};
