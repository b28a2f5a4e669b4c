//! Classification handlers - intent, field extraction, closure detection.

mod classify_reply;
mod detect_closure;
mod extract_field;

pub use classify_reply::{ClassifyReplyCommand, ClassifyReplyHandler, ClassifyReplyResult};
pub use detect_closure::{DetectClosureCommand, DetectClosureHandler};
pub use extract_field::{ExtractFieldCommand, ExtractFieldHandler};
