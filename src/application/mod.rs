//! Application layer - use-case handlers orchestrating domain and ports.

pub mod handlers;

pub use handlers::{bots, classification, insights, interview, kb_growth, organizations, plans};
