//! Adapters layer - infrastructure implementations of the ports.

pub mod http;
pub mod llm;
pub mod memory;
pub mod postgres;
pub mod sources;
