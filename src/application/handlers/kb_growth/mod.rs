//! Knowledge-base growth handlers.

mod run_kb_growth;

pub use run_kb_growth::{KbGrowthReport, RunKbGrowthCommand, RunKbGrowthHandler, SourceTally};
