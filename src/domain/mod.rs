//! Domain layer - pure business logic with no I/O.

pub mod bot;
pub mod foundation;
pub mod insights;
pub mod intent;
pub mod interview;
pub mod knowledge;
pub mod organization;
pub mod plan;
