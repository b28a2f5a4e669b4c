//! Application handlers, one directory per functional area.

pub mod bots;
pub mod classification;
pub mod insights;
pub mod interview;
pub mod kb_growth;
pub mod organizations;
pub mod plans;
