//! Business Tuner - Conversational Interview Platform Backend
//!
//! This crate implements the interview engine behind Business Tuner:
//! plan-driven turn budgeting, the interview conversation state machine,
//! deterministic-plus-LLM intent classification, cross-source insight
//! aggregation, and the knowledge-base growth cron.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
