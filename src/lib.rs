//! Clarify Sim - Simulated Query Clarification Dialogues
//!
//! This crate simulates conversations between a clarifying agent, which ranks
//! candidate facets of an ambiguous search query and asks yes/no questions
//! about the best one, and a simulated user who knows their true intent and
//! answers with varying cooperativeness and limited patience.
//!
//! Runs report how many turns each dialogue took, whether the agent found
//! the intent, and optional retrieval metrics for the resolved query.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
