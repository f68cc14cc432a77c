//! Agents: definitions for each pipeline role and the client that runs them.

pub mod catalog;
pub mod client;
