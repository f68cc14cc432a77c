//! Business logic for the wellness agent service.
//!
//! Defines the provider port (`LlmProvider`) that the infrastructure layer
//! implements, the in-memory session store, the agent client, and the
//! three-stage pipeline. Depends only on `wellness-types` -- never on
//! `wellness-infra` or any network crate.

pub mod agent;
pub mod llm;
pub mod pipeline;
pub mod session;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
