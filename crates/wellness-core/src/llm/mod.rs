//! Model provider abstractions.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `collect_final_text`: reduce a response event stream to its reply text

pub mod box_provider;
pub mod provider;
pub mod reply;
