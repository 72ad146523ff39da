//! Library entry for amqplite-cli used by integration tests and embedding.

pub mod commands;
pub mod json;

// Re-export commonly used items
pub use crate::commands::encode;
