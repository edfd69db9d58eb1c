//! # Resplan Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (environment and JSON/TOML files)
//! - JSON snapshot persistence and the JSON Lines history log
//! - The HTTP client and the LLM advice integration
//!
//! ## Architecture
//! - Implements traits defined in `resplan-core`
//! - Contains all "impure" code (filesystem, network)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod storage;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::llm::{AdviceError, LlmAdviceClient};
pub use storage::{JsonSnapshotStore, JsonlHistoryLog};
