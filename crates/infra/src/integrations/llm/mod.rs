//! LLM integration for project advice
//!
//! # Architecture
//!
//! - **Client**: `LlmAdviceClient` - Chat Completions client implementing the
//!   core `AdviceProvider` port
//! - **Types**: Request/response types and `AdviceError`
//!
//! # Providers
//!
//! - `openai`: `POST {endpoint}/chat/completions` with a bearer token;
//!   `endpoint` defaults to `https://api.openai.com/v1`
//! - `azure`: `POST {endpoint}/openai/deployments/{deployment}/chat/completions`
//!   with an `api-key` header and an `api-version` query parameter
//!
//! Both are called with a single user message, `max_tokens = 1500` and
//! `temperature = 0.7`. Nothing is retried.

pub mod client;
pub mod types;

pub use client::LlmAdviceClient;
pub use types::AdviceError;
