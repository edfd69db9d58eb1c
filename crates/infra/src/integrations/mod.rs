//! External service integrations

pub mod llm;
