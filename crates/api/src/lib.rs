//! # Resplan App
//!
//! Application layer - commands and the composition root.
//!
//! This crate contains:
//! - Command functions (CLI → planning store bridge)
//! - Application context (dependency injection)
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires file-backed adapters into the planning store

pub mod commands;
pub mod context;
pub mod utils;

pub use context::AppContext;
