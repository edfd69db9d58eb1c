//! Shared test helpers for `resplan-core` integration tests.
//!
//! Fixture builders for a small plan plus recorder/provider doubles, so the
//! integration tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod recorders;
