//! Test utilities shared across the regtool workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary Docker config directories ([`DockerConfigGuard`])
//! - `DOCKER_CONFIG` overrides ([`EnvTestGuard`])
//! - HOME directory isolation ([`HomeEnvTestGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod docker_config;
pub mod env;
pub mod home;

// Re-export commonly used items
pub use docker_config::{DockerConfigGuard, encode_auth};
pub use env::EnvTestGuard;
pub use home::HomeEnvTestGuard;
