//! # Roster Library
//!
//! This library exposes the Roster console modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;

pub use error::AppError;

// Re-export the core and client crates for convenience
pub use roster_client;
pub use roster_core;
