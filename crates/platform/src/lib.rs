//! In-memory stand-in for the live ads platform.
//!
//! Production: replace with a client for the platform's scripting API.
//! This provides the same gateway surface for development and testing.

pub mod memory;

pub use memory::InMemoryAdsPlatform;
