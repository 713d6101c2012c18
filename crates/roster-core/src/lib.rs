//! Core types and trait definitions for the Roster person registry.
//!
//! This crate is free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod patch;
pub mod person;
pub mod store;

pub use error::{Error, Result};
