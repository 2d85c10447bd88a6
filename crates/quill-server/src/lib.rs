//! # Quill Server
//!
//! Dependency injection wiring and startup for the Quill blog API.

pub mod di;
pub mod startup;
