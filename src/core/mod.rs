//! Core business logic layer
//!
//! This module contains the data structures, the scoring rule, the storage
//! trait with its SQLite implementation, and the service façade.

pub mod data;
pub mod operations;
pub mod scoring;
pub mod store;
pub mod traits;
