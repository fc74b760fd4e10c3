//! Storage helpers for the service layer
//!
//! File-backed stores used by the local development repository.

pub mod json_map_store;
