//! Common utilities for the weft style engine.
//!
//! This crate provides shared infrastructure used by the engine crates:
//! - **Warning System** - deduplicated, colored diagnostics for dropped input

pub mod warning;
