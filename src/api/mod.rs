//! Provides clients and utilities for interacting with vendor sensor APIs.
//!
//! Includes:
//! - `sensor`: the reading fetcher and per-vendor JSON extraction.

mod sensor;

pub use sensor::*;
