//! Hlsforge - HLS playlist inspection tool
//!
//! This library crate exposes configuration, input handling and report
//! rendering for integration testing. Parsing lives in `hlsforge-parser`.

pub mod config;
pub mod input;
pub mod report;
