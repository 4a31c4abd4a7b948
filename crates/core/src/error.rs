//! Error types for the fallible edges of the simulation.
//!
//! Stepping the simulation never fails; only map construction, config
//! loading and state snapshots can.

use thiserror::Error;

/// Errors raised while building a [`GridMap`](crate::map::GridMap).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: usize, height: usize },

    #[error("map dimensions {width}x{height} overflow the pixel buffer size")]
    TooLarge { width: usize, height: usize },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for RGBA8")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("layout row {row} is {len} cells wide, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
}

/// Errors raised while saving or restoring a state snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Errors raised while loading a [`SimulationConfig`](crate::config::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
