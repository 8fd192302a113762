//! Error types for edgescale-core
//!
//! Provides a unified error type for grid construction and checked access.
//! Out-of-range access through the panicking accessors is a programming
//! error and never surfaces here; only the fallible twins report it.

use thiserror::Error;

/// edgescale-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid channel count
    #[error("invalid channel count: {0} (expected 1..=4)")]
    InvalidChannels(u32),

    /// Raw buffer does not match the declared geometry
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Coordinate or channel out of bounds
    #[error("sample ({x}, {y}, channel {channel}) out of bounds for {width}x{height}x{channels}")]
    OutOfBounds {
        x: u32,
        y: u32,
        channel: u32,
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Grid geometry mismatch between two operands
    #[error("dimension mismatch: expected {}x{}x{}, got {}x{}x{}", .expected.0, .expected.1, .expected.2, .actual.0, .actual.1, .actual.2)]
    DimensionMismatch {
        expected: (u32, u32, u32),
        actual: (u32, u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for edgescale-core operations
pub type Result<T> = std::result::Result<T, Error>;
