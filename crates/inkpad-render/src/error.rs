//! Error types for the render side.

use inkpad_core::BoardError;
use thiserror::Error;

/// Failures while rasterizing or presenting.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The core model reported corrupted bookkeeping.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// A blit was attempted with a buffer that does not match the surface.
    #[error("pixel buffer of {got} bytes does not match the {expected} expected")]
    BufferMismatch { expected: usize, got: usize },
}
