//! Error types for the core model.

use crate::event::PointerId;
use thiserror::Error;

/// Fatal bookkeeping failures.
///
/// Out-of-order or duplicate pointer input is tolerated silently; these
/// errors fire only when the sequence or history invariants themselves have
/// been broken, which callers must not paper over.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A sequence or redo entry referenced a pointer bucket that is gone.
    #[error("no stroke bucket for pointer {0}")]
    MissingBucket(PointerId),
    /// A sequence entry referenced a stroke index outside its bucket.
    #[error("stroke {index} out of range for pointer {pointer}")]
    MissingStroke { pointer: PointerId, index: usize },
}
