//! Whole-stroke undo/redo over the stroke sequence.

use crate::error::BoardError;
use crate::event::PointerId;
use crate::sequence::{StrokeKey, StrokeSequence};
use crate::stroke::Stroke;

/// A stroke parked by undo, waiting for redo.
///
/// Only the owning pointer survives as a position key; redo re-appends at
/// the current tail rather than restoring the original index.
#[derive(Debug, Clone)]
pub struct RedoEntry {
    pub pointer: PointerId,
    pub stroke: Stroke,
}

/// Undo/redo stacks operating on whole strokes.
///
/// The undo stack *is* the sequence order itself, so only redo entries need
/// separate storage. Because redo appends at the new tail, interleaving undo
/// with fresh strokes from other pointers can legitimately reorder paint
/// order relative to the original sequence.
#[derive(Debug, Clone, Default)]
pub struct History {
    redo: Vec<RedoEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the topmost stroke into the redo stack.
    ///
    /// Returns the removed stroke's key, or `None` when the sequence is
    /// empty (a valid no-op, not an error).
    pub fn undo(&mut self, sequence: &mut StrokeSequence) -> Result<Option<StrokeKey>, BoardError> {
        match sequence.pop_tail()? {
            Some((key, stroke)) => {
                self.redo.push(RedoEntry {
                    pointer: key.pointer,
                    stroke,
                });
                log::debug!("undo: removed stroke {key:?}");
                Ok(Some(key))
            }
            None => Ok(None),
        }
    }

    /// Re-append the most recently undone stroke at the new tail.
    ///
    /// Returns the re-inserted key, or `None` when the redo stack is empty.
    pub fn redo(&mut self, sequence: &mut StrokeSequence) -> Result<Option<StrokeKey>, BoardError> {
        let Some(entry) = self.redo.pop() else {
            return Ok(None);
        };
        let key = sequence.push_back(entry.pointer, entry.stroke)?;
        log::debug!("redo: restored stroke as {key:?}");
        Ok(Some(key))
    }

    /// Drop all redo entries. Any new ink invalidates them.
    pub fn invalidate(&mut self) {
        if !self.redo.is_empty() {
            log::trace!("redo stack invalidated ({} entries)", self.redo.len());
            self.redo.clear();
        }
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of strokes waiting for redo.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{StrokePoint, StrokeStyle};

    fn stroke_at(x: f64) -> Stroke {
        let mut stroke = Stroke::paint(StrokeStyle::default());
        stroke.as_paint_mut().push_point(StrokePoint::new(x, 0.0));
        stroke
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut seq = StrokeSequence::new();
        let mut history = History::new();
        assert!(history.undo(&mut seq).unwrap().is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_redo_empty_is_noop() {
        let mut seq = StrokeSequence::new();
        let mut history = History::new();
        assert!(history.redo(&mut seq).unwrap().is_none());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut seq = StrokeSequence::new();
        let mut history = History::new();
        seq.push(1, stroke_at(0.0));
        seq.push(1, stroke_at(1.0));
        let before = seq.export();

        assert!(history.undo(&mut seq).unwrap().is_some());
        assert_eq!(seq.len(), 1);
        assert_eq!(history.redo_len(), 1);

        assert!(history.redo(&mut seq).unwrap().is_some());
        assert_eq!(seq.export(), before);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_invalidate_clears_redo() {
        let mut seq = StrokeSequence::new();
        let mut history = History::new();
        seq.push(1, stroke_at(0.0));

        history.undo(&mut seq).unwrap();
        assert!(history.can_redo());

        history.invalidate();
        assert!(!history.can_redo());
        assert!(history.redo(&mut seq).unwrap().is_none());
        assert!(seq.is_empty());
    }
}
