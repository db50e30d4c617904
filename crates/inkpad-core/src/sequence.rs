//! The z-ordered stroke sequence shared by all pointers.

use crate::error::BoardError;
use crate::event::{IMPORT_POINTER, PointerId};
use crate::stroke::{Stroke, StrokePoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Address of one stroke: the owning pointer and the index within that
/// pointer's stroke list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeKey {
    pub pointer: PointerId,
    pub index: usize,
}

/// Z-ordered collection of finished and in-progress strokes.
///
/// Strokes live in per-pointer buckets; `order` is the authoritative paint
/// order (first entry = bottom layer), keyed by press time so strokes from
/// concurrent pointers interleave by when they *started*, not when they
/// finished.
#[derive(Debug, Clone, Default)]
pub struct StrokeSequence {
    buckets: HashMap<PointerId, Vec<Stroke>>,
    order: Vec<StrokeKey>,
}

impl StrokeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of strokes in paint order.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append a stroke at the sequence tail, assigning its paint order.
    pub fn push(&mut self, pointer: PointerId, stroke: Stroke) -> StrokeKey {
        let bucket = self.buckets.entry(pointer).or_default();
        let key = StrokeKey {
            pointer,
            index: bucket.len(),
        };
        bucket.push(stroke);
        self.order.push(key);
        key
    }

    pub fn get(&self, key: StrokeKey) -> Option<&Stroke> {
        self.buckets.get(&key.pointer)?.get(key.index)
    }

    /// Append a point to the keyed stroke.
    pub fn push_point(&mut self, key: StrokeKey, point: StrokePoint) -> Result<(), BoardError> {
        let stroke = self
            .buckets
            .get_mut(&key.pointer)
            .ok_or(BoardError::MissingBucket(key.pointer))?
            .get_mut(key.index)
            .ok_or(BoardError::MissingStroke {
                pointer: key.pointer,
                index: key.index,
            })?;
        stroke.as_paint_mut().push_point(point);
        Ok(())
    }

    /// Remove and return the topmost stroke (undo).
    ///
    /// The tail entry always references its bucket's tail: strokes are
    /// appended to bucket and order in press order, and redo re-appends at
    /// both tails, so removal never shifts another key.
    pub fn pop_tail(&mut self) -> Result<Option<(StrokeKey, Stroke)>, BoardError> {
        let Some(key) = self.order.pop() else {
            return Ok(None);
        };
        let bucket = self
            .buckets
            .get_mut(&key.pointer)
            .ok_or(BoardError::MissingBucket(key.pointer))?;
        if key.index >= bucket.len() {
            return Err(BoardError::MissingStroke {
                pointer: key.pointer,
                index: key.index,
            });
        }
        let stroke = bucket.remove(key.index);
        Ok(Some((key, stroke)))
    }

    /// Re-insert a previously removed stroke at the new tail (redo).
    ///
    /// The stroke lands at the current tail of its owning bucket and of the
    /// paint order, not at its original position.
    pub fn push_back(&mut self, pointer: PointerId, stroke: Stroke) -> Result<StrokeKey, BoardError> {
        let bucket = self
            .buckets
            .get_mut(&pointer)
            .ok_or(BoardError::MissingBucket(pointer))?;
        let key = StrokeKey {
            pointer,
            index: bucket.len(),
        };
        bucket.push(stroke);
        self.order.push(key);
        Ok(key)
    }

    /// Strokes in paint order (first = bottom layer).
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Stroke> {
        self.order
            .iter()
            .filter_map(|key| self.buckets.get(&key.pointer)?.get(key.index))
    }

    /// Flat ordered snapshot for export.
    pub fn export(&self) -> Vec<Stroke> {
        self.order
            .iter()
            .filter_map(|key| {
                let stroke = self.buckets.get(&key.pointer)?.get(key.index);
                debug_assert!(stroke.is_some(), "dangling sequence key {key:?}");
                stroke.cloned()
            })
            .collect()
    }

    /// Replace the whole sequence with an imported flat list. All imported
    /// strokes land in the reserved import bucket.
    pub fn import(&mut self, strokes: Vec<Stroke>) {
        self.buckets.clear();
        self.order.clear();
        let bucket = self.buckets.entry(IMPORT_POINTER).or_default();
        for (index, stroke) in strokes.into_iter().enumerate() {
            self.order.push(StrokeKey {
                pointer: IMPORT_POINTER,
                index,
            });
            bucket.push(stroke);
        }
    }

    /// Serialize the ordered stroke list to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.export())
    }

    /// Parse a stroke list previously produced by [`Self::to_json`].
    pub fn strokes_from_json(json: &str) -> Result<Vec<Stroke>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
