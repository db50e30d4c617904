//! Per-pointer capture sessions: the press/move/release state machine.

use crate::error::BoardError;
use crate::event::{DrawRequest, PointerId};
use crate::history::History;
use crate::sequence::{StrokeKey, StrokeSequence};
use crate::settings::EngineSettings;
use crate::stroke::{Smoothing, Stroke, StrokePoint};
use std::collections::{HashMap, HashSet};

/// Live state of one currently pressed pointer.
#[derive(Debug, Clone)]
pub struct PointerSession {
    /// The in-progress stroke owned by this session.
    pub stroke: StrokeKey,
    /// Most recently applied point; start of the next incremental segment.
    pub last_point: StrokePoint,
}

/// Maps active pointer ids to their in-progress strokes.
///
/// Any number of pointers may be active at once; each owns an independent
/// stroke and session. The only cross-pointer state is the shared sequence
/// (paint order) and the settings snapshot taken at press time.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    sessions: HashMap<PointerId, PointerSession>,
    active: HashSet<PointerId>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, pointer: PointerId) -> bool {
        self.active.contains(&pointer)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn session(&self, pointer: PointerId) -> Option<&PointerSession> {
        self.sessions.get(&pointer)
    }

    /// Begin a stroke for `pointer`.
    ///
    /// A duplicate press for an id that already has a session is dropped;
    /// input devices deliver out-of-order events and that is never fatal.
    /// The press point is applied as the first move so a tap still produces
    /// a visible dot.
    pub fn press(
        &mut self,
        pointer: PointerId,
        point: StrokePoint,
        sequence: &mut StrokeSequence,
        history: &mut History,
        settings: &EngineSettings,
        out: &mut Vec<DrawRequest>,
    ) -> Result<(), BoardError> {
        if self.sessions.contains_key(&pointer) {
            log::warn!("duplicate press for pointer {pointer}; ignoring");
            return Ok(());
        }

        let key = sequence.push(pointer, Stroke::paint(settings.stroke_style()));
        self.active.insert(pointer);
        self.sessions.insert(
            pointer,
            PointerSession {
                stroke: key,
                last_point: point,
            },
        );
        log::debug!("pointer {pointer} down, stroke {key:?}");

        self.apply_point(pointer, point, sequence, history, settings, out)
    }

    /// Append one move sample to the pointer's active stroke.
    ///
    /// Stale or duplicate events (no session, or a pointer that is no longer
    /// active) are silently dropped. Every applied sample invalidates redo.
    pub fn apply_point(
        &mut self,
        pointer: PointerId,
        point: StrokePoint,
        sequence: &mut StrokeSequence,
        history: &mut History,
        settings: &EngineSettings,
        out: &mut Vec<DrawRequest>,
    ) -> Result<(), BoardError> {
        if !self.active.contains(&pointer) {
            log::trace!("move for inactive pointer {pointer}; ignoring");
            return Ok(());
        }
        let Some(session) = self.sessions.get_mut(&pointer) else {
            log::trace!("move for unknown pointer {pointer}; ignoring");
            return Ok(());
        };

        history.invalidate();

        let key = session.stroke;
        let style = *sequence
            .get(key)
            .ok_or(BoardError::MissingStroke {
                pointer: key.pointer,
                index: key.index,
            })?
            .style();

        let from = session.last_point;
        sequence.push_point(key, point)?;
        session.last_point = point;

        // Cheap incremental segments while the caller favors speed or the
        // stroke needs no curve fitting; everything else repaints fully for
        // accuracy.
        let request = if settings.low_quality || style.smoothing == Smoothing::None {
            DrawRequest::Segment {
                pointer,
                from,
                to: point,
                style,
            }
        } else {
            DrawRequest::Full
        };
        out.push(request);
        Ok(())
    }

    /// Apply the final sample and close the session.
    ///
    /// The final point is skipped when it coincides with the last applied
    /// position, so a release at rest does not duplicate the tail sample. A
    /// full re-render is always requested to normalize any partial
    /// low-quality drawing into final quality.
    pub fn release(
        &mut self,
        pointer: PointerId,
        point: StrokePoint,
        sequence: &mut StrokeSequence,
        history: &mut History,
        settings: &EngineSettings,
        out: &mut Vec<DrawRequest>,
    ) -> Result<(), BoardError> {
        let Some(last_point) = self.sessions.get(&pointer).map(|s| s.last_point) else {
            log::trace!("release for unknown pointer {pointer}; ignoring");
            return Ok(());
        };

        if last_point.pos != point.pos {
            self.apply_point(pointer, point, sequence, history, settings, out)?;
        }

        self.active.remove(&pointer);
        self.sessions.remove(&pointer);
        log::debug!("pointer {pointer} up");

        out.push(DrawRequest::Full);
        Ok(())
    }

    /// Drop any session that owns `key` (its stroke was removed by undo).
    /// Later events for that pointer fall into the silent stale-event path.
    pub fn forget_stroke(&mut self, key: StrokeKey) {
        if self
            .sessions
            .get(&key.pointer)
            .is_some_and(|session| session.stroke == key)
        {
            self.sessions.remove(&key.pointer);
            self.active.remove(&key.pointer);
            log::debug!("session for pointer {} dropped with its stroke", key.pointer);
        }
    }

    /// Clear all sessions and active pointers (bulk import).
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.active.clear();
    }
}
