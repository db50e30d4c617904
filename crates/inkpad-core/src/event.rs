//! The pointer event union fed to the engine, and the repaint work that
//! applying it produces.

use crate::stroke::{StrokePoint, StrokeStyle};
use serde::{Deserialize, Serialize};

/// Host-assigned pointer identifier (stylus, touch contact, or mouse).
pub type PointerId = i64;

/// Bucket id owning strokes installed by bulk import, which have no
/// originating pointer.
pub const IMPORT_POINTER: PointerId = -1;

/// A routed input event for one pointer.
///
/// The UI shell translates its windowing events into this union and forwards
/// everything through a single dispatch; there is no per-event-kind callback
/// registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer pressed: starts a stroke.
    Down {
        pointer: PointerId,
        point: StrokePoint,
    },
    /// Pointer moved while pressed. `coalesced` carries sub-samples batched
    /// by the host, oldest first; they are applied before `point`.
    Move {
        pointer: PointerId,
        point: StrokePoint,
        coalesced: Vec<StrokePoint>,
    },
    /// Pointer released: finalizes the stroke.
    Up {
        pointer: PointerId,
        point: StrokePoint,
    },
    /// Pointer lost (left the surface, palm rejection, device reset).
    /// Terminates the session like a release.
    Cancel {
        pointer: PointerId,
        point: StrokePoint,
    },
}

impl PointerEvent {
    pub fn pointer(&self) -> PointerId {
        match self {
            PointerEvent::Down { pointer, .. }
            | PointerEvent::Move { pointer, .. }
            | PointerEvent::Up { pointer, .. }
            | PointerEvent::Cancel { pointer, .. } => *pointer,
        }
    }
}

/// Repaint work produced by applying events or history operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawRequest {
    /// Paint one new segment of a pointer's active stroke. `style` is the
    /// owning stroke's snapshot, so the render side needs no model lookup.
    Segment {
        pointer: PointerId,
        from: StrokePoint,
        to: StrokePoint,
        style: StrokeStyle,
    },
    /// Repaint the whole sequence.
    Full,
}
