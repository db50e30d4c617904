//! Coalesces draw and commit requests into at most one raster pass per
//! rendering tick.

use crate::surface::BlitMode;
use inkpad_core::event::PointerId;
use inkpad_core::stroke::{StrokePoint, StrokeStyle};
use std::collections::BTreeMap;

/// One queued incremental segment, carrying the owning stroke's style so the
/// flush needs no model lookup.
#[derive(Debug, Clone)]
pub struct SegmentJob {
    pub from: StrokePoint,
    pub to: StrokePoint,
    pub style: StrokeStyle,
}

/// The draw work accumulated since the last flush.
#[derive(Debug)]
pub enum DrawBatch {
    /// Newest segments per pointer, in arrival order within each pointer.
    Segments(BTreeMap<PointerId, Vec<SegmentJob>>),
    /// Repaint the whole sequence.
    Full,
}

/// Pending raster work for the next tick.
///
/// The first request after a flush schedules work; later requests only
/// accumulate, so any number of events within one tick collapse into one
/// flush. A full repaint supersedes queued segments. The commit queue
/// coalesces independently, and `Replace` outranks `Over`.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    draw_scheduled: bool,
    segments: BTreeMap<PointerId, Vec<SegmentJob>>,
    full_pending: bool,
    commit_scheduled: bool,
    commit_replace: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one incremental segment for `pointer`. Dropped when a full
    /// repaint is already pending, since that repaint reads the live model.
    pub fn queue_segment(&mut self, pointer: PointerId, job: SegmentJob) {
        if self.full_pending {
            return;
        }
        self.draw_scheduled = true;
        self.segments.entry(pointer).or_default().push(job);
    }

    /// Queue a full repaint, superseding pending segments.
    pub fn queue_full(&mut self) {
        self.draw_scheduled = true;
        self.full_pending = true;
        self.segments.clear();
    }

    /// Queue a commit of the offscreen buffer to the visible surface.
    pub fn queue_commit(&mut self, mode: BlitMode) {
        self.commit_scheduled = true;
        if mode == BlitMode::Replace {
            self.commit_replace = true;
        }
    }

    pub fn has_work(&self) -> bool {
        self.draw_scheduled || self.commit_scheduled
    }

    /// Take all draw work queued since the last flush.
    pub fn take_draw(&mut self) -> Option<DrawBatch> {
        if !self.draw_scheduled {
            return None;
        }
        self.draw_scheduled = false;
        if std::mem::take(&mut self.full_pending) {
            self.segments.clear();
            Some(DrawBatch::Full)
        } else {
            Some(DrawBatch::Segments(std::mem::take(&mut self.segments)))
        }
    }

    /// Take the pending commit, if any.
    pub fn take_commit(&mut self) -> Option<BlitMode> {
        if !self.commit_scheduled {
            return None;
        }
        self.commit_scheduled = false;
        Some(if std::mem::take(&mut self.commit_replace) {
            BlitMode::Replace
        } else {
            BlitMode::Over
        })
    }
}
