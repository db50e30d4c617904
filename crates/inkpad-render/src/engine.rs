//! The engine facade binding the core capture state to a raster surface.

use crate::error::EngineError;
use crate::painter;
use crate::scheduler::{DrawBatch, FrameScheduler, SegmentJob};
use crate::surface::{BlitMode, Offscreen, RasterSurface};
use inkpad_core::board::Board;
use inkpad_core::event::{DrawRequest, PointerEvent};
use inkpad_core::settings::EngineSettings;
use inkpad_core::stroke::Stroke;

/// A freehand-ink engine bound to one caller-supplied raster surface.
///
/// Events, history operations, and forced repaints only *queue* raster work;
/// the host drives the actual flush by calling [`Engine::tick`] once per
/// rendering frame, which performs at most one composite onto the surface no
/// matter how many events arrived in between.
pub struct Engine<S: RasterSurface> {
    board: Board,
    surface: S,
    offscreen: Offscreen,
    scheduler: FrameScheduler,
}

impl<S: RasterSurface> Engine<S> {
    /// Bind to a surface; the offscreen working buffer adopts its size.
    pub fn new(surface: S) -> Self {
        let offscreen = Offscreen::new(surface.width(), surface.height());
        Self {
            board: Board::new(),
            surface,
            offscreen,
            scheduler: FrameScheduler::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &EngineSettings {
        self.board.settings()
    }

    /// Live settings; effective on the next stroke. Background changes
    /// become visible through [`Engine::render`].
    pub fn settings_mut(&mut self) -> &mut EngineSettings {
        self.board.settings_mut()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface stays caller-owned; resize it here, then call
    /// [`Engine::render`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Route one pointer event through the capture state machine and queue
    /// the resulting raster work.
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<(), EngineError> {
        let mut requests = Vec::new();
        self.board.handle_event(event, &mut requests)?;
        self.enqueue(requests);
        Ok(())
    }

    /// Remove the topmost stroke. Returns whether anything changed.
    pub fn undo(&mut self) -> Result<bool, EngineError> {
        let mut requests = Vec::new();
        let changed = self.board.undo(&mut requests)?;
        self.enqueue(requests);
        Ok(changed)
    }

    /// Re-append the most recently undone stroke. Returns whether anything
    /// changed.
    pub fn redo(&mut self) -> Result<bool, EngineError> {
        let mut requests = Vec::new();
        let changed = self.board.redo(&mut requests)?;
        self.enqueue(requests);
        Ok(changed)
    }

    /// Force a full repaint at the next tick.
    pub fn render(&mut self) {
        self.scheduler.queue_full();
    }

    /// Flat ordered snapshot of the stroke sequence.
    pub fn strokes(&self) -> Vec<Stroke> {
        self.board.strokes()
    }

    /// Replace the whole stroke sequence and repaint.
    pub fn set_strokes(&mut self, strokes: Vec<Stroke>) {
        self.board.set_strokes(strokes);
        self.scheduler.queue_full();
    }

    /// Frame boundary: adopt surface resizes, flush queued drawing onto the
    /// offscreen buffer, then commit at most once.
    pub fn tick(&mut self) -> Result<(), EngineError> {
        self.adopt_resize();

        if let Some(batch) = self.scheduler.take_draw() {
            match batch {
                DrawBatch::Full => {
                    self.offscreen.clear();
                    let (width, height) = (self.offscreen.width(), self.offscreen.height());
                    let board = &self.board;
                    self.offscreen.paint(|ctx| {
                        painter::paint_scene(ctx, board.sequence(), board.settings(), width, height);
                    });
                    self.scheduler.queue_commit(BlitMode::Replace);
                }
                DrawBatch::Segments(segments) => {
                    let board = &self.board;
                    self.offscreen.paint(|ctx| {
                        for jobs in segments.values() {
                            for job in jobs {
                                painter::paint_segment(
                                    ctx,
                                    job.from,
                                    job.to,
                                    &job.style,
                                    board.settings(),
                                );
                            }
                        }
                    });
                    self.scheduler.queue_commit(BlitMode::Over);
                }
            }
        }

        if let Some(mode) = self.scheduler.take_commit() {
            self.surface.blit(self.offscreen.data(), mode)?;
            self.offscreen.clear();
        }
        Ok(())
    }

    fn enqueue(&mut self, requests: Vec<DrawRequest>) {
        for request in requests {
            match request {
                DrawRequest::Full => self.scheduler.queue_full(),
                DrawRequest::Segment {
                    pointer,
                    from,
                    to,
                    style,
                } => self
                    .scheduler
                    .queue_segment(pointer, SegmentJob { from, to, style }),
            }
        }
    }

    /// Pick up caller-driven surface resizes; the offscreen buffer follows
    /// the surface and the whole scene is repainted.
    fn adopt_resize(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        if width != self.offscreen.width() || height != self.offscreen.height() {
            log::debug!("surface resized to {width}x{height}");
            self.offscreen = Offscreen::new(width, height);
            self.scheduler.queue_full();
        }
    }
}
