//! The drawing board: event dispatch, history, and bulk import/export.

use crate::error::BoardError;
use crate::event::{DrawRequest, PointerEvent};
use crate::history::History;
use crate::sequence::StrokeSequence;
use crate::session::SessionTracker;
use crate::settings::EngineSettings;
use crate::stroke::Stroke;

/// Core engine state: stroke sequence, live pointer sessions, history, and
/// settings.
///
/// Owns no pixels. Applying events and history operations yields
/// [`DrawRequest`]s for the render side to schedule; everything here runs
/// synchronously on the host's single logical thread.
#[derive(Debug, Clone, Default)]
pub struct Board {
    sequence: StrokeSequence,
    history: History,
    tracker: SessionTracker,
    settings: EngineSettings,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(&self) -> &StrokeSequence {
        &self.sequence
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EngineSettings {
        &mut self.settings
    }

    /// Apply one pointer event, collecting repaint work into `out`.
    ///
    /// Coalesced move sub-samples are applied in arrival order before the
    /// primary point, each producing its own appended point.
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        out: &mut Vec<DrawRequest>,
    ) -> Result<(), BoardError> {
        match event {
            PointerEvent::Down { pointer, point } => self.tracker.press(
                pointer,
                point,
                &mut self.sequence,
                &mut self.history,
                &self.settings,
                out,
            ),
            PointerEvent::Move {
                pointer,
                point,
                coalesced,
            } => {
                for sample in coalesced {
                    self.tracker.apply_point(
                        pointer,
                        sample,
                        &mut self.sequence,
                        &mut self.history,
                        &self.settings,
                        out,
                    )?;
                }
                self.tracker.apply_point(
                    pointer,
                    point,
                    &mut self.sequence,
                    &mut self.history,
                    &self.settings,
                    out,
                )
            }
            PointerEvent::Up { pointer, point } | PointerEvent::Cancel { pointer, point } => {
                self.tracker.release(
                    pointer,
                    point,
                    &mut self.sequence,
                    &mut self.history,
                    &self.settings,
                    out,
                )
            }
        }
    }

    /// Remove the topmost stroke. Returns whether anything changed; a
    /// successful undo requests a full repaint and closes the session of a
    /// stroke that was still being drawn.
    pub fn undo(&mut self, out: &mut Vec<DrawRequest>) -> Result<bool, BoardError> {
        match self.history.undo(&mut self.sequence)? {
            Some(key) => {
                self.tracker.forget_stroke(key);
                out.push(DrawRequest::Full);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-append the most recently undone stroke at the new tail. Returns
    /// whether anything changed.
    pub fn redo(&mut self, out: &mut Vec<DrawRequest>) -> Result<bool, BoardError> {
        match self.history.redo(&mut self.sequence)? {
            Some(_) => {
                out.push(DrawRequest::Full);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flat ordered snapshot of the sequence.
    pub fn strokes(&self) -> Vec<Stroke> {
        self.sequence.export()
    }

    /// Replace the whole sequence. Drops all sessions, active pointers, and
    /// redo state; the imported list becomes the new paint order.
    pub fn set_strokes(&mut self, strokes: Vec<Stroke>) {
        self.tracker.clear();
        self.history.invalidate();
        self.sequence.import(strokes);
        log::debug!("imported {} strokes", self.sequence.len());
    }

    /// Serialize the ordered stroke list to JSON.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.sequence.to_json()
    }

    /// Replace the sequence from a JSON stroke list.
    pub fn import_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let strokes = StrokeSequence::strokes_from_json(json)?;
        self.set_strokes(strokes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Color, PaintStroke, Smoothing, StrokeColor, StrokePoint, StrokeStyle};

    fn down(pointer: i64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            pointer,
            point: StrokePoint::new(x, y),
        }
    }

    fn move_to(pointer: i64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            pointer,
            point: StrokePoint::new(x, y),
            coalesced: Vec::new(),
        }
    }

    fn up(pointer: i64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            pointer,
            point: StrokePoint::new(x, y),
        }
    }

    fn apply(board: &mut Board, event: PointerEvent) {
        let mut out = Vec::new();
        board.handle_event(event, &mut out).unwrap();
    }

    fn draw_stroke(board: &mut Board, pointer: i64, from: (f64, f64), to: (f64, f64)) {
        apply(board, down(pointer, from.0, from.1));
        apply(board, move_to(pointer, to.0, to.1));
        apply(board, up(pointer, to.0, to.1));
    }

    #[test]
    fn test_single_stroke_scenario() {
        let mut board = Board::new();
        board.settings_mut().stroke_color = StrokeColor::Solid(Color::new(255, 0, 0, 255));
        board.settings_mut().stroke_width = 4.0;

        draw_stroke(&mut board, 1, (10.0, 10.0), (20.0, 10.0));

        let strokes = board.strokes();
        assert_eq!(strokes.len(), 1);
        let paint = strokes[0].as_paint();
        assert_eq!(paint.points.len(), 2);
        assert_eq!(paint.style.color, StrokeColor::Solid(Color::new(255, 0, 0, 255)));
        assert_eq!(paint.style.width, 4.0);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut board = Board::new();
        draw_stroke(&mut board, 1, (0.0, 0.0), (5.0, 0.0));
        let before = board.strokes();

        let mut out = Vec::new();
        assert!(board.undo(&mut out).unwrap());
        assert!(board.strokes().is_empty());
        assert_eq!(out, vec![DrawRequest::Full]);

        assert!(board.redo(&mut out).unwrap());
        assert_eq!(board.strokes(), before);
    }

    #[test]
    fn test_draw_after_undo_clears_redo() {
        let mut board = Board::new();
        draw_stroke(&mut board, 1, (0.0, 0.0), (5.0, 0.0));

        let mut out = Vec::new();
        assert!(board.undo(&mut out).unwrap());
        assert_eq!(board.history().redo_len(), 1);

        draw_stroke(&mut board, 1, (9.0, 9.0), (10.0, 9.0));
        assert_eq!(board.history().redo_len(), 0);

        // The redo attempt is a no-op and does not resurrect the stroke.
        assert!(!board.redo(&mut out).unwrap());
        let strokes = board.strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].as_paint().points[0].pos.x, 9.0);
    }

    #[test]
    fn test_press_order_wins_over_release_order() {
        let mut board = Board::new();
        apply(&mut board, down(1, 0.0, 0.0));
        apply(&mut board, down(2, 10.0, 0.0));
        apply(&mut board, up(2, 10.0, 0.0));
        apply(&mut board, up(1, 0.0, 0.0));

        let strokes = board.strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].as_paint().points[0].pos.x, 0.0);
        assert_eq!(strokes[1].as_paint().points[0].pos.x, 10.0);
    }

    #[test]
    fn test_coalesced_samples_apply_in_arrival_order() {
        let mut board = Board::new();
        apply(&mut board, down(1, 0.0, 0.0));
        apply(
            &mut board,
            PointerEvent::Move {
                pointer: 1,
                point: StrokePoint::new(3.0, 0.0),
                coalesced: vec![StrokePoint::new(1.0, 0.0), StrokePoint::new(2.0, 0.0)],
            },
        );

        let strokes = board.strokes();
        let xs: Vec<_> = strokes[0].as_paint().points.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_cancel_finalizes_like_release() {
        let mut board = Board::new();
        apply(&mut board, down(1, 0.0, 0.0));
        apply(
            &mut board,
            PointerEvent::Cancel {
                pointer: 1,
                point: StrokePoint::new(2.0, 0.0),
            },
        );

        assert!(!board.tracker().is_active(1));
        let strokes = board.strokes();
        assert_eq!(strokes[0].as_paint().points.len(), 2);
    }

    #[test]
    fn test_undo_mid_stroke_drops_session() {
        let mut board = Board::new();
        apply(&mut board, down(1, 0.0, 0.0));

        let mut out = Vec::new();
        assert!(board.undo(&mut out).unwrap());
        assert!(!board.tracker().is_active(1));

        // The rest of the gesture is stale input, silently dropped.
        apply(&mut board, move_to(1, 1.0, 0.0));
        apply(&mut board, up(1, 1.0, 0.0));
        assert!(board.strokes().is_empty());
    }

    #[test]
    fn test_import_replaces_and_clears_state() {
        let mut board = Board::new();
        draw_stroke(&mut board, 1, (0.0, 0.0), (5.0, 0.0));
        apply(&mut board, down(2, 7.0, 7.0));

        let mut out = Vec::new();
        board.undo(&mut out).unwrap();
        assert!(board.history().can_redo());

        let imported = vec![Stroke::Paint(PaintStroke::from_points(
            StrokeStyle::default(),
            vec![StrokePoint::new(1.0, 1.0)],
        ))];
        board.set_strokes(imported.clone());

        assert_eq!(board.strokes(), imported);
        assert!(!board.history().can_redo());
        assert_eq!(board.tracker().active_count(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut board = Board::new();
        board.settings_mut().smoothing = Smoothing::Basic;
        draw_stroke(&mut board, 1, (0.0, 0.0), (5.0, 5.0));

        let json = board.export_json().unwrap();
        let mut restored = Board::new();
        restored.import_json(&json).unwrap();
        assert_eq!(restored.strokes(), board.strokes());
    }
}
