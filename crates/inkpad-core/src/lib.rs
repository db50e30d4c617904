//! Inkpad Core Library
//!
//! Platform-agnostic stroke model and pointer-capture state machines for the
//! Inkpad freehand-ink engine. Rasterization lives in `inkpad-render`; this
//! crate never touches a pixel.

pub mod board;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod sequence;
pub mod session;
pub mod settings;
pub mod stroke;

pub use board::Board;
pub use error::BoardError;
pub use event::{DrawRequest, IMPORT_POINTER, PointerEvent, PointerId};
pub use history::{History, RedoEntry};
pub use sequence::{StrokeKey, StrokeSequence};
pub use session::{PointerSession, SessionTracker};
pub use settings::EngineSettings;
pub use stroke::{Color, PaintStroke, Smoothing, Stroke, StrokeColor, StrokePoint, StrokeStyle};
