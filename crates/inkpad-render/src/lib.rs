//! Inkpad Render Library
//!
//! Curve smoothing, headless CPU rasterization, frame scheduling, and the
//! [`Engine`] facade that binds the core stroke model to a caller-supplied
//! raster surface.

pub mod composite;
pub mod engine;
pub mod error;
pub mod painter;
pub mod scheduler;
pub mod spline;
pub mod surface;

pub use engine::Engine;
pub use error::EngineError;
pub use scheduler::{DrawBatch, FrameScheduler, SegmentJob};
pub use spline::CurveBasis;
pub use surface::{BlitMode, Offscreen, PixmapSurface, RasterSurface};
