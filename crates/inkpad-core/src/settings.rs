//! Mutable engine settings, snapshot-copied into each new stroke.

use crate::stroke::{Color, Smoothing, StrokeColor, StrokeStyle};
use serde::{Deserialize, Serialize};

/// Live paint settings for an engine instance.
///
/// The caller mutates these freely at any time. Each new stroke copies the
/// current values at press time, so later edits never retroactively change a
/// finished stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub stroke_color: StrokeColor,
    /// Width in surface pixels; must be positive.
    pub stroke_width: f64,
    pub smoothing: Smoothing,
    /// Trades full-scene redraw for cheap incremental segments while a
    /// pointer is moving. Release normalizes the stroke to full quality.
    pub low_quality: bool,
    /// Background fill; `None` leaves the surface transparent.
    pub background_color: Option<Color>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            stroke_color: StrokeColor::Solid(Color::black()),
            stroke_width: 2.0,
            smoothing: Smoothing::Advanced,
            low_quality: false,
            background_color: None,
        }
    }
}

impl EngineSettings {
    /// Snapshot the current values into the style of a new stroke.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color,
            width: self.stroke_width,
            smoothing: self.smoothing,
        }
    }
}
