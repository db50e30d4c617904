//! Stroke data model: colors, styles, points, and the stroke variants.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// The paint source of a stroke.
///
/// `MatchBackground` resolves against the engine's background at render time
/// rather than at capture time, so an erase tool keeps tracking background
/// changes after its strokes are finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeColor {
    Solid(Color),
    MatchBackground,
}

impl StrokeColor {
    /// Resolve to a concrete color against the current background.
    ///
    /// An unset background counts as white for `MatchBackground`, matching
    /// erase-on-default-paper behavior.
    pub fn resolve(self, background: Option<Color>) -> Color {
        match self {
            StrokeColor::Solid(color) => color,
            StrokeColor::MatchBackground => background.unwrap_or_else(Color::white),
        }
    }
}

/// Curve-fitting policy applied to a stroke's raw points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Smoothing {
    /// Piecewise-linear segments between point pairs.
    None,
    /// Midpoint-quadratic curves between point pairs.
    Basic,
    /// Incremental uniform B-spline through all points.
    #[default]
    Advanced,
}

/// Style captured from the engine settings when a stroke begins.
///
/// Fixed for the stroke's lifetime; only [`StrokeColor::MatchBackground`]
/// re-resolves at render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: StrokeColor,
    /// Stroke width in surface pixels; also the diameter of a one-point dot.
    pub width: f64,
    pub smoothing: Smoothing,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: StrokeColor::Solid(Color::black()),
            width: 2.0,
            smoothing: Smoothing::default(),
        }
    }
}

/// Mice report a constant 0.5 when no real pressure sensor is present.
const UNREPORTED_PRESSURE: f64 = 0.5;

/// One captured input sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub pos: Point,
    /// Device pressure in (0, 1]; `None` when the device reported nothing
    /// useful.
    pub pressure: Option<f64>,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            pressure: None,
        }
    }

    /// Build a sample from raw device input, discarding the sentinel
    /// pressure values (zero and the mouse default).
    pub fn from_device(x: f64, y: f64, pressure: f64) -> Self {
        let pressure = (pressure > 0.0 && pressure != UNREPORTED_PRESSURE).then_some(pressure);
        Self {
            pos: Point::new(x, y),
            pressure,
        }
    }
}

/// A paint stroke: one continuous ink path from press to release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintStroke {
    pub style: StrokeStyle,
    /// Samples in arrival order. Append-only while the stroke is active;
    /// immutable once finalized, except for removal via undo.
    pub points: Vec<StrokePoint>,
}

impl PaintStroke {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
        }
    }

    pub fn from_points(style: StrokeStyle, points: Vec<StrokePoint>) -> Self {
        Self { style, points }
    }

    pub fn push_point(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<StrokePoint> {
        self.points.last().copied()
    }
}

/// A drawable stroke.
///
/// Tagged with a single variant today, mirroring the open `type: "paint"`
/// union of the wire format; future stroke kinds extend this enum and the
/// exhaustive matches in the render path pick them up at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stroke {
    Paint(PaintStroke),
}

impl Stroke {
    pub fn paint(style: StrokeStyle) -> Self {
        Stroke::Paint(PaintStroke::new(style))
    }

    pub fn as_paint(&self) -> &PaintStroke {
        let Stroke::Paint(paint) = self;
        paint
    }

    pub fn as_paint_mut(&mut self) -> &mut PaintStroke {
        let Stroke::Paint(paint) = self;
        paint
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.as_paint().style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_peniko_round_trip() {
        let color = Color::new(40, 80, 120, 200);
        let peniko: peniko::Color = color.into();
        assert_eq!(Color::from(peniko), color);
    }

    #[test]
    fn test_resolve_solid_ignores_background() {
        let color = StrokeColor::Solid(Color::black());
        assert_eq!(color.resolve(Some(Color::white())), Color::black());
    }

    #[test]
    fn test_resolve_match_background() {
        let eraser = StrokeColor::MatchBackground;
        let bg = Color::new(10, 20, 30, 255);
        assert_eq!(eraser.resolve(Some(bg)), bg);
        // Unset background counts as white paper.
        assert_eq!(eraser.resolve(None), Color::white());
    }

    #[test]
    fn test_pressure_sentinels_are_dropped() {
        assert_eq!(StrokePoint::from_device(1.0, 2.0, 0.0).pressure, None);
        assert_eq!(StrokePoint::from_device(1.0, 2.0, 0.5).pressure, None);
        assert_eq!(
            StrokePoint::from_device(1.0, 2.0, 0.7).pressure,
            Some(0.7)
        );
    }

    #[test]
    fn test_stroke_json_round_trip() {
        let mut stroke = Stroke::paint(StrokeStyle {
            color: StrokeColor::MatchBackground,
            width: 4.0,
            smoothing: Smoothing::Basic,
        });
        stroke.as_paint_mut().push_point(StrokePoint::new(1.0, 2.0));
        stroke
            .as_paint_mut()
            .push_point(StrokePoint::from_device(3.0, 4.0, 0.8));

        let json = serde_json::to_string(&stroke).unwrap();
        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }
}
