//! Incremental uniform cubic B-spline used for advanced smoothing.

use kurbo::{BezPath, Point};

/// Running basis-spline generator.
///
/// Points feed in one at a time; the generator keeps a two-point window and
/// emits one cubic per point once warmed up, so a live stroke extends
/// without re-evaluating its history. Boundary segments pin the curve toward
/// the first and last input points instead of stopping a third short.
#[derive(Debug, Default)]
pub struct CurveBasis {
    path: BezPath,
    seen: u8,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl CurveBasis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next input point.
    pub fn point(&mut self, p: Point) {
        match self.seen {
            0 => {
                self.seen = 1;
                self.path.move_to(p);
            }
            1 => {
                self.seen = 2;
            }
            2 => {
                self.seen = 3;
                self.path.line_to(Point::new(
                    (5.0 * self.x0 + self.x1) / 6.0,
                    (5.0 * self.y0 + self.y1) / 6.0,
                ));
                self.emit(p);
            }
            _ => self.emit(p),
        }
        self.x0 = self.x1;
        self.x1 = p.x;
        self.y0 = self.y1;
        self.y1 = p.y;
    }

    /// Emit the cubic for the current window closing at `p`.
    fn emit(&mut self, p: Point) {
        self.path.curve_to(
            Point::new(
                (2.0 * self.x0 + self.x1) / 3.0,
                (2.0 * self.y0 + self.y1) / 3.0,
            ),
            Point::new(
                (self.x0 + 2.0 * self.x1) / 3.0,
                (self.y0 + 2.0 * self.y1) / 3.0,
            ),
            Point::new(
                (self.x0 + 4.0 * self.x1 + p.x) / 6.0,
                (self.y0 + 4.0 * self.y1 + p.y) / 6.0,
            ),
        );
    }

    /// Close out the boundary segments and take the path.
    pub fn finish(mut self) -> BezPath {
        let tail = Point::new(self.x1, self.y1);
        match self.seen {
            3 => {
                self.emit(tail);
                self.path.line_to(tail);
            }
            2 => {
                self.path.line_to(tail);
            }
            _ => {}
        }
        self.path
    }
}
