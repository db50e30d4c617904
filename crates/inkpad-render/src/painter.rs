//! Turns stroke geometry into fill paths and paints them onto a
//! `vello_cpu` context.

use crate::spline::CurveBasis;
use inkpad_core::geometry::midpoint;
use inkpad_core::sequence::StrokeSequence;
use inkpad_core::settings::EngineSettings;
use inkpad_core::stroke::{Color, Smoothing, Stroke, StrokePoint, StrokeStyle};
use kurbo::{BezPath, Cap, Circle, Join, Point, Shape as _, StrokeOpts};

/// Flattening tolerance for stroke expansion and circle paths.
const TOLERANCE: f64 = 0.25;

/// Build the centerline path for a stroke's points under a smoothing mode.
pub fn stroke_path(points: &[StrokePoint], smoothing: Smoothing) -> BezPath {
    match smoothing {
        Smoothing::None => linear_path(points),
        Smoothing::Basic => midpoint_path(points),
        Smoothing::Advanced => basis_path(points),
    }
}

/// Piecewise-linear connection, two points at a time. A stray trailing point
/// pairs with itself, keeping it visible as a degenerate segment.
fn linear_path(points: &[StrokePoint]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(first.pos);
    for pair in points.chunks(2) {
        let from = pair[0].pos;
        let to = pair.get(1).map_or(from, |p| p.pos);
        path.line_to(from);
        path.line_to(to);
    }
    path
}

/// Midpoint-quadratic connection between point pairs.
fn midpoint_path(points: &[StrokePoint]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(first.pos);
    for pair in points.chunks(2) {
        let from = pair[0].pos;
        let to = pair.get(1).map_or(from, |p| p.pos);
        path.curve_to(from, midpoint(from, to), to);
    }
    path
}

/// Basis spline through every point. A lone point feeds twice so the
/// generator still emits geometry for downstream handling.
fn basis_path(points: &[StrokePoint]) -> BezPath {
    let mut curve = CurveBasis::new();
    for p in points {
        curve.point(p.pos);
    }
    if points.len() == 1 {
        curve.point(points[0].pos);
    }
    curve.finish()
}

/// Expand a centerline to a fillable outline with round caps and joins.
pub fn expand(path: &BezPath, width: f64) -> BezPath {
    let style = kurbo::Stroke::new(width)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    kurbo::stroke(
        path.elements().iter().copied(),
        &style,
        &StrokeOpts::default(),
        TOLERANCE,
    )
}

/// Paint one stroke onto the context, resolving its effective color against
/// the current background.
pub fn paint_stroke(
    ctx: &mut vello_cpu::RenderContext,
    stroke: &Stroke,
    settings: &EngineSettings,
) {
    let Stroke::Paint(paint) = stroke;
    if paint.points.is_empty() {
        return;
    }
    let color = paint.style.color.resolve(settings.background_color);

    // A stroke without extent cannot be stroked visibly; always draw the
    // width-diameter dot instead.
    if is_degenerate(&paint.points) {
        dot(ctx, paint.points[0].pos, paint.style.width, color);
        return;
    }

    let path = stroke_path(&paint.points, paint.style.smoothing);
    fill(ctx, &expand(&path, paint.style.width), color);
}

/// Paint one fresh incremental segment of an active stroke.
pub fn paint_segment(
    ctx: &mut vello_cpu::RenderContext,
    from: StrokePoint,
    to: StrokePoint,
    style: &StrokeStyle,
    settings: &EngineSettings,
) {
    let color = style.color.resolve(settings.background_color);
    if from.pos == to.pos {
        dot(ctx, to.pos, style.width, color);
        return;
    }
    let mut path = BezPath::new();
    path.move_to(from.pos);
    path.line_to(to.pos);
    fill(ctx, &expand(&path, style.width), color);
}

/// Repaint the whole sequence in paint order, background first.
pub fn paint_scene(
    ctx: &mut vello_cpu::RenderContext,
    sequence: &StrokeSequence,
    settings: &EngineSettings,
    width: u16,
    height: u16,
) {
    if let Some(bg) = settings.background_color {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(to_cpu_color(bg));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    }
    for stroke in sequence.iter_ordered() {
        paint_stroke(ctx, stroke, settings);
    }
}

/// True when every sample shares one position (taps, stationary holds).
fn is_degenerate(points: &[StrokePoint]) -> bool {
    let first = points[0].pos;
    points.iter().all(|p| p.pos == first)
}

fn dot(ctx: &mut vello_cpu::RenderContext, center: Point, width: f64, color: Color) {
    let circle = Circle::new(center, width / 2.0);
    fill(ctx, &circle.to_path(TOLERANCE), color);
}

fn fill(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Color) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(to_cpu_color(color));
    ctx.fill_path(&bezpath_to_cpu(path));
}

fn to_cpu_color(color: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// The render context bundles its own kurbo; convert rather than assume the
/// versions line up.
fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape as _};

    fn pts(coords: &[(f64, f64)]) -> Vec<StrokePoint> {
        coords.iter().map(|&(x, y)| StrokePoint::new(x, y)).collect()
    }

    #[test]
    fn test_linear_path_walks_every_point() {
        let path = linear_path(&pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]));
        let line_ends: Vec<_> = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::LineTo(p) => Some(p.x),
                _ => None,
            })
            .collect();
        assert_eq!(line_ends, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_linear_path_doubles_stray_tail() {
        let path = linear_path(&pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        let last_two: Vec<_> = path
            .elements()
            .iter()
            .rev()
            .take(2)
            .filter_map(|el| match el {
                PathEl::LineTo(p) => Some(p.x),
                _ => None,
            })
            .collect();
        // The unpaired final point pairs with itself.
        assert_eq!(last_two, vec![2.0, 2.0]);
    }

    #[test]
    fn test_midpoint_path_uses_pair_midpoints() {
        let path = midpoint_path(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
        match path.elements()[1] {
            PathEl::CurveTo(c1, c2, end) => {
                assert_eq!(c1, Point::new(0.0, 0.0));
                assert_eq!(c2, Point::new(2.0, 0.0));
                assert_eq!(end, Point::new(4.0, 0.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn test_expand_produces_fillable_outline() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));

        let outline = expand(&path, 4.0);
        assert!(!outline.elements().is_empty());

        let bbox = outline.bounding_box();
        // Round caps extend half the width past both endpoints.
        assert!(bbox.x0 <= -1.5 && bbox.x1 >= 11.5);
        assert!(bbox.y0 <= -1.5 && bbox.y1 >= 1.5);
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(is_degenerate(&pts(&[(1.0, 1.0)])));
        assert!(is_degenerate(&pts(&[(1.0, 1.0), (1.0, 1.0)])));
        assert!(!is_degenerate(&pts(&[(1.0, 1.0), (2.0, 1.0)])));
    }

    #[test]
    fn test_stroke_path_dispatch_smooth_modes_nonempty() {
        let points = pts(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        for smoothing in [Smoothing::None, Smoothing::Basic, Smoothing::Advanced] {
            let path = stroke_path(&points, smoothing);
            assert!(
                !path.elements().is_empty(),
                "empty path for {smoothing:?}"
            );
        }
    }
}
