//! Pure hit-testing and distance helpers.
//!
//! All functions operate in world coordinates and are total: degenerate
//! (zero-size) shapes contain nothing but their own boundary.

use kurbo::{Point, Rect, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Normalize an anchor plus signed extent into a positive-size rectangle.
///
/// Negative extents mean the shape was dragged up or left of its anchor.
pub fn normalized_rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x, y, x + width, y + height).abs()
}

/// Test whether a point lies inside (or on the edge of) a rectangle with a
/// possibly negative extent.
pub fn is_point_in_rectangle(point: Point, x: f64, y: f64, width: f64, height: f64) -> bool {
    let rect = normalized_rect(x, y, width, height);
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Test whether a point lies inside (or on the boundary of) the ellipse
/// inscribed in the given anchor/extent box.
pub fn is_point_in_ellipse(point: Point, x: f64, y: f64, width: f64, height: f64) -> bool {
    let rect = normalized_rect(x, y, width, height);
    let center = rect.center();
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;

    if rx < f64::EPSILON && ry < f64::EPSILON {
        return point == center;
    }
    if rx < f64::EPSILON {
        return (point.x - center.x).abs() < f64::EPSILON && (point.y - center.y).abs() <= ry;
    }
    if ry < f64::EPSILON {
        return (point.y - center.y).abs() < f64::EPSILON && (point.x - center.x).abs() <= rx;
    }

    let dx = (point.x - center.x) / rx;
    let dy = (point.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Distance from a point to the line segment `a -> b`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    distance(point, proj)
}

/// Minimum distance from a point to a polyline.
///
/// A single-point polyline degrades to point distance; an empty one is
/// infinitely far away.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => distance(point, *only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Width of the hit band around a stroked segment.
///
/// The band grows with the stroke so thick strokes are as easy to hit as they
/// look; `tolerance` is extra slack on top of half the stroke width.
pub fn stroke_band(stroke_width: f64, tolerance: f64) -> f64 {
    stroke_width.abs() / 2.0 + tolerance
}

/// Test whether a point is within the stroke band of segment `a -> b`.
pub fn is_point_near_segment(point: Point, a: Point, b: Point, stroke_width: f64, tolerance: f64) -> bool {
    point_to_segment_dist(point, a, b) <= stroke_band(stroke_width, tolerance)
}

/// Unit direction from `from` to `to`, or `None` for coincident points.
pub fn direction(from: Point, to: Point) -> Option<Vec2> {
    let v = to - from;
    let len = v.hypot();
    if len < f64::EPSILON { None } else { Some(v / len) }
}

/// Axis-aligned bounds of a point set, `None` when empty.
pub fn points_bounds(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    Some(
        points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rectangle() {
        assert!(is_point_in_rectangle(Point::new(20.0, 20.0), 10.0, 10.0, 50.0, 30.0));
        assert!(is_point_in_rectangle(Point::new(10.0, 10.0), 10.0, 10.0, 50.0, 30.0));
        assert!(!is_point_in_rectangle(Point::new(61.0, 20.0), 10.0, 10.0, 50.0, 30.0));
    }

    #[test]
    fn test_point_in_rectangle_negative_extent() {
        // Dragged up/left from (60, 40)
        assert!(is_point_in_rectangle(Point::new(20.0, 20.0), 60.0, 40.0, -50.0, -30.0));
        assert!(!is_point_in_rectangle(Point::new(70.0, 20.0), 60.0, 40.0, -50.0, -30.0));
    }

    #[test]
    fn test_degenerate_rectangle_contains_only_boundary() {
        assert!(is_point_in_rectangle(Point::new(5.0, 5.0), 5.0, 5.0, 0.0, 0.0));
        assert!(!is_point_in_rectangle(Point::new(5.1, 5.0), 5.0, 5.0, 0.0, 0.0));
    }

    #[test]
    fn test_point_in_ellipse() {
        // Ellipse in box (0,0)-(100,50): center (50,25), radii (50,25)
        assert!(is_point_in_ellipse(Point::new(50.0, 25.0), 0.0, 0.0, 100.0, 50.0));
        assert!(is_point_in_ellipse(Point::new(100.0, 25.0), 0.0, 0.0, 100.0, 50.0));
        assert!(!is_point_in_ellipse(Point::new(2.0, 2.0), 0.0, 0.0, 100.0, 50.0));
        assert!(is_point_in_ellipse(Point::new(50.0, 25.0), 100.0, 50.0, -100.0, -50.0));
    }

    #[test]
    fn test_degenerate_ellipse() {
        assert!(is_point_in_ellipse(Point::new(5.0, 5.0), 5.0, 5.0, 0.0, 0.0));
        assert!(!is_point_in_ellipse(Point::new(6.0, 5.0), 5.0, 5.0, 0.0, 0.0));
        // Zero width: a vertical segment
        assert!(is_point_in_ellipse(Point::new(5.0, 8.0), 5.0, 0.0, 0.0, 10.0));
        assert!(!is_point_in_ellipse(Point::new(6.0, 8.0), 5.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!((point_to_segment_dist(Point::new(50.0, 10.0), a, b) - 10.0).abs() < 1e-10);
        assert!((point_to_segment_dist(Point::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-10);
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_near_segment_scales_with_stroke() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let p = Point::new(50.0, 6.0);
        assert!(!is_point_near_segment(p, a, b, 2.0, 2.0));
        assert!(is_point_near_segment(p, a, b, 8.0, 2.0));
    }

    #[test]
    fn test_polyline_distance() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert!((point_to_polyline_dist(Point::new(12.0, 5.0), &pts) - 2.0).abs() < 1e-10);
        assert!(point_to_polyline_dist(Point::ZERO, &[]).is_infinite());
        assert!((point_to_polyline_dist(Point::new(3.0, 4.0), &pts[..1]) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_points_bounds() {
        assert!(points_bounds(&[]).is_none());
        let b = points_bounds(&[Point::new(5.0, -2.0), Point::new(-1.0, 7.0), Point::new(3.0, 3.0)]).unwrap();
        assert_eq!(b, Rect::new(-1.0, -2.0, 5.0, 7.0));
    }

    #[test]
    fn test_direction() {
        assert!(direction(Point::ZERO, Point::ZERO).is_none());
        let d = direction(Point::ZERO, Point::new(0.0, 5.0)).unwrap();
        assert!((d.y - 1.0).abs() < f64::EPSILON);
    }
}
