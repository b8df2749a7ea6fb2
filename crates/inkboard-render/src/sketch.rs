//! Hand-drawn stroke generator.
//!
//! Each outline is drawn twice with slightly different jitter, like a pen
//! going over the same line. All randomness comes from the element's stored
//! seed, so an element looks identical on every redraw.

use kurbo::{BezPath, PathEl, Point};

/// Jitter amount used for element outlines.
pub const ROUGHNESS: f64 = 1.0;

/// Number of overlapping passes per outline.
pub const STROKE_PASSES: u32 = 2;

/// Xorshift32 stream feeding the stroke jitter.
///
/// A zero seed would lock xorshift at zero forever, so it is bumped to one.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform sample in `[-1, 1]`.
    pub fn next_f64(&mut self) -> f64 {
        let unit = f64::from(self.next_u32()) / f64::from(u32::MAX);
        unit * 2.0 - 1.0
    }

    /// Sample in `[-amount, amount]`.
    pub fn offset(&mut self, amount: f64) -> f64 {
        amount * self.next_f64()
    }

    fn jitter(&mut self, p: Point, amount: f64) -> Point {
        let dx = self.offset(amount);
        let dy = self.offset(amount);
        Point::new(p.x + dx, p.y + dy)
    }
}

/// Apply the hand-drawn effect to a path.
///
/// Endpoints are offset at random (corners overshoot) and straight segments
/// get a slight bow. `pass` selects an independent random sequence for the
/// same seed. A roughness of zero returns the path unchanged.
pub fn sketch_path(path: &BezPath, roughness: f64, seed: u32, pass: u32) -> BezPath {
    if roughness <= 0.0 {
        return path.clone();
    }

    let max_offset = roughness * 2.0;
    let bowing = roughness;

    // Large prime keeps the passes far apart in the sequence
    let mut rng = SimpleRng::new(seed.wrapping_add(pass.wrapping_mul(99991)));

    let mut result = BezPath::new();
    let mut last = Point::ZERO;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                result.move_to(rng.jitter(p, max_offset));
                last = p;
            }
            PathEl::LineTo(p) => {
                let delta = p - last;
                let len = delta.hypot();

                let bow = rng.offset(bowing * roughness * len / 200.0);
                let perp = if len > 0.001 {
                    kurbo::Vec2::new(-delta.y / len, delta.x / len)
                } else {
                    kurbo::Vec2::ZERO
                };
                let control = last.midpoint(p) + perp * bow;

                result.quad_to(control, rng.jitter(p, max_offset));
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                let c = rng.jitter(p1, max_offset * 0.7);
                result.quad_to(c, rng.jitter(p2, max_offset));
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let c1 = rng.jitter(p1, max_offset * 0.5);
                let c2 = rng.jitter(p2, max_offset * 0.5);
                result.curve_to(c1, c2, rng.jitter(p3, max_offset));
                last = p3;
            }
            PathEl::ClosePath => result.close_path(),
        }
    }

    result
}

/// All passes for one outline.
pub fn sketch_strokes(path: &BezPath, seed: u32) -> Vec<BezPath> {
    (0..STROKE_PASSES)
        .map(|pass| sketch_path(path, ROUGHNESS, seed, pass))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Shape as KurboShape};

    fn square() -> BezPath {
        Rect::new(0.0, 0.0, 100.0, 100.0).to_path(0.1)
    }

    #[test]
    fn test_rng_range_and_determinism() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..1000 {
            let v = a.next_f64();
            assert!((-1.0..=1.0).contains(&v));
            assert_eq!(v, b.next_f64());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_same_seed_same_strokes() {
        assert_eq!(sketch_strokes(&square(), 7), sketch_strokes(&square(), 7));
    }

    #[test]
    fn test_passes_and_seeds_differ() {
        let strokes = sketch_strokes(&square(), 7);
        assert_eq!(strokes.len(), 2);
        assert_ne!(strokes[0], strokes[1]);
        assert_ne!(sketch_strokes(&square(), 8), strokes);
    }

    #[test]
    fn test_jitter_is_bounded() {
        let path = square();
        let sketched = sketch_path(&path, ROUGHNESS, 1234, 0);
        assert_eq!(sketched.elements().len(), path.elements().len());
        let bounds = sketched.bounding_box();
        // Corner jitter is at most 2 units; bowing on a 100-unit side adds at most 0.5
        assert!(bounds.x0 >= -2.5 && bounds.y0 >= -2.5);
        assert!(bounds.x1 <= 102.5 && bounds.y1 <= 102.5);
    }

    #[test]
    fn test_zero_roughness_is_identity() {
        assert_eq!(sketch_path(&square(), 0.0, 5, 0), square());
    }
}
