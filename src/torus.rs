/*
 * Torus Module
 *
 * Geometry of the wrap-around world. Opposite edges of the rectangle are
 * identified, so every distance and direction the flocking rules use must take
 * the shortest path, which may cross an edge.
 */

use glam::Vec2;

use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    width: f32,
    height: f32,
}

impl Torus {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidWorld { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    // Largest distance two wrapped points can be apart
    pub fn max_distance(&self) -> f32 {
        Vec2::new(self.width / 2.0, self.height / 2.0).length()
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }

    // Bring a point back into [0,width) x [0,height)
    #[inline]
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    /// Shortest vector pointing from `b` to `a` on the torus.
    #[inline]
    pub fn displacement(&self, a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(
            shortest_axis(a.x - b.x, self.width),
            shortest_axis(a.y - b.y, self.height),
        )
    }

    #[inline]
    pub fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        self.displacement(a, b).length()
    }
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    if (0.0..extent).contains(&v) {
        return v;
    }
    let wrapped = v.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[inline]
fn shortest_axis(mut diff: f32, extent: f32) -> f32 {
    let half = extent / 2.0;
    if diff > half {
        diff -= extent;
    } else if diff < -half {
        diff += extent;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_degenerate_world() {
        assert!(Torus::new(0.0, 10.0).is_err());
        assert!(Torus::new(10.0, f32::NAN).is_err());
        assert!(Torus::new(-5.0, 10.0).is_err());
    }

    #[test]
    fn distance_is_symmetric_and_bounded() {
        let torus = Torus::new(1000.0, 600.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let bound = torus.max_distance() + 1e-3;
        for _ in 0..2000 {
            let a = Vec2::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..600.0));
            let b = Vec2::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..600.0));
            let ab = torus.distance(a, b);
            let ba = torus.distance(b, a);
            assert!((ab - ba).abs() < 1e-4, "{ab} != {ba}");
            assert!(ab <= bound, "{ab} exceeds {bound}");
        }
    }

    #[test]
    fn displacement_crosses_the_seam() {
        let torus = Torus::new(1000.0, 1000.0).unwrap();
        let d = torus.displacement(Vec2::new(0.5, 500.0), Vec2::new(999.5, 500.0));
        assert!((d.x - 1.0).abs() < 1e-4);
        assert_eq!(d.y, 0.0);
        assert!((torus.distance(Vec2::new(0.5, 0.5), Vec2::new(999.5, 999.5)) - 2f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn wrap_is_idempotent_and_in_range() {
        let torus = Torus::new(800.0, 450.0).unwrap();
        let samples = [
            Vec2::new(-0.0, 0.0),
            Vec2::new(-1e-9, -1e-9),
            Vec2::new(800.0, 450.0),
            Vec2::new(-801.5, 1234.0),
            Vec2::new(5000.25, -3.0),
            Vec2::new(799.999, 449.999),
        ];
        for p in samples {
            let once = torus.wrap(p);
            assert!(torus.contains(once), "{p:?} wrapped to {once:?}");
            assert_eq!(torus.wrap(once), once);
        }
    }
}
