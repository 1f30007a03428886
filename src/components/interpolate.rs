use glam::DVec2;

pub type Point = DVec2;

pub trait Interpolate {
    fn interpolate(&self, target: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, target: &Self, t: f64) -> Self {
        self + t * (target - self)
    }
}

impl Interpolate for Point {
    fn interpolate(&self, target: &Self, t: f64) -> Self {
        Point::new(
            self.x.interpolate(&target.x, t),
            self.y.interpolate(&target.y, t),
        )
    }
}

/// Point at `p1 + t * (p2 - p1)`. `t` outside `[0, 1]` extrapolates past the segment.
pub fn interpolate(p1: Point, p2: Point, t: f64) -> Point {
    p1.interpolate(&p2, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        let p1 = Point::new(-3.5, 2.0);
        let p2 = Point::new(7.0, -11.25);

        assert_eq!(interpolate(p1, p2, 0.0), p1);
        assert_eq!(interpolate(p1, p2, 1.0), p2);
    }

    #[test]
    fn test_interpolate_midpoint() {
        let p = interpolate(Point::new(0.0, 0.0), Point::new(10.0, 4.0), 0.5);
        assert_eq!(p, Point::new(5.0, 2.0));
    }

    #[test]
    fn test_interpolate_is_affine_in_t() {
        let p1 = Point::new(1.0, 1.0);
        let p2 = Point::new(99.0, 41.0);
        let (a, b, w) = (0.2, 0.7, 0.25);

        let mixed = interpolate(p1, p2, (1.0 - w) * a + w * b);
        let combined = interpolate(p1, p2, a) * (1.0 - w) + interpolate(p1, p2, b) * w;
        assert!((mixed - combined).length() < 1e-9);
    }

    #[test]
    fn test_interpolate_extrapolates() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(2.0, 0.0);

        assert_eq!(interpolate(p1, p2, 1.5), Point::new(3.0, 0.0));
        assert_eq!(interpolate(p1, p2, -0.5), Point::new(-1.0, 0.0));
    }
}
