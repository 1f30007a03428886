use super::interpolate::interpolate;
use super::interpolate::Point;

/// Four vertices in a fixed winding order. Every transformation keeps the order,
/// so vertex `i` of a derived square always comes from vertices `i` and `i + 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Square(pub [Point; 4]);

impl Square {
    /// The square covering a `width` x `height` surface, pulled in by `offset`
    /// on every side so a stroke centered on its edges stays inside the bounds.
    pub fn inset(width: f64, height: f64, offset: f64) -> Self {
        Self([
            Point::new(offset, offset),
            Point::new(width - offset, offset),
            Point::new(width - offset, height - offset),
            Point::new(offset, height - offset),
        ])
    }

    pub fn vertices(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn next(&self, t: f64) -> Self {
        next_square(self, t)
    }

    pub fn diagonal(&self) -> f64 {
        self.0[0].distance(self.0[2])
    }

    /// Stroke order `p1, p2, p3, p4, p1, p2`. The first edge is traced twice.
    pub fn trace(&self) -> [Point; 6] {
        let [p1, p2, p3, p4] = self.0;
        [p1, p2, p3, p4, p1, p2]
    }
}

pub fn next_square(square: &Square, t: f64) -> Square {
    let vertices = square.vertices();
    Square(std::array::from_fn(|i| {
        interpolate(vertices[i], vertices[(i + 1) % 4], t)
    }))
}
