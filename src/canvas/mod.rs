pub mod recording;
pub mod tessellated;

use super::components::interpolate::Point;
use super::components::square::Square;

/// A sized drawing area, the counterpart of a canvas element.
pub trait Surface {
    type Context: DrawContext;

    fn size(&self) -> (f64, f64);

    /// Resizes the surface and clears anything drawn on it.
    fn set_size(&mut self, width: f64, height: f64);

    fn context(&mut self) -> Option<&mut Self::Context>;
}

/// Path-based 2D drawing, the subset of a canvas rendering context the spiral needs.
pub trait DrawContext {
    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn stroke(&mut self);
    fn close_path(&mut self);

    fn line_width(&self) -> f64;
    fn set_line_width(&mut self, width: f64);
    fn set_stroke_color(&mut self, color: palette::Srgba<f32>);
}

pub fn draw_square<C>(square: &Square, context: &mut C)
where
    C: DrawContext,
{
    let [first, rest @ ..] = square.trace();
    context.begin_path();
    context.move_to(first);
    for point in rest {
        context.line_to(point);
    }
    context.stroke();
    context.close_path();
}

/// Subpaths accumulated between `begin_path` and `stroke`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathState {
    subpaths: Vec<Subpath>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subpath {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl PathState {
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub fn move_to(&mut self, point: Point) {
        self.subpaths.push(Subpath {
            points: vec![point],
            closed: false,
        });
    }

    // Without a current subpath this starts one, as a canvas does.
    pub fn line_to(&mut self, point: Point) {
        match self.subpaths.last_mut() {
            Some(subpath) if !subpath.closed => subpath.points.push(point),
            Some(subpath) => {
                let start = subpath.points[0];
                self.subpaths.push(Subpath {
                    points: vec![start, point],
                    closed: false,
                });
            }
            None => self.move_to(point),
        }
    }

    pub fn close(&mut self) {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.closed = true;
        }
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }
}
