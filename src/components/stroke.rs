use palette::WithAlpha;

use super::super::toplevel::palette::SPIRAL_PINK;

pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Stroke {
    pub width: f64,
    pub color: palette::Srgba<f32>,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: DEFAULT_LINE_WIDTH,
            color: SPIRAL_PINK.into_format::<f32>().with_alpha(1.0),
        }
    }
}

impl Stroke {
    // Miter joins with limit 10 and butt caps, like a 2D canvas context.
    pub fn options(&self) -> lyon::tessellation::StrokeOptions {
        lyon::tessellation::StrokeOptions::default()
            .with_line_width(self.width as f32)
            .with_line_join(lyon::tessellation::LineJoin::Miter)
            .with_line_cap(lyon::tessellation::LineCap::Butt)
            .with_miter_limit(10.0)
    }

    pub fn linear_rgba(&self) -> [f32; 4] {
        let color: palette::LinSrgba<f32> = self.color.into_linear();
        [color.red, color.green, color.blue, color.alpha]
    }
}
