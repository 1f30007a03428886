use std::sync::Arc;

use lyon::tessellation::BuffersBuilder;
use lyon::tessellation::StrokeTessellator;
use lyon::tessellation::StrokeVertex;
use lyon::tessellation::StrokeVertexConstructor;
use lyon::tessellation::VertexBuffers;

use super::super::components::interpolate::Point;
use super::super::components::stroke::Stroke;
use super::DrawContext;
use super::PathState;
use super::Surface;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Triangles of every stroke drawn on one canvas, in the canvas's own clip space.
#[derive(Debug, Default)]
pub struct StrokeMesh {
    pub size: (f64, f64),
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub revision: u64,
}

pub type SharedMesh = Arc<parking_lot::Mutex<StrokeMesh>>;

impl StrokeMesh {
    fn reset(&mut self, size: (f64, f64)) {
        self.size = size;
        self.vertices.clear();
        self.indices.clear();
        self.revision += 1;
    }

    fn append(&mut self, buffers: VertexBuffers<MeshVertex, u32>) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(buffers.vertices);
        self.indices
            .extend(buffers.indices.into_iter().map(|index| index + base));
        self.revision += 1;
    }
}

struct VertexConstructor {
    size: (f32, f32),
    color: [f32; 4],
}

impl StrokeVertexConstructor<MeshVertex> for VertexConstructor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> MeshVertex {
        let position = vertex.position();
        let (width, height) = self.size;
        MeshVertex {
            position: [
                position.x / width * 2.0 - 1.0,
                1.0 - position.y / height * 2.0,
            ],
            color: self.color,
        }
    }
}

pub struct TessellatedSurface {
    mesh: SharedMesh,
    context: TessellatedContext,
}

impl TessellatedSurface {
    pub fn new() -> Self {
        let mesh = SharedMesh::default();
        Self {
            context: TessellatedContext {
                mesh: mesh.clone(),
                size: (0.0, 0.0),
                stroke: Stroke::default(),
                path: PathState::default(),
            },
            mesh,
        }
    }

    pub fn mesh(&self) -> SharedMesh {
        self.mesh.clone()
    }
}

impl Default for TessellatedSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TessellatedSurface {
    type Context = TessellatedContext;

    fn size(&self) -> (f64, f64) {
        self.context.size
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.context.size = (width, height);
        self.context.path.clear();
        self.mesh.lock().reset((width, height));
    }

    fn context(&mut self) -> Option<&mut Self::Context> {
        Some(&mut self.context)
    }
}

pub struct TessellatedContext {
    mesh: SharedMesh,
    size: (f64, f64),
    stroke: Stroke,
    path: PathState,
}

impl TessellatedContext {
    fn build_path(&self) -> lyon::path::Path {
        #[inline]
        fn convert_point(point: &Point) -> lyon::geom::Point<f32> {
            lyon::geom::point(point.x as f32, point.y as f32)
        }

        let mut builder = lyon::path::Path::builder();
        for subpath in self.path.subpaths() {
            let mut points = subpath.points.iter().map(convert_point);
            if let Some(first) = points.next() {
                builder.begin(first);
                for point in points {
                    builder.line_to(point);
                }
                builder.end(subpath.closed);
            }
        }
        builder.build()
    }
}

impl DrawContext for TessellatedContext {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(point);
    }

    fn stroke(&mut self) {
        let (width, height) = self.size;
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let path = self.build_path();
        let mut buffers: VertexBuffers<MeshVertex, u32> = VertexBuffers::new();
        let mut vertex_builder = BuffersBuilder::new(
            &mut buffers,
            VertexConstructor {
                size: (width as f32, height as f32),
                color: self.stroke.linear_rgba(),
            },
        );
        if let Err(error) = StrokeTessellator::new().tessellate(
            path.iter(),
            &self.stroke.options(),
            &mut vertex_builder,
        ) {
            log::warn!("failed to tessellate stroke: {error:?}");
            return;
        }
        self.mesh.lock().append(buffers);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn line_width(&self) -> f64 {
        self.stroke.width
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.stroke.width = width;
        }
    }

    fn set_stroke_color(&mut self, color: palette::Srgba<f32>) {
        self.stroke.color = color;
    }
}
