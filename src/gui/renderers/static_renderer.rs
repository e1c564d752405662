use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, ShaderUniform,
};

use nalgebra::{Matrix4, Point3};

use crate::math::path::segments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Lines,
    Points,
}

struct Batch {
    // Vertices, stored as (pt, color, pt, color, ...)
    vertices: GPUVec<Point3<f32>>,
    num_vertices: usize,
}

/// Draws geometry that never changes after it's added. Unlike kiss3d's line and
/// point renderers, the buffers are uploaded once and kept between frames.
pub struct StaticRenderer {
    // OpenGL stuff
    shader: Effect,
    pos: ShaderAttribute<Point3<f32>>,
    color: ShaderAttribute<Point3<f32>>,
    view: ShaderUniform<Matrix4<f32>>,
    proj: ShaderUniform<Matrix4<f32>>,
    point_size: ShaderUniform<f32>,
    primitive: Primitive,
    size: f32,
    // Data storage
    batches: Vec<Batch>,
}

impl StaticRenderer {
    pub fn new(primitive: Primitive, size: f32) -> Self {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);

        shader.use_program();

        StaticRenderer {
            pos: shader
                .get_attrib::<Point3<f32>>("position")
                .expect("Failed to get shader attribute."),
            color: shader
                .get_attrib::<Point3<f32>>("color")
                .expect("Failed to get shader attribute."),
            view: shader
                .get_uniform::<Matrix4<f32>>("view")
                .expect("Failed to get shader uniform."),
            proj: shader
                .get_uniform::<Matrix4<f32>>("proj")
                .expect("Failed to get shader uniform."),
            point_size: shader
                .get_uniform::<f32>("point_size")
                .expect("Failed to get shader uniform."),
            shader,
            primitive,
            size,
            batches: vec![],
        }
    }

    /// Adds a polyline, drawn as one segment per consecutive pair of points.
    pub fn add_polyline(&mut self, points: &[Point3<f32>], color: Point3<f32>) {
        debug_assert_eq!(self.primitive, Primitive::Lines);

        let mut data = Vec::with_capacity(4 * points.len());
        for (a, b) in segments(points) {
            data.push(a);
            data.push(color);
            data.push(b);
            data.push(color);
        }
        self.push_batch(data);
    }

    /// Adds a cloud of individually colored points.
    pub fn add_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = (Point3<f32>, Point3<f32>)>,
    {
        debug_assert_eq!(self.primitive, Primitive::Points);

        let mut data = vec![];
        for (pt, color) in points {
            data.push(pt);
            data.push(color);
        }
        self.push_batch(data);
    }

    fn push_batch(&mut self, data: Vec<Point3<f32>>) {
        if data.is_empty() {
            return;
        }
        let num_vertices = data.len() / 2;
        self.batches.push(Batch {
            vertices: GPUVec::new(data, BufferType::Array, AllocationType::StaticDraw),
            num_vertices,
        });
    }
}

impl Renderer for StaticRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        if self.batches.is_empty() {
            return;
        }

        self.shader.use_program();
        self.pos.enable();
        self.color.enable();

        camera.upload(pass, &mut self.proj, &mut self.view);
        self.point_size.upload(&self.size);

        let ctxt = Context::get();
        let mode = match self.primitive {
            Primitive::Lines => {
                ctxt.line_width(self.size);
                Context::LINES
            }
            Primitive::Points => {
                ctxt.point_size(self.size);
                Context::POINTS
            }
        };

        for batch in self.batches.iter_mut() {
            self.pos.bind_sub_buffer(&mut batch.vertices, 1, 0);
            self.color.bind_sub_buffer(&mut batch.vertices, 1, 1);
            ctxt.draw_arrays(mode, 0, batch.num_vertices as i32);
        }

        self.pos.disable();
        self.color.disable();
    }
}

/// Vertex shader shared by lines and points.
static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec3 color;
    varying   vec3 vColor;
    uniform   mat4 proj;
    uniform   mat4 view;
    uniform   float point_size;
    void main() {
        gl_Position = proj * view * vec4(position, 1.0);
        gl_PointSize = point_size;
        vColor = color;
    }";

static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec3 vColor;
    void main() {
        gl_FragColor = vec4(vColor, 1.0);
    }";
