use kiss3d::camera::Camera;
use kiss3d::renderer::Renderer;
use nalgebra::Point3;

use self::static_renderer::{Primitive, StaticRenderer};
use crate::model::{OrbitPath, StarField};

mod static_renderer;

const ORBIT_LINE_WIDTH: f32 = 1.0;
const STAR_SIZE: f32 = 1.5;

pub struct CompoundRenderer {
    star_renderer: StaticRenderer,
    orbit_renderer: StaticRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            star_renderer: StaticRenderer::new(Primitive::Points, STAR_SIZE),
            orbit_renderer: StaticRenderer::new(Primitive::Lines, ORBIT_LINE_WIDTH),
        }
    }

    /// White lines at the given opacity, over a black background.
    pub fn add_orbit_paths(&mut self, paths: &[OrbitPath], opacity: f32) {
        let color = Point3::new(1.0, 1.0, 1.0) * opacity.clamp(0.0, 1.0);
        for path in paths {
            self.orbit_renderer.add_polyline(&path.points, color);
        }
    }

    pub fn add_star_field(&mut self, star_field: &StarField) {
        self.star_renderer.add_points(star_field.stars().iter().map(|star| {
            let b = star.brightness;
            (star.position, Point3::new(b, b, b))
        }));
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.star_renderer.render(pass, camera);
        self.orbit_renderer.render(pass, camera);
    }
}
