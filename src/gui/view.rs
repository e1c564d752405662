use std::collections::HashMap;

use kiss3d::camera::Camera;
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector2, Vector3};

use super::camera::OrbitCamera;
use super::renderers::CompoundRenderer;
use crate::config::Config;
use crate::model::{
    BodyId, CameraPose, CursorHint, FrameClock, FrameUpdate, OrbitalBody, Phase, SceneComposer,
    TextureTable,
};

/// The kiss3d side of the scene: one sphere per body, the static line and point
/// geometry, the camera, and the text overlay.
pub struct View {
    body_spheres: HashMap<BodyId, SceneNode>,
    camera: OrbitCamera,
    renderer: CompoundRenderer,
}

impl View {
    pub fn new(window: &mut Window, composer: &SceneComposer, config: &Config) -> Self {
        window.set_background_color(0.0, 0.0, 0.0);
        // kiss3d has a single light; put it where the directional light is
        window.set_light(Light::Absolute(composer.lighting().directional_position));

        let mut body_spheres = HashMap::new();
        for body in composer.catalog().bodies() {
            let sphere = Self::create_body_object(window, body, composer.textures());
            body_spheres.insert(body.id.clone(), sphere);
        }

        let mut renderer = CompoundRenderer::new();
        renderer.add_star_field(composer.star_field());
        renderer.add_orbit_paths(composer.orbit_paths(), config.scene.orbit_opacity);

        let mut camera = OrbitCamera::new(&config.camera);
        camera.set_pose(composer.initial_pose());

        View {
            body_spheres,
            camera,
            renderer,
        }
    }

    fn create_body_object(
        window: &mut Window,
        body: &OrbitalBody,
        textures: Option<&TextureTable>,
    ) -> SceneNode {
        // Make the sphere that represents the body
        let mut sphere = window.add_sphere(body.radius);
        match textures.and_then(|t| t.get(&body.id)) {
            Some(path) => {
                tracing::debug!("Texturing {} with {}", body.id, path.display());
                sphere.set_texture_from_file(path, body.id.as_str());
            }
            None => {
                let color = &body.color;
                sphere.set_color(color.x, color.y, color.z);
            }
        }
        sphere
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    /// Casts a ray from the camera through a point in the window.
    pub fn unproject(&self, window_pos: &Point2<f32>) -> (Point3<f32>, Vector3<f32>) {
        let size = Vector2::new(self.camera.width() as f32, self.camera.height() as f32);
        self.camera.unproject(window_pos, &size)
    }

    /// Moves scene objects and the camera to match the frame.
    pub fn apply_frame(&mut self, update: &FrameUpdate, pose: &CameraPose) {
        for transform in update.transforms.iter() {
            if let Some(sphere) = self.body_spheres.get_mut(&transform.id) {
                sphere.set_local_translation(Translation3::from(transform.position.coords));
                sphere.set_local_rotation(UnitQuaternion::from_axis_angle(
                    &Vector3::y_axis(),
                    transform.rotation,
                ));
            }
        }

        match update.phase {
            Phase::Idle => {}
            Phase::Approaching => self.camera.set_pose(*pose),
            // The user owns the camera position while tracking
            Phase::Tracking => self.camera.set_look_target(pose.look_target),
        }
    }

    pub fn draw_text(
        &self,
        window: &mut Window,
        composer: &SceneComposer,
        clock: &FrameClock,
        fps: f64,
    ) {
        let default_font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &focus_text(composer),
            &Point2::origin(),
            60.0,
            &default_font,
            &text_color,
        );
        window.draw_text(
            &time_summary_text(clock, fps),
            // no idea why i have to multiply by 2.0, but there it is
            &Point2::new(window.width() as f32 * 2.0 - 600.0, 0.0),
            60.0,
            &default_font,
            &text_color,
        );

        // Stand-in for a pointer cursor, since kiss3d can't change the cursor icon
        if let (CursorHint::Pointer, Some(id)) = (composer.cursor_hint(), composer.hovered()) {
            window.draw_text(
                &format!("> {}", id),
                &Point2::new(0.0, window.height() as f32 * 2.0 - 80.0),
                60.0,
                &default_font,
                &Point3::new(1.0, 0.85, 0.3),
            );
        }
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

fn focus_text(composer: &SceneComposer) -> String {
    let body = match composer.selected().and_then(|id| composer.catalog().get(id)) {
        Some(body) => body,
        None => return String::from("Click a body to follow it"),
    };

    let phase = match composer.phase() {
        Phase::Idle => "idle",
        Phase::Approaching => "approaching",
        Phase::Tracking => "tracking",
    };

    // Indentation is intentional
    format!(
        "Following: {} ({})
    Radius: {}
    Orbit radius: {}
    Period: {}",
        body.id,
        phase,
        body.radius,
        body.distance,
        match body.period() {
            Some(p) => format!("{:.1}", p),
            None => String::from("N/A"),
        },
    )
}

fn time_summary_text(clock: &FrameClock, fps: f64) -> String {
    format!(
        "Time: {:.1}{}
Time scale: {}x
FPS: {:.0}",
        clock.elapsed(),
        if clock.is_paused() { " (paused)" } else { "" },
        clock.time_scale(),
        fps,
    )
}
