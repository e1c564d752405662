use nalgebra::{Point3, Vector3};

use super::body::BodyId;
use super::camera_controller::{CameraController, CameraPose, Phase};
use super::catalog::{Catalog, TextureTable};
use super::clock::FrameClock;
use super::renderable::{BodyRenderable, BodyTransform, CursorHint, PointerEvent, PointerResponse};
use super::selection::Selection;
use super::starfield::StarField;
use crate::config::{CameraConfig, SceneConfig};
use crate::math::geometry::ray_sphere_intersection;
use crate::math::orbit::orbit_path;

#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient_color: Point3<f32>,
    pub ambient_intensity: f32,
    pub directional_position: Point3<f32>,
    pub directional_color: Point3<f32>,
    pub directional_intensity: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            ambient_color: Point3::new(1.0, 1.0, 1.0),
            ambient_intensity: 0.5,
            directional_position: Point3::new(0.0, 0.0, 10.0),
            directional_color: Point3::new(1.0, 1.0, 1.0),
            directional_intensity: 1.5,
        }
    }
}

/// Static polyline drawn along a body's orbit.
#[derive(Debug, Clone)]
pub struct OrbitPath {
    pub body: BodyId,
    pub points: Vec<Point3<f32>>,
}

/// Everything that changed during one frame.
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    pub transforms: Vec<BodyTransform>,
    pub phase: Phase,
}

/// Owns the scene: the bodies, what's selected, and the camera controller that
/// follows the selection.
pub struct SceneComposer {
    catalog: Catalog,
    textures: Option<TextureTable>,
    renderables: Vec<BodyRenderable>,
    orbit_paths: Vec<OrbitPath>,
    star_field: StarField,
    lighting: Lighting,
    selection: Selection,
    controller: CameraController,
    hovered: Option<BodyId>,
    initial_pose: CameraPose,
}

impl SceneComposer {
    pub fn new(
        catalog: Catalog,
        textures: Option<TextureTable>,
        scene_config: &SceneConfig,
        camera_config: &CameraConfig,
    ) -> Self {
        let renderables = catalog
            .bodies()
            .map(|b| BodyRenderable::new(b.id.clone()))
            .collect();

        // Paths never change, so build them once here rather than every frame
        let orbit_paths = catalog
            .orbiting()
            .map(|b| OrbitPath {
                body: b.id.clone(),
                points: orbit_path(b.distance, scene_config.orbit_segments),
            })
            .collect();

        let star_field = StarField::generate(&scene_config.stars);
        tracing::debug!(
            "Scene has {} bodies and {} stars",
            catalog.len(),
            star_field.len()
        );

        let [x, y, z] = camera_config.initial_position;
        SceneComposer {
            catalog,
            textures,
            renderables,
            orbit_paths,
            star_field,
            lighting: Lighting::default(),
            selection: Selection::new(),
            controller: CameraController::new(camera_config.framing.clone()),
            hovered: None,
            initial_pose: CameraPose::new(Point3::new(x, y, z), Point3::origin()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn textures(&self) -> Option<&TextureTable> {
        self.textures.as_ref()
    }

    pub fn orbit_paths(&self) -> &[OrbitPath] {
        &self.orbit_paths
    }

    pub fn star_field(&self) -> &StarField {
        &self.star_field
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn initial_pose(&self) -> CameraPose {
        self.initial_pose
    }

    pub fn selected(&self) -> Option<&BodyId> {
        self.selection.get()
    }

    pub fn hovered(&self) -> Option<&BodyId> {
        self.hovered.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match self.hovered {
            Some(_) => CursorHint::Pointer,
            None => CursorHint::Default,
        }
    }

    /// Selects a body, replacing any previous selection. The camera starts moving on
    /// the next `step`.
    pub fn click(&mut self, id: &BodyId) {
        self.pointer(id, PointerEvent::Click);
    }

    /// Routes a pointer event to the body it happened on.
    pub fn pointer(&mut self, id: &BodyId, event: PointerEvent) -> Option<CursorHint> {
        let renderable = match self.renderables.iter().find(|r| r.id() == id) {
            Some(r) => r,
            None => {
                tracing::warn!("Pointer event {:?} for unknown body {}", event, id);
                return None;
            }
        };

        match renderable.on_pointer(event) {
            PointerResponse::Select(id) => {
                if self.selection.select(id.clone()) {
                    tracing::info!("Selected {}", id);
                }
                None
            }
            PointerResponse::Cursor(hint) => {
                match event {
                    PointerEvent::Enter => self.hovered = Some(id.clone()),
                    PointerEvent::Leave if self.hovered.as_ref() == Some(id) => self.hovered = None,
                    _ => {}
                }
                Some(hint)
            }
        }
    }

    /// Moves the hover to `target`, sending leave/enter events as needed. Returns
    /// the new cursor hint if it changed.
    pub fn hover(&mut self, target: Option<&BodyId>) -> Option<CursorHint> {
        if self.hovered.as_ref() == target {
            return None;
        }

        let mut hint = None;
        if let Some(old) = self.hovered.clone() {
            hint = self.pointer(&old, PointerEvent::Leave);
        }
        if let Some(new) = target {
            hint = self.pointer(new, PointerEvent::Enter);
        }
        hint
    }

    /// The nearest body whose sphere is hit by the ray, at the clock's current time.
    pub fn pick(
        &self,
        origin: &Point3<f32>,
        dir: &Vector3<f32>,
        clock: &FrameClock,
    ) -> Option<BodyId> {
        self.catalog
            .bodies()
            .filter_map(|body| {
                let center: Point3<f32> = nalgebra::convert(body.position_at(clock.elapsed()));
                ray_sphere_intersection(origin, dir, &center, body.radius).map(|t| (t, body))
            })
            .min_by(|(t1, _), (t2, _)| t1.total_cmp(t2))
            .map(|(_, body)| body.id.clone())
    }

    /// One frame: move every body, then let the camera controller react to the
    /// selection. `pose` is the live camera pose, and is updated in place.
    pub fn step(&mut self, clock: &FrameClock, pose: &mut CameraPose) -> FrameUpdate {
        let catalog = &self.catalog;
        let transforms = self
            .renderables
            .iter_mut()
            .filter_map(|r| catalog.get(r.id()).map(|body| r.update(body, clock)))
            .collect();

        let previous = self.controller.phase();
        let phase = self
            .controller
            .update(self.selection.get(), &self.catalog, clock, pose);
        if phase != previous {
            tracing::debug!("Camera phase {:?} -> {:?}", previous, phase);
        }

        FrameUpdate { transforms, phase }
    }
}
