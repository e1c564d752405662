use nalgebra::Point3;

use super::body::{BodyId, OrbitalBody};
use super::clock::FrameClock;

/// Radians of spin added to every body each frame.
pub const SELF_ROTATION_STEP: f32 = 0.001;

/// Where a body's mesh should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyTransform {
    pub id: BodyId,
    pub position: Point3<f32>,
    // Accumulated spin around the y-axis
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Click,
}

/// What the pointer should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Pointer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerResponse {
    Cursor(CursorHint),
    Select(BodyId),
}

/// Per-body frame state. The only thing a body remembers between frames is its spin.
#[derive(Debug, Clone)]
pub struct BodyRenderable {
    id: BodyId,
    rotation: f32,
}

impl BodyRenderable {
    pub fn new(id: BodyId) -> Self {
        BodyRenderable { id, rotation: 0.0 }
    }

    pub fn id(&self) -> &BodyId {
        &self.id
    }

    pub fn update(&mut self, body: &OrbitalBody, clock: &FrameClock) -> BodyTransform {
        debug_assert_eq!(body.id, self.id);

        self.rotation += SELF_ROTATION_STEP;
        let position = body.position_at(clock.elapsed());

        BodyTransform {
            id: self.id.clone(),
            position: nalgebra::convert(position),
            rotation: self.rotation,
        }
    }

    pub fn on_pointer(&self, event: PointerEvent) -> PointerResponse {
        match event {
            PointerEvent::Enter => PointerResponse::Cursor(CursorHint::Pointer),
            PointerEvent::Leave => PointerResponse::Cursor(CursorHint::Default),
            PointerEvent::Click => PointerResponse::Select(self.id.clone()),
        }
    }
}
