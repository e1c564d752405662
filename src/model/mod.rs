//! Everything that happens in a frame, without reference to any window or GPU.

mod body;
mod camera_controller;
mod catalog;
mod clock;
mod renderable;
mod scene;
mod selection;
mod starfield;

pub use body::{BodyId, OrbitalBody};
pub use camera_controller::{CameraController, CameraPose, FramingParams, Phase};
pub use catalog::{BodyRecord, Catalog, TextureTable};
pub use clock::FrameClock;
pub use renderable::{
    BodyRenderable, BodyTransform, CursorHint, PointerEvent, PointerResponse, SELF_ROTATION_STEP,
};
pub use scene::{FrameUpdate, Lighting, OrbitPath, SceneComposer};
pub use selection::Selection;
pub use starfield::{Star, StarField, StarFieldParams};
