use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::config::Config;
use crate::model::{BodyId, FrameClock, SceneComposer};

mod camera;
mod controller;
mod renderers;
mod view;

pub use self::camera::OrbitCamera;

/// Simulated seconds per rendered frame, before time scaling.
pub const FRAME_TIMESTEP: f64 = 1.0 / 60.0;

pub struct Simulation {
    composer: SceneComposer,
    clock: FrameClock,
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(composer: SceneComposer, config: &Config, window: &mut Window) -> Self {
        let mut clock = FrameClock::with_time_scale(config.time.time_scale);
        clock.set_paused(config.time.start_paused);

        Self {
            view: View::new(window, &composer, config),
            composer,
            clock,
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller.process_event(event, &mut self.clock);
        }

        if let Some(pos) = self.controller.take_click() {
            match self.body_under(&pos) {
                Some(id) => self.composer.click(&id),
                None => tracing::trace!("Click at {} hit nothing", pos),
            }
        }

        let hovered = self
            .controller
            .cursor()
            .and_then(|pos| self.body_under(&pos));
        if let Some(hint) = self.composer.hover(hovered.as_ref()) {
            tracing::trace!("Cursor is now {:?}", hint);
        }
    }

    fn body_under(&self, window_pos: &nalgebra::Point2<f32>) -> Option<BodyId> {
        let (origin, dir) = self.view.unproject(window_pos);
        self.composer.pick(&origin, &dir, &self.clock)
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.clock.advance(FRAME_TIMESTEP);

        let mut pose = self.view.camera_pose();
        let update = self.composer.step(&self.clock, &mut pose);
        self.view.apply_frame(&update, &pose);

        self.view
            .draw_text(window, &self.composer, &self.clock, self.controller.fps());
        self.controller.increment_frame_counter();
    }
}
