use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::body::BodyId;
use super::catalog::Catalog;
use super::clock::FrameClock;
use crate::math::geometry::lerp_point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3<f32>,
    pub look_target: Point3<f32>,
}

impl CameraPose {
    pub fn new(position: Point3<f32>, look_target: Point3<f32>) -> Self {
        CameraPose {
            position,
            look_target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    // Nothing selected; the user drives the camera
    Idle,
    // Easing towards the framing pose of the selected body
    Approaching,
    // Framing pose reached; only the look target follows the body
    Tracking,
}

/// Knobs for how the camera frames a selected body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingParams {
    /// Camera distance from the body, in body radii.
    pub distance_multiplier: f32,
    /// Elevation of the camera above the orbital plane, seen from the body.
    pub view_angle_degrees: f32,
    /// Blend factor for the accumulated target position.
    pub target_blend: f32,
    /// Blend factor for the camera position towards the accumulated target.
    pub camera_blend: f32,
    /// Blend factor for both stages of the look-target smoothing.
    pub look_blend: f32,
    /// How close the camera must get to the framing pose to stop approaching.
    pub epsilon: f32,
}

impl Default for FramingParams {
    fn default() -> Self {
        FramingParams {
            distance_multiplier: 10.0,
            view_angle_degrees: 20.0,
            target_blend: 0.05,
            camera_blend: 0.1,
            look_blend: 0.1,
            epsilon: 1.0,
        }
    }
}

/// Drives the camera towards whichever body is selected.
///
/// Approaching uses a two-stage filter: an accumulator eases towards the framing
/// pose, and the camera eases towards the accumulator. The framing pose moves every
/// frame along with the body, and the extra stage keeps the camera from lurching
/// when it does.
#[derive(Debug, Clone)]
pub struct CameraController {
    params: FramingParams,
    phase: Phase,
    target: Option<BodyId>,
    accum_position: Point3<f32>,
    accum_look: Point3<f32>,
    // So we only complain once about a selection we can't find
    reported_missing: Option<BodyId>,
}

impl CameraController {
    pub fn new(params: FramingParams) -> Self {
        CameraController {
            params,
            phase: Phase::Idle,
            target: None,
            accum_position: Point3::origin(),
            accum_look: Point3::origin(),
            reported_missing: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> Option<&BodyId> {
        self.target.as_ref()
    }

    pub fn params(&self) -> &FramingParams {
        &self.params
    }

    /// Where the camera wants to sit to frame a body of the given radius.
    pub fn desired_framing(&self, body_position: &Point3<f32>, radius: f32) -> Point3<f32> {
        let depth = radius * self.params.distance_multiplier;
        let height = depth * self.params.view_angle_degrees.to_radians().tan();
        body_position + Vector3::new(0.0, height, depth)
    }

    /// Runs one frame. Reads the selection, and moves the camera if something is
    /// selected. Returns the phase after the update.
    pub fn update(
        &mut self,
        selection: Option<&BodyId>,
        catalog: &Catalog,
        clock: &FrameClock,
        pose: &mut CameraPose,
    ) -> Phase {
        let selected = match selection {
            Some(id) => id,
            None => return self.phase,
        };

        // An id we can't find leaves the controller exactly as it was
        let body = match catalog.get(selected) {
            Some(body) => body,
            None => {
                if self.reported_missing.as_ref() != Some(selected) {
                    tracing::warn!("Selected body {} is not in the catalog", selected);
                    self.reported_missing = Some(selected.clone());
                }
                return self.phase;
            }
        };

        if self.target.as_ref() != Some(selected) {
            self.retarget(selected.clone(), pose);
        }

        let body_position: Point3<f32> = nalgebra::convert(body.position_at(clock.elapsed()));

        match self.phase {
            Phase::Idle => {}
            Phase::Approaching => {
                let desired = self.desired_framing(&body_position, body.radius);
                let p = &self.params;

                self.accum_position = lerp_point(&self.accum_position, &desired, p.target_blend);
                pose.position = lerp_point(&pose.position, &self.accum_position, p.camera_blend);

                self.accum_look = lerp_point(&self.accum_look, &body_position, p.look_blend);
                pose.look_target = lerp_point(&pose.look_target, &self.accum_look, p.look_blend);

                if nalgebra::distance(&pose.position, &desired) < p.epsilon {
                    tracing::debug!("Reached framing pose for {}", selected);
                    self.phase = Phase::Tracking;
                }
            }
            Phase::Tracking => {
                // Position is left to the user; just keep looking at the body
                pose.look_target =
                    lerp_point(&pose.look_target, &body_position, self.params.look_blend);
            }
        }

        self.phase
    }

    fn retarget(&mut self, id: BodyId, pose: &CameraPose) {
        tracing::info!("Camera now following {}", id);

        // Start from where the camera actually is, not from the previous target
        self.accum_position = pose.position;
        self.accum_look = pose.look_target;
        self.target = Some(id);
        self.phase = Phase::Approaching;
        self.reported_missing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial_pose() -> CameraPose {
        CameraPose::new(Point3::new(0.0, 50.0, 150.0), Point3::origin())
    }

    fn run_until_tracking(
        controller: &mut CameraController,
        id: &BodyId,
        catalog: &Catalog,
        clock: &mut FrameClock,
        pose: &mut CameraPose,
    ) -> usize {
        for frame in 0..5000 {
            if controller.update(Some(id), catalog, clock, pose) == Phase::Tracking {
                return frame;
            }
            clock.advance(1.0 / 60.0);
        }
        panic!("Camera never reached {}", id);
    }

    #[test]
    fn test_desired_framing() {
        let controller = CameraController::new(FramingParams::default());
        let framing = controller.desired_framing(&Point3::new(20.0, 0.0, 0.0), 1.0);

        approx::assert_relative_eq!(
            framing,
            Point3::new(20.0, 10.0 * 20f32.to_radians().tan(), 10.0)
        );
    }

    #[test]
    fn test_idle_without_selection() {
        let catalog = Catalog::solar_system();
        let clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();

        for _ in 0..10 {
            assert_eq!(
                controller.update(None, &catalog, &clock, &mut pose),
                Phase::Idle
            );
        }
        assert_eq!(pose, initial_pose());
    }

    #[test]
    fn test_first_frame_of_approach() {
        let catalog = Catalog::solar_system();
        let clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();
        let earth = BodyId::new("earth");

        let phase = controller.update(Some(&earth), &catalog, &clock, &mut pose);
        assert_eq!(phase, Phase::Approaching);

        // Both filter stages start from the live pose, so the first step is a small
        // fraction of the way to the framing pose.
        let start = initial_pose();
        let desired = controller.desired_framing(&Point3::new(20.0, 0.0, 0.0), 1.0);
        let expected = start.position + (desired - start.position) * (0.05 * 0.1);
        approx::assert_relative_eq!(pose.position, expected, max_relative = 1e-5);

        let expected_look = Point3::new(20.0, 0.0, 0.0) * (0.1 * 0.1);
        approx::assert_relative_eq!(pose.look_target, expected_look, max_relative = 1e-5);
    }

    #[test]
    fn test_reaches_tracking_and_stays() {
        let catalog = Catalog::solar_system();
        let mut clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();
        let earth = BodyId::new("earth");

        run_until_tracking(&mut controller, &earth, &catalog, &mut clock, &mut pose);

        let body: Point3<f32> =
            nalgebra::convert(catalog.get(&earth).unwrap().position_at(clock.elapsed()));
        let desired = controller.desired_framing(&body, 1.0);
        assert!(nalgebra::distance(&pose.position, &desired) < 1.0);

        // Camera position is now the user's; the look target keeps following
        let frozen_position = pose.position;
        for _ in 0..100 {
            clock.advance(1.0 / 60.0);
            assert_eq!(
                controller.update(Some(&earth), &catalog, &clock, &mut pose),
                Phase::Tracking
            );
        }
        assert_eq!(pose.position, frozen_position);

        let body: Point3<f32> =
            nalgebra::convert(catalog.get(&earth).unwrap().position_at(clock.elapsed()));
        assert!(nalgebra::distance(&pose.look_target, &body) < 0.5);
    }

    #[test]
    fn test_reselecting_same_body_is_idempotent() {
        let catalog = Catalog::solar_system();
        let mut clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();
        let mars = BodyId::new("mars");

        run_until_tracking(&mut controller, &mars, &catalog, &mut clock, &mut pose);

        // Same id again, e.g. from a second click
        let again = BodyId::new("mars");
        assert_eq!(
            controller.update(Some(&again), &catalog, &clock, &mut pose),
            Phase::Tracking
        );
        assert_eq!(controller.target(), Some(&mars));
    }

    #[test]
    fn test_switching_target_mid_approach() {
        let catalog = Catalog::solar_system();
        let mut clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();
        let earth = BodyId::new("earth");
        let jupiter = BodyId::new("jupiter");

        for _ in 0..30 {
            controller.update(Some(&earth), &catalog, &clock, &mut pose);
            clock.advance(1.0 / 60.0);
        }
        assert_eq!(controller.phase(), Phase::Approaching);

        let before = pose;
        let phase = controller.update(Some(&jupiter), &catalog, &clock, &mut pose);
        assert_eq!(phase, Phase::Approaching);
        assert_eq!(controller.target(), Some(&jupiter));

        // The step taken is a fraction of the way from the live camera towards
        // jupiter's framing pose, without any pull from earth's accumulator.
        let jupiter_pos: Point3<f32> = nalgebra::convert(
            catalog
                .get(&jupiter)
                .unwrap()
                .position_at(clock.elapsed()),
        );
        let desired = controller.desired_framing(&jupiter_pos, 3.0);
        let expected = before.position + (desired - before.position) * (0.05 * 0.1);
        approx::assert_relative_eq!(pose.position, expected, max_relative = 1e-5);

        run_until_tracking(&mut controller, &jupiter, &catalog, &mut clock, &mut pose);
    }

    #[test]
    fn test_switching_target_while_tracking() {
        let catalog = Catalog::solar_system();
        let mut clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();

        run_until_tracking(
            &mut controller,
            &BodyId::new("venus"),
            &catalog,
            &mut clock,
            &mut pose,
        );

        let sun = BodyId::new("sun");
        assert_eq!(
            controller.update(Some(&sun), &catalog, &clock, &mut pose),
            Phase::Approaching
        );
        run_until_tracking(&mut controller, &sun, &catalog, &mut clock, &mut pose);

        let desired = controller.desired_framing(&Point3::origin(), 5.0);
        assert!(nalgebra::distance(&pose.position, &desired) < 1.0);
    }

    #[test]
    fn test_unknown_body_is_noop() {
        let catalog = Catalog::solar_system();
        let clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();
        let pluto = BodyId::new("pluto");

        for _ in 0..10 {
            assert_eq!(
                controller.update(Some(&pluto), &catalog, &clock, &mut pose),
                Phase::Idle
            );
        }
        assert_eq!(pose, initial_pose());
        assert_eq!(controller.target(), None);
    }

    #[test]
    fn test_unknown_body_keeps_current_target() {
        let catalog = Catalog::solar_system();
        let mut clock = FrameClock::new();
        let mut controller = CameraController::new(FramingParams::default());
        let mut pose = initial_pose();
        let earth = BodyId::new("earth");

        for _ in 0..30 {
            controller.update(Some(&earth), &catalog, &clock, &mut pose);
            clock.advance(1.0 / 60.0);
        }
        let before = pose;

        let pluto = BodyId::new("pluto");
        assert_eq!(
            controller.update(Some(&pluto), &catalog, &clock, &mut pose),
            Phase::Approaching
        );
        assert_eq!(controller.target(), Some(&earth));
        assert_eq!(pose, before);

        // Going back to earth carries on from the existing accumulator
        let accum = controller.accum_position;
        controller.update(Some(&earth), &catalog, &clock, &mut pose);
        let body: Point3<f32> =
            nalgebra::convert(catalog.get(&earth).unwrap().position_at(clock.elapsed()));
        let desired = controller.desired_framing(&body, 1.0);
        approx::assert_relative_eq!(
            controller.accum_position,
            accum + (desired - accum) * 0.05,
            max_relative = 1e-5
        );
    }
}
