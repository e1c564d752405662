use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

use crate::config::CameraConfig;
use crate::model::CameraPose;

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;
const KEY_ZOOM_STEP: f32 = 1.2;

// Free orbit-style camera: drag with the left button to rotate around the look
// target, drag with the right button to pan, scroll to zoom. The y-axis is up.
//
// Unlike ArcBall, the pose can be set directly (eye and target together), which is
// what the follow animation needs. Only user zooms are held to the distance limits;
// a pose set from code is taken as-is.
pub struct OrbitCamera {
    // -- position --
    at: Point3<f32>,
    theta: f32,  // azimuth around y, measured from +z
    phi: f32,    // polar angle from +y
    radius: f32, // distance from `at`
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    // -- knobs to fiddle with --
    theta_step: f32,
    phi_step: f32,
    pan_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
    clip_planes: (f32, f32),
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = OrbitCamera {
            at: Point3::origin(),
            theta: 0.0,
            phi: PI / 2.0,
            radius: 1.0,
            width: 800,
            height: 600,
            fovy: config.fov_degrees.to_radians(),
            last_cursor_pos: Vector2::zeros(),
            theta_step: 0.005,
            phi_step: 0.005,
            pan_step: 0.0015,
            scroll_ratio: 1.1,
            phi_limit: 0.001,
            radius_limits: (config.min_distance, config.max_distance),
            clip_planes: (0.1, 4.0 * config.max_distance + 1000.0),
        };
        let [x, y, z] = config.initial_position;
        camera.set_pose(CameraPose::new(Point3::new(x, y, z), Point3::origin()));
        camera
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height.max(1) as f32,
            self.fovy,
            self.clip_planes.0,
            self.clip_planes.1,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.eye(), self.at)
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        let offset = pose.position - pose.look_target;
        let radius = offset.norm();
        self.at = pose.look_target;

        // Eye on top of the target: keep the old direction
        if radius < 1e-6 {
            return;
        }
        self.radius = radius;
        self.phi = nalgebra::clamp(
            (offset.y / radius).clamp(-1.0, 1.0).acos(),
            self.phi_limit,
            PI - self.phi_limit,
        );
        self.theta = offset.x.atan2(offset.z);
    }

    /// Re-aims the camera without moving it.
    pub fn set_look_target(&mut self, target: Point3<f32>) {
        let eye = self.eye();
        self.set_pose(CameraPose::new(eye, target));
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.theta = (self.theta + dtheta) % (2.0 * PI);
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    /// Moves the look target in the screen plane; `dpos` is in pixels.
    pub fn pan(&mut self, dpos: Vector2<f32>) {
        let camera_transform = self.view_transform().inverse();
        let x_vec = camera_transform.transform_vector(&Vector3::x());
        let y_vec = camera_transform.transform_vector(&Vector3::y());

        // Drag right == scene follows the cursor right
        let scale = self.radius * self.pan_step;
        self.at -= (x_vec * dpos.x - y_vec * dpos.y) * scale;
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera
                    // glides left)
                    self.rotate(-dpos.x * self.theta_step, -dpos.y * self.phi_step);
                } else if canvas.get_mouse_button(MouseButton::Button2) == Action::Press {
                    self.pan(dpos);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.scroll_ratio);
                } else if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip())
                }
            }
            WindowEvent::FramebufferSize(w, h) => {
                self.width = w;
                self.height = h;
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.rotate(0.0, -KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.rotate(0.0, KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.rotate(-KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.rotate(KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(KEY_ZOOM_STEP.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.at
            + Vector3::new(
                self.radius * self.phi.sin() * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * self.phi.sin() * self.theta.cos(),
            )
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.at, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.projection().znear(), self.projection().zfar())
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
