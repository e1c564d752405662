use std::time::Instant;

use kiss3d::event::{Action, Event, Key, MouseButton, WindowEvent};
use nalgebra::Point2;

use crate::model::FrameClock;

// Key config, all in one place
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_TOGGLE_PAUSE: Key = Key::Space;

// A press and release further apart than this is a drag, not a click
const CLICK_SLOP_PIXELS: f32 = 4.0;

/// Turns raw window events into clicks, hover positions and clock changes.
/// Camera dragging is handled by the camera itself.
pub struct Controller {
    cursor: Option<Point2<f32>>,
    press_pos: Option<Point2<f32>>,
    pending_click: Option<Point2<f32>>,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            cursor: None,
            press_pos: None,
            pending_click: None,
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event, clock: &mut FrameClock) {
        self.process_window_event(&event.value, clock);
    }

    fn process_window_event(&mut self, event: &WindowEvent, clock: &mut FrameClock) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor = Some(Point2::new(x as f32, y as f32));
            }
            WindowEvent::CursorEnter(false) => {
                self.cursor = None;
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                self.press_pos = self.cursor;
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                if let (Some(pressed), Some(released)) = (self.press_pos.take(), self.cursor) {
                    if nalgebra::distance(&pressed, &released) <= CLICK_SLOP_PIXELS {
                        self.pending_click = Some(released);
                    }
                }
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                clock.speed_up();
                tracing::info!("Time scale is {}x", clock.time_scale());
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                clock.slow_down();
                tracing::info!("Time scale is {}x", clock.time_scale());
            }
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                clock.toggle_pause();
                tracing::info!("{}", if clock.is_paused() { "Paused" } else { "Resumed" });
            }
            _ => {}
        }
    }

    /// Where the last click landed, in window coordinates. Each click is returned once.
    pub fn take_click(&mut self) -> Option<Point2<f32>> {
        self.pending_click.take()
    }

    pub fn cursor(&self) -> Option<Point2<f32>> {
        self.cursor
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
