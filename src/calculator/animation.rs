//! Rotation of a rendered surface around the vertical axis.
//!
//! The animation is a two-state machine. Each frame first checks the state and does no
//! work when idle, so stopping takes effect at the next frame boundary. Timing is left to
//! a [`FrameScheduler`]: the default one sleeps the thread, a GUI would hook its timer in.
use log::{debug, info};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    Idle,
    Animating { azimuth: f64 },
}

/// Camera angles of one frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub elevation: f64,
    pub azimuth: f64,
}

/// Waits between two frames.
pub trait FrameScheduler {
    fn wait(&mut self, delay: Duration);
}

/// Blocks the current thread for the frame interval.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepScheduler;

impl FrameScheduler for SleepScheduler {
    fn wait(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

#[derive(Debug, Clone)]
pub struct Animation {
    state: AnimationState,
    step_degrees: f64,
    elevation: f64,
    interval: Duration,
}

impl Default for Animation {
    fn default() -> Self {
        Animation::new(3.0, 30.0, Duration::from_millis(33))
    }
}

impl Animation {
    pub fn new(step_degrees: f64, elevation: f64, interval: Duration) -> Self {
        Animation {
            state: AnimationState::Idle,
            step_degrees,
            elevation,
            interval,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    /// Starts from azimuth 0, also when already running.
    pub fn start(&mut self) {
        info!("animation started");
        self.state = AnimationState::Animating { azimuth: 0.0 };
    }

    pub fn stop(&mut self) {
        if self.is_animating() {
            info!("animation stopped");
        }
        self.state = AnimationState::Idle;
    }

    /// Next frame, or `None` without doing anything when idle.
    pub fn tick(&mut self) -> Option<Frame> {
        let AnimationState::Animating { azimuth } = self.state else {
            return None;
        };
        let frame = Frame {
            elevation: self.elevation,
            azimuth,
        };
        self.state = AnimationState::Animating {
            azimuth: (azimuth + self.step_degrees) % 360.0,
        };
        Some(frame)
    }

    /// Produces frames until the animation is stopped or `max_frames` is reached,
    /// waiting one interval after each frame. `on_frame` may stop the animation.
    /// Returns the number of frames produced.
    pub fn run_frames<S, F>(&mut self, scheduler: &mut S, max_frames: usize, mut on_frame: F) -> usize
    where
        S: FrameScheduler,
        F: FnMut(Frame, &mut Animation),
    {
        let mut produced = 0;
        while produced < max_frames {
            let Some(frame) = self.tick() else {
                break;
            };
            on_frame(frame, self);
            produced += 1;
            scheduler.wait(self.interval);
        }
        debug!("animation loop ended after {} frames", produced);
        produced
    }
}
