// extensions/focus.rs
//
// Camera focus controller: eases the camera rig toward a target eye position
// and look-at point over a fixed wall-clock duration.
//
// Usage:
//   let mut focus = CameraFocus::new(1.5, Easing::QuadInOut);
//   focus.request(&rig, target_position, target_look_at);
//   let done = focus.step(wall_dt, &mut rig);  // unscaled delta

use glam::Vec3;

use super::easing::{ease_vec3, Easing};
use crate::renderer::camera::CameraRig;

/// One in-flight camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTransition {
    pub start_position: Vec3,
    pub start_look_at: Vec3,
    pub target_position: Vec3,
    pub target_look_at: Vec3,
    /// Wall-clock seconds since the request.
    pub elapsed: f32,
    /// Wall-clock seconds.
    pub duration: f32,
}

impl FocusTransition {
    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Outcome of advancing the controller by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStep {
    /// No transition in flight; the rig was not touched.
    Idle,
    /// The rig moved and the transition continues.
    Moving,
    /// The rig reached the target this frame and the transition was dropped.
    Completed,
}

/// Holds at most one transition. A new request replaces the current one.
#[derive(Debug, Clone)]
pub struct CameraFocus {
    active: Option<FocusTransition>,
    duration: f32,
    easing: Easing,
}

impl CameraFocus {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            active: None,
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
            easing,
        }
    }

    /// Start a transition from the rig's current pose. Any transition in
    /// flight is abandoned.
    pub fn request(&mut self, rig: &CameraRig, target_position: Vec3, target_look_at: Vec3) {
        self.active = Some(FocusTransition {
            start_position: rig.position,
            start_look_at: rig.look_at,
            target_position,
            target_look_at,
            elapsed: 0.0,
            duration: self.duration,
        });
    }

    /// Advance by an unscaled wall-clock delta and write the eased pose into `rig`.
    pub fn step(&mut self, wall_dt: f32, rig: &mut CameraRig) -> FocusStep {
        let Some(transition) = self.active.as_mut() else {
            return FocusStep::Idle;
        };
        if wall_dt.is_finite() && wall_dt > 0.0 {
            transition.elapsed += wall_dt;
        }
        let t = transition.progress();
        if t >= 1.0 {
            rig.position = transition.target_position;
            rig.look_at = transition.target_look_at;
            self.active = None;
            return FocusStep::Completed;
        }
        rig.position = ease_vec3(transition.start_position, transition.target_position, t, self.easing);
        rig.look_at = ease_vec3(transition.start_look_at, transition.target_look_at, t, self.easing);
        FocusStep::Moving
    }

    /// Drop the transition, leaving the rig wherever it is.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Progress of the active transition, `None` when idle.
    pub fn progress(&self) -> Option<f32> {
        self.active.as_ref().map(FocusTransition::progress)
    }

    pub fn transition(&self) -> Option<&FocusTransition> {
        self.active.as_ref()
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
