// extensions/easing.rs
//
// Easing curves for camera transitions.
// Pure math over normalized progress; no engine state.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    #[default]
    QuadInOut,
    /// Stronger slow start and end.
    CubicInOut,
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]. Every curve maps 0 to 0 and 1 to 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two points.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate points with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}
