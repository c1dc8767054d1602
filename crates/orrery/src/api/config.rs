use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::OrreryResult;
use crate::extensions::easing::Easing;
use crate::renderer::camera::{CameraRig, Viewport};
use crate::systems::backdrop::BackdropSettings;
use crate::systems::instancer::BeltSettings;
use crate::systems::scale::ScaleConfig;

/// Configuration for the engine, provided by the host.
/// Every field has a default; hosts override only what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minor-body belt generation.
    pub belt: BeltSettings,
    pub backdrop: BackdropSettings,
    /// Initial simulated seconds per wall-clock second (default: 1).
    pub time_scale: f32,
    /// Upper bound accepted by `set_time_scale` (default: 100).
    pub max_time_scale: f32,
    pub start_paused: bool,
    /// Initial size multipliers (default: star 1, planet 4, moon 4).
    pub scale: ScaleConfig,
    /// Initial orbit-path visibility (default: true).
    pub show_orbits: bool,
    /// Camera focus transition length in wall-clock seconds (default: 1.5).
    pub focus_duration: f32,
    pub focus_easing: Easing,
    /// Focus distance = visual radius × factor + minimum distance.
    pub focus_distance_factor: f32,
    pub focus_min_distance: f32,
    /// Direction from the focused body toward the camera. Normalized on use.
    pub focus_direction: Vec3,
    /// Pose restored by `reset_view`.
    pub camera: CameraRig,
    pub viewport: Viewport,
    /// Pointer travel in pixels before a press becomes a drag instead of a click.
    pub drag_threshold: f32,
    /// Zoom factor per wheel unit.
    pub zoom_speed: f32,
    pub min_camera_distance: f32,
    pub max_camera_distance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            belt: BeltSettings::default(),
            backdrop: BackdropSettings::default(),
            time_scale: 1.0,
            max_time_scale: 100.0,
            start_paused: false,
            scale: ScaleConfig::default(),
            show_orbits: true,
            focus_duration: 1.5,
            focus_easing: Easing::QuadInOut,
            focus_distance_factor: 4.0,
            focus_min_distance: 10.0,
            focus_direction: Vec3::new(0.0, 0.35, 1.0),
            camera: CameraRig::default(),
            viewport: Viewport::new(800.0, 600.0),
            drag_threshold: 4.0,
            zoom_speed: 0.001,
            min_camera_distance: 5.0,
            max_camera_distance: 3000.0,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> OrreryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Unit vector from a focused body toward the camera.
    pub fn focus_offset_direction(&self) -> Vec3 {
        self.focus_direction.try_normalize().unwrap_or(Vec3::Z)
    }

    /// Distance kept from a body of the given visual radius when focused.
    pub fn focus_distance(&self, visual_radius: f32) -> f32 {
        visual_radius * self.focus_distance_factor + self.focus_min_distance
    }
}
