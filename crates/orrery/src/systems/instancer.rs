//! Minor-body instancer: a fixed belt of small rocks drawn as one
//! instanced drawable.
//!
//! Records are generated once from a seeded [`Rng`] and never added or
//! removed. Each unpaused tick advances them like any other orbit and
//! rewrites the whole instance buffer, which the frame loop uploads in a
//! single call.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::types::DrawableHandle;
use crate::core::rng::Rng;
use crate::renderer::instance::{InstanceBuffer, InstanceTransform};
use crate::systems::orbit::wrap_angle;

/// Orbit radius whose angular speed is `reference_speed`. Speeds elsewhere in
/// the belt follow Kepler's third law relative to it.
const REFERENCE_RADIUS: f32 = 100.0;

/// Generation parameters for the belt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltSettings {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Half-height of the belt above and below the orbital plane.
    pub thickness: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Angular speed at `REFERENCE_RADIUS`, in radians per simulated second.
    pub reference_speed: f32,
    /// Maximum tumble rate per axis, radians per simulated second.
    pub max_tumble: f32,
    /// Radius of the shared rock geometry before per-instance scale.
    pub rock_radius: f32,
    pub seed: u64,
}

impl Default for BeltSettings {
    fn default() -> Self {
        Self {
            count: 800,
            inner_radius: 175.0,
            outer_radius: 235.0,
            thickness: 4.0,
            min_scale: 0.2,
            max_scale: 0.9,
            reference_speed: 0.01,
            max_tumble: 1.0,
            rock_radius: 1.0,
            seed: 0x5eed_ba11,
        }
    }
}

/// One member of the belt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinorBody {
    pub orbit_radius: f32,
    pub angle: f32,
    pub angular_speed: f32,
    /// Accumulated tumble per axis.
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    pub scale: f32,
    pub elevation: f32,
}

impl MinorBody {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.orbit_radius,
            self.elevation,
            self.angle.sin() * self.orbit_radius,
        )
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position())
    }
}

pub struct MinorBodyField {
    bodies: Vec<MinorBody>,
    buffer: InstanceBuffer,
    /// Shared instanced drawable, set once the backend has built it.
    pub drawable: Option<DrawableHandle>,
}

impl MinorBodyField {
    /// Generate `settings.count` records inside the belt band.
    pub fn generate(settings: &BeltSettings, rng: &mut Rng) -> Self {
        let (inner, outer) = if settings.inner_radius <= settings.outer_radius {
            (settings.inner_radius, settings.outer_radius)
        } else {
            (settings.outer_radius, settings.inner_radius)
        };
        let bodies = (0..settings.count)
            .map(|_| {
                let orbit_radius = rng.range(inner, outer);
                let kepler = (REFERENCE_RADIUS / orbit_radius.max(1e-3)).powf(1.5);
                MinorBody {
                    orbit_radius,
                    angle: rng.range(0.0, std::f32::consts::TAU),
                    angular_speed: settings.reference_speed * kepler,
                    rotation: Vec3::new(
                        rng.range(0.0, std::f32::consts::TAU),
                        rng.range(0.0, std::f32::consts::TAU),
                        rng.range(0.0, std::f32::consts::TAU),
                    ),
                    rotation_speed: Vec3::new(
                        rng.signed(settings.max_tumble),
                        rng.signed(settings.max_tumble),
                        rng.signed(settings.max_tumble),
                    ),
                    scale: rng.range(settings.min_scale, settings.max_scale),
                    elevation: rng.signed(settings.thickness),
                }
            })
            .collect();

        let mut field = Self {
            bodies,
            buffer: InstanceBuffer::new(settings.count),
            drawable: None,
        };
        field.write_instances();
        field
    }

    /// Advance every record by `step` simulated seconds and rewrite the buffer.
    pub fn advance(&mut self, step: f32) {
        if !step.is_finite() || step == 0.0 {
            return;
        }
        for body in &mut self.bodies {
            body.angle = wrap_angle(body.angle + body.angular_speed * step);
            let r = body.rotation + body.rotation_speed * step;
            body.rotation = Vec3::new(wrap_angle(r.x), wrap_angle(r.y), wrap_angle(r.z));
        }
        self.write_instances();
    }

    /// Write every record's matrix into the instance buffer and mark it dirty.
    pub fn write_instances(&mut self) {
        for (i, body) in self.bodies.iter().enumerate() {
            self.buffer.set(i, InstanceTransform::from_matrix(body.matrix()));
        }
        self.buffer.mark_dirty();
    }

    pub fn bodies(&self) -> &[MinorBody] {
        &self.bodies
    }

    pub fn buffer(&self) -> &InstanceBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.buffer
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
