use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, BodyKind, DrawableHandle, Highlight};
use crate::components::mesh::Appearance;

/// World placement of a drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Uniform circular motion around the parent (or the origin for roots).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    /// Current orbital angle in radians, kept in `[0, 2π)`.
    pub angle: f32,
    /// Radians per simulated second. Negative is retrograde.
    pub angular_speed: f32,
    /// Distance from the parent center.
    pub radius: f32,
    /// Constant height above the orbital plane.
    pub elevation: f32,
}

impl OrbitState {
    pub fn new(radius: f32, angular_speed: f32, angle: f32) -> Self {
        Self {
            angle,
            angular_speed,
            radius,
            elevation: 0.0,
        }
    }

    /// Offset from the orbit center at the current angle.
    #[inline]
    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.radius,
            self.elevation,
            self.angle.sin() * self.radius,
        )
    }
}

/// Descriptive data for the info panel. Never used by the simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyInfo {
    pub name: String,
    pub kind: Option<BodyKind>,
    pub diameter_km: f64,
    /// Mean distance from the parent in millions of km (0 for the star).
    pub distance_mkm: f64,
    /// Sidereal orbital period in Earth days (negative for retrograde).
    pub orbital_period_days: f64,
    /// Sidereal rotation period in hours (negative for retrograde).
    pub rotation_period_hours: f64,
    pub moon_count: u32,
    pub description: String,
}

/// A ring rigidly attached to its planet.
#[derive(Debug, Clone)]
pub struct RingAttachment {
    /// Inner edge as a multiple of the parent's visual radius.
    pub inner_ratio: f32,
    /// Outer edge as a multiple of the parent's visual radius.
    pub outer_ratio: f32,
    /// Fixed tilt about the local X axis, applied on top of the parent's rotation.
    pub tilt: f32,
    pub appearance: Appearance,
    pub drawable: Option<DrawableHandle>,
    pub world: Transform,
}

impl RingAttachment {
    pub fn new(inner_ratio: f32, outer_ratio: f32, tilt: f32, appearance: Appearance) -> Self {
        Self {
            inner_ratio,
            outer_ratio,
            tilt,
            appearance,
            drawable: None,
            world: Transform::default(),
        }
    }

    /// Ring extents for a parent of the given visual radius.
    pub fn extents(&self, parent_radius: f32) -> (f32, f32) {
        (self.inner_ratio * parent_radius, self.outer_ratio * parent_radius)
    }
}

/// Star, planet or moon. Satellites point at their parent by id; their world
/// placement is derived every tick and never stored as orbit state.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub parent: Option<BodyId>,
    /// Drawable currently owned by this body (`None` before spawn / after shutdown).
    pub drawable: Option<DrawableHandle>,
    /// Radius at multiplier 1.
    pub base_radius: f32,
    /// Radius of the geometry currently attached.
    pub visual_radius: f32,
    pub appearance: Appearance,
    pub ring: Option<RingAttachment>,
    pub orbit: OrbitState,
    /// Accumulated self-rotation about the body's Y axis, in `[0, 2π)`.
    pub spin: f32,
    /// Radians per simulated second. Negative is retrograde.
    pub rotation_speed: f32,
    /// Axial tilt in radians about the Z axis.
    pub axial_tilt: f32,
    pub info: BodyInfo,
    pub highlight: Highlight,
    pub world: Transform,
}

impl CelestialBody {
    pub fn new(id: BodyId, name: impl Into<String>, kind: BodyKind, base_radius: f32) -> Self {
        let name = name.into();
        Self {
            id,
            info: BodyInfo {
                name: name.clone(),
                kind: Some(kind),
                ..Default::default()
            },
            name,
            kind,
            parent: None,
            drawable: None,
            base_radius,
            visual_radius: base_radius,
            appearance: Appearance::default(),
            ring: None,
            orbit: OrbitState::default(),
            spin: 0.0,
            rotation_speed: 0.0,
            axial_tilt: 0.0,
            highlight: Highlight::None,
            world: Transform::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitState) -> Self {
        self.orbit = orbit;
        self
    }

    pub fn with_rotation(mut self, rotation_speed: f32, axial_tilt: f32) -> Self {
        self.rotation_speed = rotation_speed;
        self.axial_tilt = axial_tilt;
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn with_ring(mut self, ring: RingAttachment) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn with_info(mut self, info: BodyInfo) -> Self {
        self.info = BodyInfo {
            name: self.name.clone(),
            kind: Some(self.kind),
            ..info
        };
        self
    }

    /// Body orientation: tilt about Z, then spin about the tilted Y axis.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_z(self.axial_tilt) * Quat::from_rotation_y(self.spin)
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.world.translation
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
