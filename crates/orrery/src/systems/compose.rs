//! Hierarchical composer: derives world transforms from orbit state.

use glam::{Quat, Vec3};

use crate::components::body::{CelestialBody, Transform};

/// Recompute every body's and ring's world transform from the current
/// orbit angles. Runs as one forward pass: the catalog stores parents before
/// their satellites, so a parent's world position is always fresh by the time
/// a satellite reads it.
pub fn compose_world(bodies: &mut [CelestialBody]) {
    for i in 0..bodies.len() {
        let center = match bodies[i].parent {
            Some(parent) => {
                debug_assert!(parent.index() < i, "parent stored after satellite");
                // Catalog validation guarantees the parent exists.
                bodies[parent.index()].world.translation
            }
            None => Vec3::ZERO,
        };

        let body = &mut bodies[i];
        body.world = Transform {
            translation: center + body.orbit.offset(),
            rotation: body.orientation(),
            scale: Vec3::ONE,
        };

        if let Some(ring) = body.ring.as_mut() {
            ring.world = Transform {
                translation: body.world.translation,
                rotation: body.world.rotation * Quat::from_rotation_x(ring.tilt),
                scale: Vec3::ONE,
            };
        }
    }
}
