//! Orbit integrator: advances orbital and self-rotation angles.
//!
//! Uniform circular motion only. Angles advance linearly with the simulated
//! step and are wrapped into `[0, 2π)`; negative speeds run retrograde.

use std::f32::consts::TAU;

use crate::components::body::CelestialBody;

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Advance every body by `step` simulated seconds.
///
/// The caller converts wall time to `step` (time scale applied) and skips
/// the call entirely while paused.
pub fn advance_bodies(bodies: &mut [CelestialBody], step: f32) {
    if !step.is_finite() || step == 0.0 {
        return;
    }
    for body in bodies.iter_mut() {
        body.orbit.angle = wrap_angle(body.orbit.angle + body.orbit.angular_speed * step);
        body.spin = wrap_angle(body.spin + body.rotation_speed * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyId, BodyKind};
    use crate::components::body::OrbitState;
    use std::f32::consts::FRAC_PI_2;

    fn body(speed: f32, spin_speed: f32) -> CelestialBody {
        CelestialBody::new(BodyId(0), "b", BodyKind::Planet, 1.0)
            .with_orbit(OrbitState::new(100.0, speed, FRAC_PI_2))
            .with_rotation(spin_speed, 0.0)
    }

    #[test]
    fn angle_advances_by_speed_times_step() {
        let mut bodies = vec![body(0.01, 0.5)];
        advance_bodies(&mut bodies, 1.0);
        assert!((bodies[0].orbit.angle - 1.580796).abs() < 1e-5);
        assert!((bodies[0].spin - 0.5).abs() < 1e-6);
        let p = bodies[0].orbit.offset();
        assert!((p.x - -1.0).abs() < 1e-3);
        assert!((p.z - 99.995).abs() < 1e-3);
    }

    #[test]
    fn negative_speed_runs_the_other_way() {
        let mut bodies = vec![body(0.2, 0.3), body(-0.2, -0.3)];
        advance_bodies(&mut bodies, 1.0);
        let forward = bodies[0].orbit.angle - FRAC_PI_2;
        let backward = bodies[1].orbit.angle - FRAC_PI_2;
        assert!((forward + backward).abs() < 1e-5);
        assert!(forward > 0.0);
        assert!((bodies[1].spin - (TAU - 0.3)).abs() < 1e-5);
    }

    #[test]
    fn angles_stay_wrapped() {
        let mut bodies = vec![body(3.0, -7.0)];
        for _ in 0..100 {
            advance_bodies(&mut bodies, 0.7);
            assert!((0.0..TAU).contains(&bodies[0].orbit.angle));
            assert!((0.0..TAU).contains(&bodies[0].spin));
        }
    }

    #[test]
    fn zero_or_invalid_step_is_a_no_op() {
        let mut bodies = vec![body(0.01, 0.1)];
        let before = bodies[0].orbit;
        advance_bodies(&mut bodies, 0.0);
        advance_bodies(&mut bodies, f32::NAN);
        assert_eq!(bodies[0].orbit, before);
    }

    #[test]
    fn wrap_handles_tiny_negatives() {
        assert_eq!(wrap_angle(-1e-9), 0.0);
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
    }
}
