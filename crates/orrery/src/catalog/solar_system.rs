//! The shipped system: the Sun, eight planets, nine moons and Saturn's ring.
//!
//! Distances and speeds are compressed for readability; orbits are uniform
//! circles. Informational fields carry real-world values for the info panel.

use std::f32::consts::FRAC_PI_2;

use crate::api::types::{BodyId, BodyKind};
use crate::components::body::{BodyInfo, CelestialBody, OrbitState, RingAttachment};
use crate::components::mesh::{Appearance, Color};

/// Body index constants (storage order).
pub const SUN: u32 = 0;
pub const MERCURY: u32 = 1;
pub const VENUS: u32 = 2;
pub const EARTH: u32 = 3;
pub const MARS: u32 = 4;
pub const JUPITER: u32 = 5;
pub const SATURN: u32 = 6;
pub const URANUS: u32 = 7;
pub const NEPTUNE: u32 = 8;

/// Minor-body belt band, between Mars and Jupiter.
pub const BELT_INNER: f32 = 175.0;
pub const BELT_OUTER: f32 = 235.0;

// ── Sun ──────────────────────────────────────────────────────────────

const SUN_RADIUS: f32 = 10.0;
const SUN_COLOR: u32 = 0xffcc33;
const SUN_EMISSIVE: f32 = 1.5;
const SUN_ROTATION: f32 = 0.02;

// ── Saturn's ring ────────────────────────────────────────────────────

const RING_INNER_RATIO: f32 = 1.25;
const RING_OUTER_RATIO: f32 = 2.3;
/// Lays the XY-plane annulus into the planet's equatorial plane.
const RING_TILT: f32 = -FRAC_PI_2;
const RING_COLOR: u32 = 0xcdb68a;
const RING_OPACITY: f32 = 0.7;

/// One planet row.
struct PlanetDef {
    name: &'static str,
    radius: f32,
    color: u32,
    orbit_radius: f32,
    angular_speed: f32,
    start_angle: f32,
    rotation_speed: f32,
    tilt_deg: f32,
    diameter_km: f64,
    distance_mkm: f64,
    orbital_period_days: f64,
    rotation_period_hours: f64,
    moon_count: u32,
    description: &'static str,
}

/// One moon row. `parent` is a body index constant.
struct MoonDef {
    name: &'static str,
    parent: u32,
    radius: f32,
    color: u32,
    orbit_radius: f32,
    angular_speed: f32,
    start_angle: f32,
    diameter_km: f64,
    distance_mkm: f64,
    orbital_period_days: f64,
    description: &'static str,
}

const PLANETS: [PlanetDef; 8] = [
    PlanetDef {
        name: "Mercury", radius: 0.4, color: 0x9c9c9c,
        orbit_radius: 40.0, angular_speed: 0.04, start_angle: 0.0,
        rotation_speed: 0.05, tilt_deg: 0.03,
        diameter_km: 4_879.0, distance_mkm: 57.9, orbital_period_days: 87.97,
        rotation_period_hours: 1_407.6, moon_count: 0,
        description: "Smallest planet and closest to the Sun.",
    },
    PlanetDef {
        name: "Venus", radius: 0.95, color: 0xe6c27a,
        orbit_radius: 70.0, angular_speed: 0.016, start_angle: 1.2,
        rotation_speed: -0.12, tilt_deg: 177.4,
        diameter_km: 12_104.0, distance_mkm: 108.2, orbital_period_days: 224.7,
        rotation_period_hours: -5_832.5, moon_count: 0,
        description: "Hottest planet, wrapped in thick clouds; spins backwards.",
    },
    PlanetDef {
        name: "Earth", radius: 1.0, color: 0x2f6fdb,
        orbit_radius: 100.0, angular_speed: 0.01, start_angle: 2.4,
        rotation_speed: 0.5, tilt_deg: 23.44,
        diameter_km: 12_742.0, distance_mkm: 149.6, orbital_period_days: 365.26,
        rotation_period_hours: 23.93, moon_count: 1,
        description: "Our home, the only known world with liquid surface oceans.",
    },
    PlanetDef {
        name: "Mars", radius: 0.53, color: 0xc1440e,
        orbit_radius: 150.0, angular_speed: 0.0053, start_angle: 3.6,
        rotation_speed: 0.48, tilt_deg: 25.19,
        diameter_km: 6_779.0, distance_mkm: 227.9, orbital_period_days: 686.98,
        rotation_period_hours: 24.62, moon_count: 2,
        description: "The red planet, home of Olympus Mons.",
    },
    PlanetDef {
        name: "Jupiter", radius: 3.0, color: 0xd8ca9d,
        orbit_radius: 260.0, angular_speed: 0.0021, start_angle: 4.8,
        rotation_speed: 1.2, tilt_deg: 3.13,
        diameter_km: 139_820.0, distance_mkm: 778.5, orbital_period_days: 4_332.59,
        rotation_period_hours: 9.93, moon_count: 95,
        description: "Largest planet, a gas giant with the Great Red Spot.",
    },
    PlanetDef {
        name: "Saturn", radius: 2.5, color: 0xe3d59e,
        orbit_radius: 350.0, angular_speed: 0.0013, start_angle: 0.6,
        rotation_speed: 1.1, tilt_deg: 26.73,
        diameter_km: 116_460.0, distance_mkm: 1_434.0, orbital_period_days: 10_759.22,
        rotation_period_hours: 10.66, moon_count: 146,
        description: "Gas giant famous for its bright ring system.",
    },
    PlanetDef {
        name: "Uranus", radius: 1.6, color: 0x9fd8e3,
        orbit_radius: 430.0, angular_speed: 0.0008, start_angle: 1.8,
        rotation_speed: -0.35, tilt_deg: 97.77,
        diameter_km: 50_724.0, distance_mkm: 2_871.0, orbital_period_days: 30_688.5,
        rotation_period_hours: -17.24, moon_count: 28,
        description: "Ice giant rolling on its side.",
    },
    PlanetDef {
        name: "Neptune", radius: 1.55, color: 0x3f54ba,
        orbit_radius: 500.0, angular_speed: 0.0005, start_angle: 3.0,
        rotation_speed: 0.7, tilt_deg: 28.32,
        diameter_km: 49_244.0, distance_mkm: 4_495.0, orbital_period_days: 60_182.0,
        rotation_period_hours: 16.11, moon_count: 16,
        description: "Windiest planet, the outermost of the eight.",
    },
];

const MOONS: [MoonDef; 9] = [
    MoonDef {
        name: "Moon", parent: EARTH, radius: 0.27, color: 0xbdbdbd,
        orbit_radius: 12.0, angular_speed: 0.12, start_angle: 0.0,
        diameter_km: 3_474.8, distance_mkm: 0.384, orbital_period_days: 27.32,
        description: "Earth's only natural satellite.",
    },
    MoonDef {
        name: "Phobos", parent: MARS, radius: 0.1, color: 0x8a7f74,
        orbit_radius: 7.0, angular_speed: 0.9, start_angle: 1.0,
        diameter_km: 22.5, distance_mkm: 0.0094, orbital_period_days: 0.32,
        description: "Larger, inner moon of Mars, slowly spiralling inward.",
    },
    MoonDef {
        name: "Deimos", parent: MARS, radius: 0.08, color: 0x9a8e80,
        orbit_radius: 10.0, angular_speed: 0.35, start_angle: 4.0,
        diameter_km: 12.4, distance_mkm: 0.0235, orbital_period_days: 1.26,
        description: "Small outer moon of Mars.",
    },
    MoonDef {
        name: "Io", parent: JUPITER, radius: 0.29, color: 0xe5cc4c,
        orbit_radius: 30.0, angular_speed: 0.6, start_angle: 0.5,
        diameter_km: 3_643.0, distance_mkm: 0.422, orbital_period_days: 1.77,
        description: "Most volcanically active body in the solar system.",
    },
    MoonDef {
        name: "Europa", parent: JUPITER, radius: 0.25, color: 0xcbb38a,
        orbit_radius: 35.0, angular_speed: 0.42, start_angle: 2.0,
        diameter_km: 3_121.6, distance_mkm: 0.671, orbital_period_days: 3.55,
        description: "Icy moon hiding a global subsurface ocean.",
    },
    MoonDef {
        name: "Ganymede", parent: JUPITER, radius: 0.41, color: 0x9a8c80,
        orbit_radius: 41.0, angular_speed: 0.3, start_angle: 3.5,
        diameter_km: 5_268.0, distance_mkm: 1.070, orbital_period_days: 7.15,
        description: "Largest moon in the solar system.",
    },
    MoonDef {
        name: "Callisto", parent: JUPITER, radius: 0.38, color: 0x5a4d47,
        orbit_radius: 48.0, angular_speed: 0.2, start_angle: 5.0,
        diameter_km: 4_821.0, distance_mkm: 1.883, orbital_period_days: 16.69,
        description: "Heavily cratered outer Galilean moon.",
    },
    MoonDef {
        name: "Titan", parent: SATURN, radius: 0.4, color: 0xd9b24c,
        orbit_radius: 52.0, angular_speed: 0.22, start_angle: 1.5,
        diameter_km: 5_149.5, distance_mkm: 1.222, orbital_period_days: 15.95,
        description: "Saturn's largest moon, with a dense nitrogen atmosphere.",
    },
    MoonDef {
        name: "Triton", parent: NEPTUNE, radius: 0.21, color: 0x9fb3cc,
        orbit_radius: 18.0, angular_speed: -0.3, start_angle: 2.5,
        diameter_km: 2_706.8, distance_mkm: 0.355, orbital_period_days: -5.877,
        description: "Captured moon orbiting Neptune backwards.",
    },
];

/// Build the catalog rows in storage order. Ids are placeholders; the
/// catalog assigns them from the position in the returned vector.
pub fn bodies() -> Vec<CelestialBody> {
    let mut bodies = Vec::with_capacity(1 + PLANETS.len() + MOONS.len());

    bodies.push(
        CelestialBody::new(BodyId(SUN), "Sun", BodyKind::Star, SUN_RADIUS)
            .with_appearance(Appearance::new(Color::hex(SUN_COLOR)).with_emissive(SUN_EMISSIVE))
            .with_rotation(SUN_ROTATION, 0.0)
            .with_info(BodyInfo {
                diameter_km: 1_392_700.0,
                rotation_period_hours: 609.12,
                moon_count: 0,
                description: "G-type main-sequence star at the center of the system.".into(),
                ..Default::default()
            }),
    );

    for (i, p) in PLANETS.iter().enumerate() {
        let mut body = CelestialBody::new(BodyId(i as u32 + 1), p.name, BodyKind::Planet, p.radius)
            .with_appearance(Appearance::new(Color::hex(p.color)))
            .with_orbit(OrbitState::new(p.orbit_radius, p.angular_speed, p.start_angle))
            .with_rotation(p.rotation_speed, p.tilt_deg.to_radians())
            .with_info(BodyInfo {
                diameter_km: p.diameter_km,
                distance_mkm: p.distance_mkm,
                orbital_period_days: p.orbital_period_days,
                rotation_period_hours: p.rotation_period_hours,
                moon_count: p.moon_count,
                description: p.description.into(),
                ..Default::default()
            });
        if i as u32 + 1 == SATURN {
            body = body.with_ring(RingAttachment::new(
                RING_INNER_RATIO,
                RING_OUTER_RATIO,
                RING_TILT,
                Appearance::new(Color::hex(RING_COLOR)).with_opacity(RING_OPACITY),
            ));
        }
        bodies.push(body);
    }

    for (i, m) in MOONS.iter().enumerate() {
        let id = BodyId((1 + PLANETS.len() + i) as u32);
        bodies.push(
            CelestialBody::new(id, m.name, BodyKind::Moon, m.radius)
                .with_parent(BodyId(m.parent))
                .with_appearance(Appearance::new(Color::hex(m.color)))
                .with_orbit(OrbitState::new(m.orbit_radius, m.angular_speed, m.start_angle))
                .with_info(BodyInfo {
                    diameter_km: m.diameter_km,
                    distance_mkm: m.distance_mkm,
                    orbital_period_days: m.orbital_period_days,
                    // Tidally locked: one rotation per orbit.
                    rotation_period_hours: m.orbital_period_days * 24.0,
                    description: m.description.into(),
                    ..Default::default()
                }),
        );
    }

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_constants_match_rows() {
        let bodies = bodies();
        assert_eq!(bodies[SUN as usize].name, "Sun");
        assert_eq!(bodies[EARTH as usize].name, "Earth");
        assert_eq!(bodies[SATURN as usize].name, "Saturn");
        assert_eq!(bodies[NEPTUNE as usize].name, "Neptune");
    }

    #[test]
    fn earth_orbit_matches_lesson_numbers() {
        let earth = &bodies()[EARTH as usize];
        assert_eq!(earth.orbit.radius, 100.0);
        assert_eq!(earth.orbit.angular_speed, 0.01);
    }

    #[test]
    fn belt_lies_between_mars_and_jupiter() {
        let bodies = bodies();
        assert!(bodies[MARS as usize].orbit.radius < BELT_INNER);
        assert!(bodies[JUPITER as usize].orbit.radius > BELT_OUTER);
    }

    #[test]
    fn triton_is_retrograde() {
        let triton = bodies().into_iter().find(|b| b.name == "Triton").unwrap();
        assert!(triton.orbit.angular_speed < 0.0);
        assert_eq!(triton.parent, Some(BodyId(NEPTUNE)));
    }
}
