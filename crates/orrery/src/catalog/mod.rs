//! Body catalog: flat, id-indexed storage for every star, planet and moon.
//!
//! Satellites reference their parent by `BodyId`. Validation guarantees that
//! every parent exists, is a planet, and is stored before its satellites, so a
//! single forward pass can compose world positions.

pub mod solar_system;

use std::collections::HashSet;

use crate::api::types::{BodyId, BodyKind};
use crate::components::body::CelestialBody;
use crate::error::CatalogError;

pub struct Catalog {
    bodies: Vec<CelestialBody>,
}

impl Catalog {
    /// Validate `bodies` and take ownership. Ids are reassigned to match
    /// storage order; `parent` ids must already refer to that order.
    pub fn new(mut bodies: Vec<CelestialBody>) -> Result<Self, CatalogError> {
        for (i, body) in bodies.iter_mut().enumerate() {
            body.id = BodyId(i as u32);
        }
        validate(&bodies)?;
        Ok(Self { bodies })
    }

    /// The shipped solar system.
    pub fn solar_system() -> Result<Self, CatalogError> {
        Self::new(solar_system::bodies())
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id.index())
    }

    /// Case-insensitive name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CelestialBody> {
        self.bodies.iter_mut()
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [CelestialBody] {
        &mut self.bodies
    }

    /// Display names in storage order (star, planets, then moons).
    pub fn names(&self) -> Vec<String> {
        self.bodies.iter().map(|b| b.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn validate(bodies: &[CelestialBody]) -> Result<(), CatalogError> {
    let mut names = HashSet::new();
    if !bodies.iter().any(|b| b.kind == BodyKind::Star) {
        return Err(CatalogError::NoStar);
    }

    for (i, body) in bodies.iter().enumerate() {
        if !names.insert(body.name.to_ascii_lowercase()) {
            return Err(CatalogError::DuplicateName(body.name.clone()));
        }
        if !(body.base_radius.is_finite() && body.base_radius > 0.0) {
            return Err(CatalogError::InvalidRadius(body.name.clone()));
        }

        match body.parent {
            None if body.kind == BodyKind::Moon => {
                return Err(CatalogError::OrphanMoon(body.name.clone()));
            }
            None => {}
            Some(parent_id) => {
                let parent = bodies.get(parent_id.index()).ok_or_else(|| CatalogError::MissingParent {
                    child: body.name.clone(),
                    parent: format!("#{}", parent_id.0),
                })?;
                if parent_id.index() >= i {
                    return Err(CatalogError::ParentOrder {
                        child: body.name.clone(),
                        parent: parent.name.clone(),
                    });
                }
                if parent.kind != BodyKind::Planet {
                    return Err(CatalogError::ParentNotPlanet {
                        child: body.name.clone(),
                        parent: parent.name.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
