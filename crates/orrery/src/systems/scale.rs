//! Scale reconfigurator: rebuilds body geometry when a category's size
//! multiplier changes. Orbit state is never touched.

use serde::{Deserialize, Serialize};

use crate::api::types::{BodyKind, DrawableHandle};
use crate::components::body::CelestialBody;
use crate::components::mesh::DrawableDesc;
use crate::core::handles::HandleMap;
use crate::error::{OrreryError, OrreryResult, RenderError};
use crate::renderer::traits::RenderBackend;

/// Visual size multipliers per body category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub star: f32,
    pub planet: f32,
    pub moon: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            star: 1.0,
            planet: 4.0,
            moon: 4.0,
        }
    }
}

impl ScaleConfig {
    pub fn get(&self, kind: BodyKind) -> f32 {
        match kind {
            BodyKind::Star => self.star,
            BodyKind::Planet => self.planet,
            BodyKind::Moon => self.moon,
        }
    }

    /// Store a new multiplier. Returns `Ok(false)` when it equals the current
    /// one; non-finite or non-positive values are rejected unchanged.
    pub fn set(&mut self, kind: BodyKind, multiplier: f32) -> OrreryResult<bool> {
        check(kind, multiplier)?;
        let slot = match kind {
            BodyKind::Star => &mut self.star,
            BodyKind::Planet => &mut self.planet,
            BodyKind::Moon => &mut self.moon,
        };
        if *slot == multiplier {
            return Ok(false);
        }
        *slot = multiplier;
        Ok(true)
    }

    /// Fails on the first category whose multiplier is not finite and positive.
    pub fn validate(&self) -> OrreryResult<()> {
        BodyKind::ALL.iter().try_for_each(|&kind| check(kind, self.get(kind)))
    }
}

fn check(kind: BodyKind, value: f32) -> OrreryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OrreryError::InvalidMultiplier { kind, value })
    }
}

/// Description of a body's sphere at its current visual radius.
pub fn body_desc(body: &CelestialBody) -> DrawableDesc {
    DrawableDesc::sphere(body.visual_radius, body.appearance)
}

/// Build, place and register the drawables of one body (sphere plus ring).
pub fn spawn_body<R: RenderBackend + ?Sized>(
    body: &mut CelestialBody,
    handles: &mut HandleMap,
    renderer: &mut R,
    root: DrawableHandle,
) -> Result<(), RenderError> {
    let handle = renderer.create(&body_desc(body))?;
    renderer.attach(handle, root);
    renderer.set_transform(handle, &body.world);
    renderer.set_highlight(handle, body.highlight);
    handles.bind(body.id, handle);
    body.drawable = Some(handle);

    let radius = body.visual_radius;
    if let Some(ring) = body.ring.as_mut() {
        let (inner, outer) = ring.extents(radius);
        let ring_handle = renderer.create(&DrawableDesc::ring(inner, outer, ring.appearance))?;
        renderer.attach(ring_handle, root);
        renderer.set_transform(ring_handle, &ring.world);
        ring.drawable = Some(ring_handle);
    }
    Ok(())
}

/// Replacement drawables for one body, built but not yet swapped in.
struct Staged {
    index: usize,
    sphere: DrawableHandle,
    ring: Option<DrawableHandle>,
    radius: f32,
}

impl Staged {
    fn discard<R: RenderBackend + ?Sized>(self, renderer: &mut R) {
        renderer.dispose(self.sphere);
        if let Some(ring) = self.ring {
            renderer.dispose(ring);
        }
    }
}

fn stage<R: RenderBackend + ?Sized>(
    index: usize,
    body: &CelestialBody,
    renderer: &mut R,
    root: DrawableHandle,
    radius: f32,
) -> Result<Staged, RenderError> {
    let sphere = renderer.create(&DrawableDesc::sphere(radius, body.appearance))?;
    renderer.attach(sphere, root);
    renderer.set_transform(sphere, &body.world);
    renderer.set_highlight(sphere, body.highlight);

    let ring = match &body.ring {
        Some(ring) => {
            let (inner, outer) = ring.extents(radius);
            match renderer.create(&DrawableDesc::ring(inner, outer, ring.appearance)) {
                Ok(handle) => {
                    renderer.attach(handle, root);
                    renderer.set_transform(handle, &ring.world);
                    Some(handle)
                }
                Err(e) => {
                    renderer.dispose(sphere);
                    return Err(e);
                }
            }
        }
        None => None,
    };
    Ok(Staged { index, sphere, ring, radius })
}

/// Rebuild every body of `kind` at `base_radius * multiplier`.
///
/// All-or-nothing: every replacement is built before any body is touched.
/// If the backend fails, the replacements built so far are disposed and
/// every body keeps its previous geometry and radius. Returns the number of
/// bodies rebuilt.
pub fn rebuild_category<R: RenderBackend + ?Sized>(
    bodies: &mut [CelestialBody],
    handles: &mut HandleMap,
    renderer: &mut R,
    root: DrawableHandle,
    kind: BodyKind,
    multiplier: f32,
) -> Result<usize, RenderError> {
    let mut staged = Vec::new();
    for (index, body) in bodies.iter().enumerate().filter(|(_, b)| b.kind == kind) {
        match stage(index, body, renderer, root, body.base_radius * multiplier) {
            Ok(s) => staged.push(s),
            Err(e) => {
                for s in staged {
                    s.discard(renderer);
                }
                log::warn!("rebuild of {} bodies failed, keeping old geometry: {}", kind.label(), e);
                return Err(e);
            }
        }
    }

    let rebuilt = staged.len();
    for s in staged {
        let body = &mut bodies[s.index];
        if let Some(old) = body.drawable.replace(s.sphere) {
            renderer.dispose(old);
        }
        handles.bind(body.id, s.sphere);
        body.visual_radius = s.radius;
        if let (Some(ring), Some(handle)) = (body.ring.as_mut(), s.ring) {
            if let Some(old) = ring.drawable.replace(handle) {
                renderer.dispose(old);
            }
        }
    }
    log::debug!("rebuilt {} {} bodies at x{}", rebuilt, kind.label(), multiplier);
    Ok(rebuilt)
}

/// Release a body's drawables and forget its handle.
pub fn despawn_body<R: RenderBackend + ?Sized>(body: &mut CelestialBody, handles: &mut HandleMap, renderer: &mut R) {
    handles.unbind(body.id);
    if let Some(handle) = body.drawable.take() {
        renderer.dispose(handle);
    }
    if let Some(ring) = body.ring.as_mut() {
        if let Some(handle) = ring.drawable.take() {
            renderer.dispose(handle);
        }
    }
}
