//! Static orbit-path overlay: one circle per planet around the origin.

use crate::api::types::{BodyId, BodyKind, DrawableHandle};
use crate::components::body::CelestialBody;
use crate::components::mesh::{Appearance, DrawableDesc, Geometry};
use crate::error::RenderError;
use crate::renderer::traits::RenderBackend;

const PATH_SEGMENTS: u32 = 128;
const PATH_OPACITY: f32 = 0.25;

#[derive(Debug, Default)]
pub struct OrbitOverlay {
    paths: Vec<(BodyId, DrawableHandle)>,
    visible: bool,
}

impl OrbitOverlay {
    /// Build a path for every planet orbiting the origin.
    pub fn spawn<R: RenderBackend + ?Sized>(
        bodies: &[CelestialBody],
        renderer: &mut R,
        root: DrawableHandle,
        visible: bool,
    ) -> Result<Self, RenderError> {
        let mut overlay = Self { paths: Vec::new(), visible };
        for body in bodies.iter().filter(|b| b.kind == BodyKind::Planet && b.is_root()) {
            let desc = DrawableDesc::new(
                Geometry::OrbitPath {
                    radius: body.orbit.radius,
                    segments: PATH_SEGMENTS,
                },
                Appearance::new(body.appearance.color).with_opacity(PATH_OPACITY),
            );
            let handle = match renderer.create(&desc) {
                Ok(h) => h,
                Err(e) => {
                    overlay.dispose(renderer);
                    return Err(e);
                }
            };
            renderer.attach(handle, root);
            renderer.set_visible(handle, visible);
            overlay.paths.push((body.id, handle));
        }
        Ok(overlay)
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Show or hide every path. Returns whether visibility changed.
    pub fn set_visible<R: RenderBackend + ?Sized>(&mut self, renderer: &mut R, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        for &(_, handle) in &self.paths {
            renderer.set_visible(handle, visible);
        }
        true
    }

    pub fn paths(&self) -> &[(BodyId, DrawableHandle)] {
        &self.paths
    }

    pub fn dispose<R: RenderBackend + ?Sized>(&mut self, renderer: &mut R) {
        for (_, handle) in self.paths.drain(..) {
            renderer.dispose(handle);
        }
    }
}
