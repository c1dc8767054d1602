//! Render backend contract.
//!
//! The engine never draws anything itself. Scene-graph nodes, camera
//! projection, ray–mesh intersection and presentation are services of the
//! host rendering engine, reached through this trait. The browser build
//! implements it over a JavaScript render host; tests use
//! [`HeadlessRenderer`](super::headless::HeadlessRenderer).

use glam::Vec2;

use super::camera::{CameraRig, Ray, Viewport};
use super::instance::InstanceTransform;
use crate::api::types::{DrawableHandle, Highlight};
use crate::components::body::Transform;
use crate::components::mesh::DrawableDesc;
use crate::error::RenderError;

/// Nearest intersection reported by [`RenderBackend::intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub handle: DrawableHandle,
    pub distance: f32,
}

pub trait RenderBackend {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Build a drawable node. The caller owns it until [`dispose`](Self::dispose).
    fn create(&mut self, desc: &DrawableDesc) -> Result<DrawableHandle, RenderError>;

    /// Parent `child` under `parent` in the backend's transform hierarchy.
    fn attach(&mut self, child: DrawableHandle, parent: DrawableHandle);

    fn set_transform(&mut self, handle: DrawableHandle, transform: &Transform);

    fn set_visible(&mut self, handle: DrawableHandle, visible: bool);

    fn set_highlight(&mut self, handle: DrawableHandle, highlight: Highlight);

    /// Replace the per-instance transforms of an instanced drawable in one upload.
    fn upload_instances(&mut self, handle: DrawableHandle, instances: &[InstanceTransform]);

    /// World-space ray through a pointer position given in normalized device coordinates.
    fn pointer_ray(&self, camera: &CameraRig, viewport: Viewport, ndc: Vec2) -> Option<Ray>;

    /// Nearest hit among `candidates`, or `None`.
    fn intersect(&self, ray: &Ray, candidates: &[DrawableHandle]) -> Option<RayHit>;

    /// Draw the current scene from `camera`.
    fn present(&mut self, camera: &CameraRig, viewport: Viewport) -> Result<(), RenderError>;

    /// Release a drawable and its GPU resources.
    fn dispose(&mut self, handle: DrawableHandle);
}

impl<R: RenderBackend + ?Sized> RenderBackend for &mut R {
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    fn create(&mut self, desc: &DrawableDesc) -> Result<DrawableHandle, RenderError> {
        (**self).create(desc)
    }

    fn attach(&mut self, child: DrawableHandle, parent: DrawableHandle) {
        (**self).attach(child, parent)
    }

    fn set_transform(&mut self, handle: DrawableHandle, transform: &Transform) {
        (**self).set_transform(handle, transform)
    }

    fn set_visible(&mut self, handle: DrawableHandle, visible: bool) {
        (**self).set_visible(handle, visible)
    }

    fn set_highlight(&mut self, handle: DrawableHandle, highlight: Highlight) {
        (**self).set_highlight(handle, highlight)
    }

    fn upload_instances(&mut self, handle: DrawableHandle, instances: &[InstanceTransform]) {
        (**self).upload_instances(handle, instances)
    }

    fn pointer_ray(&self, camera: &CameraRig, viewport: Viewport, ndc: Vec2) -> Option<Ray> {
        (**self).pointer_ray(camera, viewport, ndc)
    }

    fn intersect(&self, ray: &Ray, candidates: &[DrawableHandle]) -> Option<RayHit> {
        (**self).intersect(ray, candidates)
    }

    fn present(&mut self, camera: &CameraRig, viewport: Viewport) -> Result<(), RenderError> {
        (**self).present(camera, viewport)
    }

    fn dispose(&mut self, handle: DrawableHandle) {
        (**self).dispose(handle)
    }
}
