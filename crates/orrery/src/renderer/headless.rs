//! Headless render backend.
//!
//! Keeps an in-memory scene graph and answers ray queries with analytic
//! ray–sphere tests. Used by the test suite and by native tooling that wants
//! to drive the simulation without a GPU. Tracks allocation and disposal
//! counts so leaks show up as a count mismatch.

use std::collections::HashMap;

use glam::Vec2;

use super::camera::{CameraRig, Ray, Viewport};
use super::instance::InstanceTransform;
use super::traits::{RayHit, RenderBackend};
use crate::api::types::{DrawableHandle, Highlight};
use crate::components::body::Transform;
use crate::components::mesh::{DrawableDesc, Geometry};
use crate::error::RenderError;

/// One node in the headless scene graph.
#[derive(Debug, Clone)]
pub struct HeadlessNode {
    pub desc: DrawableDesc,
    pub parent: Option<DrawableHandle>,
    pub transform: Transform,
    pub visible: bool,
    pub highlight: Highlight,
    pub instances: Vec<InstanceTransform>,
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    nodes: HashMap<DrawableHandle, HeadlessNode>,
    next_handle: u32,
    created: usize,
    disposed: usize,
    invalid_disposals: usize,
    frames_presented: usize,
    instance_uploads: usize,
    last_camera: Option<CameraRig>,
    /// Creates still allowed before `create` starts failing; `None` is unlimited.
    create_budget: Option<usize>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, handle: DrawableHandle) -> Option<&HeadlessNode> {
        self.nodes.get(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn disposed_count(&self) -> usize {
        self.disposed
    }

    /// Dispose calls for handles that were never created or already released.
    pub fn invalid_disposals(&self) -> usize {
        self.invalid_disposals
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn instance_uploads(&self) -> usize {
        self.instance_uploads
    }

    pub fn last_camera(&self) -> Option<&CameraRig> {
        self.last_camera.as_ref()
    }

    /// Make subsequent `create` calls fail, for exercising error paths.
    pub fn set_fail_creates(&mut self, fail: bool) {
        self.create_budget = if fail { Some(0) } else { None };
    }

    /// Let `n` more `create` calls succeed, then fail every one after.
    pub fn fail_creates_after(&mut self, n: usize) {
        self.create_budget = Some(n);
    }
}

impl RenderBackend for HeadlessRenderer {
    fn backend(&self) -> &'static str {
        "headless"
    }

    fn create(&mut self, desc: &DrawableDesc) -> Result<DrawableHandle, RenderError> {
        if let Some(budget) = self.create_budget.as_mut() {
            if *budget == 0 {
                return Err(RenderError::Backend("create disabled".into()));
            }
            *budget -= 1;
        }
        let handle = DrawableHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.nodes.insert(
            handle,
            HeadlessNode {
                desc: desc.clone(),
                parent: None,
                transform: Transform::default(),
                visible: true,
                highlight: Highlight::None,
                instances: Vec::new(),
            },
        );
        Ok(handle)
    }

    fn attach(&mut self, child: DrawableHandle, parent: DrawableHandle) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    fn set_transform(&mut self, handle: DrawableHandle, transform: &Transform) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.transform = *transform;
        }
    }

    fn set_visible(&mut self, handle: DrawableHandle, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.visible = visible;
        }
    }

    fn set_highlight(&mut self, handle: DrawableHandle, highlight: Highlight) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.highlight = highlight;
        }
    }

    fn upload_instances(&mut self, handle: DrawableHandle, instances: &[InstanceTransform]) {
        if let Some(node) = self.nodes.get_mut(&handle) {
            node.instances.clear();
            node.instances.extend_from_slice(instances);
            self.instance_uploads += 1;
        }
    }

    fn pointer_ray(&self, camera: &CameraRig, viewport: Viewport, ndc: Vec2) -> Option<Ray> {
        if viewport.is_degenerate() {
            return None;
        }
        camera.ray_from_ndc(ndc, viewport.aspect())
    }

    fn intersect(&self, ray: &Ray, candidates: &[DrawableHandle]) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for &handle in candidates {
            let Some(node) = self.nodes.get(&handle) else { continue };
            if !node.visible {
                continue;
            }
            let Geometry::Sphere { radius } = node.desc.geometry else { continue };
            let scale = node.transform.scale.max_element();
            if let Some(distance) = ray.intersect_sphere(node.transform.translation, radius * scale) {
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(RayHit { handle, distance });
                }
            }
        }
        best
    }

    fn present(&mut self, camera: &CameraRig, viewport: Viewport) -> Result<(), RenderError> {
        if viewport.is_degenerate() {
            return Err(RenderError::DegenerateViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.last_camera = Some(*camera);
        self.frames_presented += 1;
        Ok(())
    }

    fn dispose(&mut self, handle: DrawableHandle) {
        if self.nodes.remove(&handle).is_some() {
            self.disposed += 1;
        } else {
            log::warn!("headless: dispose of unknown drawable {}", handle.0);
            self.invalid_disposals += 1;
        }
    }
}
