//! `RenderBackend` over a JavaScript render host.
//!
//! The page hands `orrery_init` an object implementing the methods declared
//! below (a thin wrapper over its 3D library). Drawable descriptions cross
//! the boundary as JSON; transforms, camera poses and instance data cross as
//! flat `f32` slices.

use glam::{Vec2, Vec3};
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

use orrery::{
    CameraRig, DrawableDesc, DrawableHandle, Highlight, InstanceTransform, Ray, RayHit, RenderBackend,
    RenderError, Transform, Viewport,
};

#[wasm_bindgen]
extern "C" {
    /// Render host object supplied by the page.
    pub type RenderHost;

    #[wasm_bindgen(method, catch)]
    fn create(this: &RenderHost, desc_json: &str) -> Result<u32, JsValue>;

    #[wasm_bindgen(method)]
    fn attach(this: &RenderHost, child: u32, parent: u32);

    /// `matrix` is a column-major 4x4.
    #[wasm_bindgen(method, js_name = setTransform)]
    fn set_transform(this: &RenderHost, handle: u32, matrix: &[f32]);

    #[wasm_bindgen(method, js_name = setVisible)]
    fn set_visible(this: &RenderHost, handle: u32, visible: bool);

    /// 0 = none, 1 = hover, 2 = selected.
    #[wasm_bindgen(method, js_name = setHighlight)]
    fn set_highlight(this: &RenderHost, handle: u32, highlight: u32);

    #[wasm_bindgen(method, js_name = uploadInstances)]
    fn upload_instances(this: &RenderHost, handle: u32, data: &[f32]);

    /// Returns `[ox, oy, oz, dx, dy, dz]` or `null`.
    #[wasm_bindgen(method, js_name = pointerRay)]
    fn pointer_ray(this: &RenderHost, camera: &[f32], aspect: f32, ndc_x: f32, ndc_y: f32) -> JsValue;

    /// Returns `[handle, distance]` or `null`.
    #[wasm_bindgen(method)]
    fn intersect(this: &RenderHost, ray: &[f32], candidates: &[u32]) -> JsValue;

    #[wasm_bindgen(method, catch)]
    fn present(this: &RenderHost, camera: &[f32], width: f32, height: f32) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn dispose(this: &RenderHost, handle: u32);
}

/// Adapter from the JS host to the engine's backend trait.
pub struct JsRenderer {
    host: RenderHost,
}

impl JsRenderer {
    pub fn new(host: RenderHost) -> Self {
        Self { host }
    }
}

/// Camera as `[px, py, pz, lx, ly, lz, fov_y, near, far]`.
fn camera_floats(camera: &CameraRig) -> [f32; 9] {
    [
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.look_at.x,
        camera.look_at.y,
        camera.look_at.z,
        camera.fov_y,
        camera.near,
        camera.far,
    ]
}

fn highlight_code(highlight: Highlight) -> u32 {
    match highlight {
        Highlight::None => 0,
        Highlight::Hover => 1,
        Highlight::Selected => 2,
    }
}

fn js_error(value: JsValue) -> RenderError {
    RenderError::Backend(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Read a JS array of numbers, `None` for null/undefined or a short array.
fn read_floats(value: JsValue, len: usize) -> Option<Vec<f64>> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let values = Float64Array::new(&value).to_vec();
    (values.len() >= len).then_some(values)
}

impl RenderBackend for JsRenderer {
    fn backend(&self) -> &'static str {
        "js-host"
    }

    fn create(&mut self, desc: &DrawableDesc) -> Result<DrawableHandle, RenderError> {
        let json = serde_json::to_string(desc).map_err(|e| RenderError::Backend(e.to_string()))?;
        self.host.create(&json).map(DrawableHandle).map_err(js_error)
    }

    fn attach(&mut self, child: DrawableHandle, parent: DrawableHandle) {
        self.host.attach(child.0, parent.0);
    }

    fn set_transform(&mut self, handle: DrawableHandle, transform: &Transform) {
        self.host.set_transform(handle.0, &transform.matrix().to_cols_array());
    }

    fn set_visible(&mut self, handle: DrawableHandle, visible: bool) {
        self.host.set_visible(handle.0, visible);
    }

    fn set_highlight(&mut self, handle: DrawableHandle, highlight: Highlight) {
        self.host.set_highlight(handle.0, highlight_code(highlight));
    }

    fn upload_instances(&mut self, handle: DrawableHandle, instances: &[InstanceTransform]) {
        self.host.upload_instances(handle.0, bytemuck::cast_slice(instances));
    }

    fn pointer_ray(&self, camera: &CameraRig, viewport: Viewport, ndc: Vec2) -> Option<Ray> {
        if viewport.is_degenerate() {
            return None;
        }
        let raw = self
            .host
            .pointer_ray(&camera_floats(camera), viewport.aspect(), ndc.x, ndc.y);
        let v = read_floats(raw, 6)?;
        let origin = Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32);
        let direction = Vec3::new(v[3] as f32, v[4] as f32, v[5] as f32);
        Some(Ray::new(origin, direction))
    }

    fn intersect(&self, ray: &Ray, candidates: &[DrawableHandle]) -> Option<RayHit> {
        let flat_ray = [
            ray.origin.x,
            ray.origin.y,
            ray.origin.z,
            ray.direction.x,
            ray.direction.y,
            ray.direction.z,
        ];
        let ids: Vec<u32> = candidates.iter().map(|h| h.0).collect();
        let v = read_floats(self.host.intersect(&flat_ray, &ids), 2)?;
        Some(RayHit {
            handle: DrawableHandle(v[0] as u32),
            distance: v[1] as f32,
        })
    }

    fn present(&mut self, camera: &CameraRig, viewport: Viewport) -> Result<(), RenderError> {
        self.host
            .present(&camera_floats(camera), viewport.width, viewport.height)
            .map_err(js_error)
    }

    fn dispose(&mut self, handle: DrawableHandle) {
        self.host.dispose(handle.0);
    }
}
