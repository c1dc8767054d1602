use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite extents cannot be projected.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width >= 1.0 && self.height >= 1.0)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel coordinates (origin top-left, Y down) to normalized device
    /// coordinates (origin center, Y up, range [-1, 1]).
    pub fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.width * 2.0 - 1.0,
            1.0 - pixel.y / self.height * 2.0,
        )
    }

    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// World-space ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Distance along the ray to the first intersection with a sphere.
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_disc;
        (far >= 0.0).then_some(far)
    }
}

/// Perspective camera described by an eye position and a look-at point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 220.0, 520.0),
            look_at: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 5000.0,
        }
    }
}

impl CameraRig {
    /// Keeps the orbit away from the poles, where `look_at_rh` degenerates.
    const MIN_POLAR: f32 = 0.05;
    const MAX_POLAR: f32 = std::f32::consts::PI - 0.05;
    const ORBIT_SENSITIVITY: f32 = 0.005;

    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            look_at,
            ..Default::default()
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    pub fn view_projection(&self, viewport: Viewport) -> Mat4 {
        self.projection_matrix(viewport.aspect()) * self.view_matrix()
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    /// Project a world point to viewport pixels. `None` when the point is
    /// behind the camera or the viewport is degenerate.
    pub fn project(&self, world: Vec3, viewport: Viewport) -> Option<Vec2> {
        if viewport.is_degenerate() {
            return None;
        }
        let clip = self.view_projection(viewport) * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(viewport.from_ndc(Vec2::new(ndc.x, ndc.y)))
    }

    /// Ray from the eye through a normalized device coordinate.
    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f32) -> Option<Ray> {
        if (self.position - self.look_at).length_squared() < 1e-12 || !aspect.is_finite() || aspect <= 0.0 {
            return None;
        }
        let inverse = (self.projection_matrix(aspect) * self.view_matrix()).inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let direction = far - near;
        if !direction.is_finite() || direction.length_squared() < 1e-12 {
            return None;
        }
        Some(Ray::new(near, direction))
    }

    /// Rotate the eye around the look-at point by a pointer drag delta (pixels).
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let offset = self.position - self.look_at;
        let radius = offset.length();
        if radius < 1e-6 {
            return;
        }
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        azimuth -= dx * Self::ORBIT_SENSITIVITY;
        polar = (polar - dy * Self::ORBIT_SENSITIVITY).clamp(Self::MIN_POLAR, Self::MAX_POLAR);
        self.position = self.look_at
            + radius
                * Vec3::new(
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                    polar.sin() * azimuth.cos(),
                );
    }

    /// Scale the eye distance by `factor`, clamped to `[min, max]`.
    pub fn zoom(&mut self, factor: f32, min: f32, max: f32) {
        let offset = self.position - self.look_at;
        let distance = offset.length();
        if distance < 1e-6 || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let target = (distance * factor).clamp(min, max);
        self.position = self.look_at + offset * (target / distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn look_at_point_projects_to_center() {
        let cam = CameraRig::default();
        let p = cam.project(Vec3::ZERO, viewport()).unwrap();
        assert!((p.x - 400.0).abs() < 1e-2);
        assert!((p.y - 300.0).abs() < 1e-2);
    }

    #[test]
    fn center_ray_points_at_look_at() {
        let cam = CameraRig::default();
        let ray = cam.ray_from_ndc(Vec2::ZERO, viewport().aspect()).unwrap();
        let to_target = (cam.look_at - cam.position).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }

    #[test]
    fn projected_point_unprojects_onto_its_ray() {
        let cam = CameraRig::default();
        let vp = viewport();
        let world = Vec3::new(40.0, 5.0, -30.0);
        let pixel = cam.project(world, vp).unwrap();
        let ray = cam.ray_from_ndc(vp.to_ndc(pixel), vp.aspect()).unwrap();
        let t = ray.intersect_sphere(world, 0.5).expect("ray misses its own point");
        assert!(t > 0.0);
    }

    #[test]
    fn sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!((ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap() - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        let behind = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(behind.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn degenerate_viewports() {
        assert!(Viewport::new(0.0, 600.0).is_degenerate());
        assert!(Viewport::new(f32::NAN, 600.0).is_degenerate());
        assert!(!viewport().is_degenerate());
        assert!(CameraRig::default().project(Vec3::ZERO, Viewport::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn orbit_keeps_distance_and_clamps_polar() {
        let mut cam = CameraRig::default();
        let d = cam.distance();
        cam.orbit(120.0, 0.0);
        assert!((cam.distance() - d).abs() < 1e-2);
        cam.orbit(0.0, 100_000.0);
        let offset = (cam.position - cam.look_at).normalize();
        assert!(offset.y < 1.0 && offset.y > 0.99);
    }

    #[test]
    fn zoom_clamps() {
        let mut cam = CameraRig::default();
        cam.zoom(0.001, 20.0, 2000.0);
        assert!((cam.distance() - 20.0).abs() < 1e-3);
        cam.zoom(1000.0, 20.0, 2000.0);
        assert!((cam.distance() - 2000.0).abs() < 1e-2);
    }
}
