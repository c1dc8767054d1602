use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Shape of a drawable, handed to the backend at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    /// Empty transform node used to group other drawables.
    Group,
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32 },
    /// Closed circle in the XZ plane around the local origin.
    OrbitPath { radius: f32, segments: u32 },
    PointCloud { positions: Vec<Vec3>, point_size: f32 },
    /// `count` copies of a low-poly rock, placed by instance matrices.
    InstancedRock { radius: f32, count: u32 },
}

/// Surface description for a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub color: Color,
    /// Glow multiplier (stars only in the shipped catalog).
    pub emissive: f32,
    pub opacity: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: Color::default(),
            emissive: 0.0,
            opacity: 1.0,
        }
    }
}

impl Appearance {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Everything the backend needs to build one drawable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawableDesc {
    pub geometry: Geometry,
    pub appearance: Appearance,
}

impl DrawableDesc {
    pub fn new(geometry: Geometry, appearance: Appearance) -> Self {
        Self { geometry, appearance }
    }

    pub fn group() -> Self {
        Self::new(Geometry::Group, Appearance::default())
    }

    pub fn sphere(radius: f32, appearance: Appearance) -> Self {
        Self::new(Geometry::Sphere { radius }, appearance)
    }

    pub fn ring(inner: f32, outer: f32, appearance: Appearance) -> Self {
        Self::new(Geometry::Ring { inner, outer }, appearance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_channels() {
        let c = Color::hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn desc_serializes_shape_tag() {
        let desc = DrawableDesc::sphere(2.0, Appearance::new(Color::WHITE));
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["geometry"]["shape"], "sphere");
        assert_eq!(json["geometry"]["radius"], 2.0);
    }
}
