//! Decorative star field. Generated once, never updated per tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::DrawableHandle;
use crate::components::mesh::{Appearance, Color, DrawableDesc, Geometry};
use crate::core::rng::Rng;
use crate::error::RenderError;
use crate::renderer::traits::RenderBackend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropSettings {
    pub count: usize,
    /// Points are scattered in a spherical shell between these radii.
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub point_size: f32,
    pub seed: u64,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            count: 2000,
            inner_radius: 1500.0,
            outer_radius: 2500.0,
            point_size: 1.5,
            seed: 0x0057_a125,
        }
    }
}

pub struct Backdrop {
    positions: Vec<Vec3>,
    point_size: f32,
    pub drawable: Option<DrawableHandle>,
}

impl Backdrop {
    pub fn generate(settings: &BackdropSettings, rng: &mut Rng) -> Self {
        let positions = (0..settings.count)
            .map(|_| rng.unit_vector() * rng.range(settings.inner_radius, settings.outer_radius))
            .collect();
        Self {
            positions,
            point_size: settings.point_size,
            drawable: None,
        }
    }

    pub fn desc(&self) -> DrawableDesc {
        DrawableDesc::new(
            Geometry::PointCloud {
                positions: self.positions.clone(),
                point_size: self.point_size,
            },
            Appearance::new(Color::WHITE).with_opacity(0.8),
        )
    }

    pub fn spawn<R: RenderBackend + ?Sized>(&mut self, renderer: &mut R, root: DrawableHandle) -> Result<(), RenderError> {
        let handle = renderer.create(&self.desc())?;
        renderer.attach(handle, root);
        self.drawable = Some(handle);
        Ok(())
    }

    pub fn dispose<R: RenderBackend + ?Sized>(&mut self, renderer: &mut R) {
        if let Some(handle) = self.drawable.take() {
            renderer.dispose(handle);
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}
