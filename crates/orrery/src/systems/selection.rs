//! Selection & hover.
//!
//! Pointer positions become world rays through the render backend; hits are
//! resolved to bodies through the [`HandleMap`] only, so rings, the belt, the
//! backdrop and the orbit overlay are never candidates.

use glam::Vec2;

use crate::api::types::{BodyId, Cursor, Highlight};
use crate::components::body::CelestialBody;
use crate::core::handles::HandleMap;
use crate::renderer::camera::{CameraRig, Viewport};
use crate::renderer::traits::RenderBackend;

/// Nearest interactive body under a pointer position given in viewport pixels.
pub fn pick<R: RenderBackend + ?Sized>(
    renderer: &R,
    camera: &CameraRig,
    viewport: Viewport,
    pixel: Vec2,
    handles: &HandleMap,
) -> Option<BodyId> {
    if viewport.is_degenerate() || !pixel.is_finite() {
        return None;
    }
    let ray = renderer.pointer_ray(camera, viewport, viewport.to_ndc(pixel))?;
    let candidates = handles.handles();
    let hit = renderer.intersect(&ray, &candidates)?;
    handles.body(hit.handle)
}

/// Hovered and selected bodies. The selected body always wears
/// `Highlight::Selected`; a hovered body wears `Highlight::Hover` unless it
/// is also the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    hovered: Option<BodyId>,
    selected: Option<BodyId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<BodyId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn cursor(&self) -> Cursor {
        if self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    /// Move hover to `hit`. Returns whether the hovered body changed.
    pub fn hover<R: RenderBackend + ?Sized>(
        &mut self,
        hit: Option<BodyId>,
        bodies: &mut [CelestialBody],
        renderer: &mut R,
    ) -> bool {
        if hit == self.hovered {
            return false;
        }
        if let Some(prev) = self.hovered.take() {
            if Some(prev) != self.selected {
                apply(bodies, prev, Highlight::None, renderer);
            }
        }
        self.hovered = hit;
        if let Some(body) = hit {
            if Some(body) != self.selected {
                apply(bodies, body, Highlight::Hover, renderer);
            }
        }
        true
    }

    /// Make `hit` the selection, clearing the previous one in the same call.
    /// Returns whether the selection changed.
    pub fn select<R: RenderBackend + ?Sized>(
        &mut self,
        hit: Option<BodyId>,
        bodies: &mut [CelestialBody],
        renderer: &mut R,
    ) -> bool {
        if hit == self.selected {
            return false;
        }
        if let Some(prev) = self.selected.take() {
            let fallback = if Some(prev) == self.hovered {
                Highlight::Hover
            } else {
                Highlight::None
            };
            apply(bodies, prev, fallback, renderer);
        }
        self.selected = hit;
        if let Some(body) = hit {
            apply(bodies, body, Highlight::Selected, renderer);
        }
        true
    }

    /// Forget both bodies without touching highlights. Used at shutdown.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn apply<R: RenderBackend + ?Sized>(
    bodies: &mut [CelestialBody],
    id: BodyId,
    highlight: Highlight,
    renderer: &mut R,
) {
    let Some(body) = bodies.get_mut(id.index()) else {
        log::debug!("highlight for unknown body {}", id.0);
        return;
    };
    body.highlight = highlight;
    if let Some(handle) = body.drawable {
        renderer.set_highlight(handle, highlight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyKind;
    use crate::components::body::Transform;
    use crate::components::mesh::DrawableDesc;
    use crate::renderer::headless::HeadlessRenderer;
    use crate::systems::scale::spawn_body;
    use glam::Vec3;

    struct Fixture {
        bodies: Vec<CelestialBody>,
        handles: HandleMap,
        renderer: HeadlessRenderer,
        state: SelectionState,
    }

    fn fixture() -> Fixture {
        let mut renderer = HeadlessRenderer::new();
        let root = renderer.create(&DrawableDesc::group()).unwrap();
        let mut handles = HandleMap::new();
        let mut bodies: Vec<_> = ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut b = CelestialBody::new(BodyId(i as u32), *name, BodyKind::Planet, 5.0);
                b.world = Transform::from_translation(Vec3::new(i as f32 * 40.0 - 40.0, 0.0, 0.0));
                b
            })
            .collect();
        for body in &mut bodies {
            spawn_body(body, &mut handles, &mut renderer, root).unwrap();
        }
        Fixture {
            bodies,
            handles,
            renderer,
            state: SelectionState::new(),
        }
    }

    fn selected_count(bodies: &[CelestialBody]) -> usize {
        bodies.iter().filter(|b| b.highlight == Highlight::Selected).count()
    }

    #[test]
    fn pick_resolves_through_handle_map() {
        let f = fixture();
        let camera = CameraRig::new(Vec3::new(0.0, 0.0, 200.0), Vec3::ZERO);
        let viewport = Viewport::new(800.0, 600.0);
        let center = camera.project(Vec3::new(40.0, 0.0, 0.0), viewport).unwrap();
        assert_eq!(pick(&f.renderer, &camera, viewport, center, &f.handles), Some(BodyId(2)));
        assert_eq!(pick(&f.renderer, &camera, viewport, Vec2::new(400.0, 5.0), &f.handles), None);
        assert_eq!(pick(&f.renderer, &camera, Viewport::new(0.0, 0.0), center, &f.handles), None);
    }

    #[test]
    fn selecting_b_after_a_leaves_only_b() {
        let mut f = fixture();
        f.state.select(Some(BodyId(0)), &mut f.bodies, &mut f.renderer);
        f.state.select(Some(BodyId(1)), &mut f.bodies, &mut f.renderer);
        assert_eq!(f.state.selected(), Some(BodyId(1)));
        assert_eq!(selected_count(&f.bodies), 1);
        assert_eq!(f.bodies[0].highlight, Highlight::None);
        let a = f.renderer.node(f.bodies[0].drawable.unwrap()).unwrap();
        assert_eq!(a.highlight, Highlight::None);
    }

    #[test]
    fn hover_skips_selected_body() {
        let mut f = fixture();
        f.state.select(Some(BodyId(0)), &mut f.bodies, &mut f.renderer);
        f.state.hover(Some(BodyId(0)), &mut f.bodies, &mut f.renderer);
        assert_eq!(f.bodies[0].highlight, Highlight::Selected);
        assert_eq!(f.state.cursor(), Cursor::Pointer);
        f.state.hover(Some(BodyId(1)), &mut f.bodies, &mut f.renderer);
        assert_eq!(f.bodies[0].highlight, Highlight::Selected);
        assert_eq!(f.bodies[1].highlight, Highlight::Hover);
        f.state.hover(None, &mut f.bodies, &mut f.renderer);
        assert_eq!(f.bodies[1].highlight, Highlight::None);
        assert_eq!(f.state.cursor(), Cursor::Default);
    }

    #[test]
    fn deselecting_hovered_body_falls_back_to_hover() {
        let mut f = fixture();
        f.state.hover(Some(BodyId(2)), &mut f.bodies, &mut f.renderer);
        f.state.select(Some(BodyId(2)), &mut f.bodies, &mut f.renderer);
        assert_eq!(f.bodies[2].highlight, Highlight::Selected);
        f.state.select(None, &mut f.bodies, &mut f.renderer);
        assert_eq!(f.bodies[2].highlight, Highlight::Hover);
        assert_eq!(selected_count(&f.bodies), 0);
    }

    #[test]
    fn repeated_hover_is_not_a_change() {
        let mut f = fixture();
        assert!(f.state.hover(Some(BodyId(1)), &mut f.bodies, &mut f.renderer));
        assert!(!f.state.hover(Some(BodyId(1)), &mut f.bodies, &mut f.renderer));
        assert!(!f.state.select(None, &mut f.bodies, &mut f.renderer));
    }
}
