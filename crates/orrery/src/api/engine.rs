//! The engine: one owned [`SimContext`] plus a render backend.
//!
//! Hosts drive it with two calls. `handle_input` applies one event
//! immediately; `frame` advances the simulation by a wall-clock delta and
//! presents. The browser runner drains its input queue right before each
//! frame, so input always lands at the same point in the tick.

use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::api::types::{BodyId, BodyKind, Cursor, DrawableHandle, EngineEvent};
use crate::catalog::Catalog;
use crate::components::body::{BodyInfo, CelestialBody};
use crate::components::mesh::{Appearance, Color, DrawableDesc, Geometry};
use crate::core::handles::HandleMap;
use crate::core::rng::Rng;
use crate::core::time::TimeControl;
use crate::error::OrreryResult;
use crate::extensions::focus::{CameraFocus, FocusStep};
use crate::input::queue::InputEvent;
use crate::renderer::camera::{CameraRig, Viewport};
use crate::renderer::traits::RenderBackend;
use crate::systems::backdrop::Backdrop;
use crate::systems::compose::compose_world;
use crate::systems::instancer::MinorBodyField;
use crate::systems::orbit::advance_bodies;
use crate::systems::overlay::OrbitOverlay;
use crate::systems::scale::{despawn_body, rebuild_category, spawn_body, ScaleConfig};
use crate::systems::selection::{pick, SelectionState};

/// Press/drag tracking for the pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub pressed_at: Option<Vec2>,
    pub last: Option<Vec2>,
    pub dragging: bool,
}

/// All simulation state, owned by the engine and handed to subsystems by
/// reference.
pub struct SimContext {
    pub catalog: Catalog,
    pub handles: HandleMap,
    pub time: TimeControl,
    pub scale: ScaleConfig,
    pub selection: SelectionState,
    pub camera: CameraRig,
    pub focus: CameraFocus,
    pub belt: MinorBodyField,
    pub backdrop: Backdrop,
    pub overlay: OrbitOverlay,
    pub viewport: Viewport,
    pub pointer: PointerState,
    pub events: Vec<EngineEvent>,
    /// Scene root every drawable hangs from.
    pub root: Option<DrawableHandle>,
}

pub struct Orrery<R: RenderBackend> {
    ctx: SimContext,
    renderer: R,
    config: EngineConfig,
    frames: u64,
    skipped_frames: u64,
    shut_down: bool,
}

impl<R: RenderBackend> Orrery<R> {
    /// Build the shipped solar system.
    pub fn new(config: EngineConfig, renderer: R) -> OrreryResult<Self> {
        Self::with_catalog(config, Catalog::solar_system()?, renderer)
    }

    /// Build from an already validated catalog. Every drawable is created
    /// here; if any creation fails, whatever was built is disposed again.
    pub fn with_catalog(config: EngineConfig, mut catalog: Catalog, renderer: R) -> OrreryResult<Self> {
        config.scale.validate()?;
        for body in catalog.iter_mut() {
            body.visual_radius = body.base_radius * config.scale.get(body.kind);
        }
        compose_world(catalog.bodies_mut());

        let mut time = TimeControl::new(config.time_scale, config.max_time_scale);
        time.set_paused(config.start_paused);

        let ctx = SimContext {
            catalog,
            handles: HandleMap::new(),
            time,
            scale: config.scale,
            selection: SelectionState::new(),
            camera: config.camera,
            focus: CameraFocus::new(config.focus_duration, config.focus_easing),
            belt: MinorBodyField::generate(&config.belt, &mut Rng::new(config.belt.seed)),
            backdrop: Backdrop::generate(&config.backdrop, &mut Rng::new(config.backdrop.seed)),
            overlay: OrbitOverlay::default(),
            viewport: config.viewport,
            pointer: PointerState::default(),
            events: Vec::new(),
            root: None,
        };

        // From here on, Drop cleans up a partially built scene.
        let mut orrery = Self {
            ctx,
            renderer,
            config,
            frames: 0,
            skipped_frames: 0,
            shut_down: false,
        };
        orrery.build_scene()?;

        log::info!(
            "orrery: {} bodies, {} minor bodies, backend {}",
            orrery.ctx.catalog.len(),
            orrery.ctx.belt.len(),
            orrery.renderer.backend()
        );
        Ok(orrery)
    }

    fn build_scene(&mut self) -> OrreryResult<()> {
        let root = self.renderer.create(&DrawableDesc::group())?;
        self.ctx.root = Some(root);

        self.ctx.backdrop.spawn(&mut self.renderer, root)?;

        for body in self.ctx.catalog.iter_mut() {
            spawn_body(body, &mut self.ctx.handles, &mut self.renderer, root)?;
        }

        let rock = DrawableDesc::new(
            Geometry::InstancedRock {
                radius: self.config.belt.rock_radius,
                count: self.ctx.belt.len() as u32,
            },
            Appearance::new(Color::hex(0x8a7f72)),
        );
        let belt = self.renderer.create(&rock)?;
        self.renderer.attach(belt, root);
        self.ctx.belt.drawable = Some(belt);

        self.ctx.overlay = OrbitOverlay::spawn(
            self.ctx.catalog.bodies(),
            &mut self.renderer,
            root,
            self.config.show_orbits,
        )?;
        Ok(())
    }

    // ── Frame loop ──────────────────────────────────────────────────────

    /// Advance by `dt` wall-clock seconds and present.
    pub fn frame(&mut self, dt: f32) {
        if self.shut_down {
            return;
        }
        // Focus timing and the integrator both run on the real wall delta.
        let wall_dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if let Some(step) = self.ctx.time.step(wall_dt) {
            let bodies = self.ctx.catalog.bodies_mut();
            advance_bodies(bodies, step);
            compose_world(bodies);
            self.ctx.belt.advance(step);
        }

        if self.ctx.focus.step(wall_dt, &mut self.ctx.camera) == FocusStep::Completed {
            log::debug!("focus transition complete");
            self.ctx.events.push(EngineEvent::FocusCompleted);
        }

        self.sync_scene();
        self.frames += 1;

        if self.ctx.viewport.is_degenerate() {
            log::trace!(
                "skipping present for {}x{} viewport",
                self.ctx.viewport.width,
                self.ctx.viewport.height
            );
            self.skipped_frames += 1;
            return;
        }
        if let Err(e) = self.renderer.present(&self.ctx.camera, self.ctx.viewport) {
            log::warn!("present failed: {}", e);
        }
    }

    /// Push world transforms and the dirty instance buffer to the backend.
    fn sync_scene(&mut self) {
        for body in self.ctx.catalog.iter() {
            if let Some(handle) = body.drawable {
                self.renderer.set_transform(handle, &body.world);
            }
            if let Some(ring) = &body.ring {
                if let Some(handle) = ring.drawable {
                    self.renderer.set_transform(handle, &ring.world);
                }
            }
        }
        if let Some(handle) = self.ctx.belt.drawable {
            if let Some(instances) = self.ctx.belt.buffer_mut().take_dirty() {
                self.renderer.upload_instances(handle, instances);
            }
        }
    }

    // ── Input ───────────────────────────────────────────────────────────

    /// Apply one input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.shut_down {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => {
                let p = Vec2::new(x, y);
                self.ctx.pointer = PointerState {
                    pressed_at: Some(p),
                    last: Some(p),
                    dragging: false,
                };
            }
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => {
                let pointer = std::mem::take(&mut self.ctx.pointer);
                self.ctx.pointer.last = Some(Vec2::new(x, y));
                if pointer.pressed_at.is_some() && !pointer.dragging {
                    self.click(Vec2::new(x, y));
                }
            }
            InputEvent::PointerLeave => {
                self.ctx.pointer = PointerState::default();
                self.set_hover(None);
            }
            InputEvent::Wheel { delta } => self.zoom(delta),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::SetTimeScale(scale) => self.set_time_scale(scale),
            InputEvent::SetPaused(paused) => self.set_paused(paused),
            InputEvent::TogglePause => {
                self.toggle_pause();
            }
            InputEvent::SetScale { kind, multiplier } => {
                if let Err(e) = self.set_scale(kind, multiplier) {
                    log::warn!("{}", e);
                }
            }
            InputEvent::SetShowOrbits(show) => self.set_show_orbits(show),
            InputEvent::ResetView => self.reset_view(),
            InputEvent::Focus(id) => {
                self.focus_body(id);
            }
        }
    }

    fn pointer_move(&mut self, p: Vec2) {
        let pointer = &mut self.ctx.pointer;
        if let Some(pressed_at) = pointer.pressed_at {
            if !pointer.dragging && pressed_at.distance(p) > self.config.drag_threshold {
                pointer.dragging = true;
            }
            if pointer.dragging {
                let delta = p - pointer.last.unwrap_or(p);
                pointer.last = Some(p);
                self.ctx.camera.orbit(delta.x, delta.y);
                self.cancel_focus();
                return;
            }
        }
        pointer.last = Some(p);
        let hit = pick(&self.renderer, &self.ctx.camera, self.ctx.viewport, p, &self.ctx.handles);
        self.set_hover(hit);
    }

    fn set_hover(&mut self, hit: Option<BodyId>) {
        let bodies = self.ctx.catalog.bodies_mut();
        if self.ctx.selection.hover(hit, bodies, &mut self.renderer) {
            self.ctx.events.push(EngineEvent::HoverChanged { body: hit });
        }
    }

    fn click(&mut self, p: Vec2) {
        let hit = pick(&self.renderer, &self.ctx.camera, self.ctx.viewport, p, &self.ctx.handles);
        let bodies = self.ctx.catalog.bodies_mut();
        if self.ctx.selection.select(hit, bodies, &mut self.renderer) {
            log::debug!("selection: {:?}", hit);
            self.ctx.events.push(EngineEvent::SelectionChanged { body: hit });
        }
        if let Some(id) = hit {
            self.focus_body(id);
        }
    }

    fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() || delta == 0.0 {
            return;
        }
        let factor = (delta * self.config.zoom_speed).exp();
        self.ctx.camera.zoom(
            factor,
            self.config.min_camera_distance,
            self.config.max_camera_distance,
        );
        self.cancel_focus();
    }

    fn cancel_focus(&mut self) {
        if self.ctx.focus.cancel() {
            log::debug!("focus transition cancelled by camera control");
        }
    }

    // ── Controls ────────────────────────────────────────────────────────

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.viewport = Viewport::new(width, height);
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.ctx.time.set_time_scale(scale);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.ctx.time.paused() != paused {
            self.ctx.time.set_paused(paused);
            self.ctx.events.push(EngineEvent::PauseChanged { paused });
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.ctx.time.toggle_pause();
        self.ctx.events.push(EngineEvent::PauseChanged { paused });
        paused
    }

    /// Change one category's size multiplier and rebuild its geometry.
    /// Returns `Ok(false)` when the multiplier is unchanged. The stored
    /// multiplier only changes once the rebuild has succeeded.
    pub fn set_scale(&mut self, kind: BodyKind, multiplier: f32) -> OrreryResult<bool> {
        if self.shut_down {
            return Ok(false);
        }
        let Some(root) = self.ctx.root else {
            return Ok(false);
        };
        let mut next = self.ctx.scale;
        if !next.set(kind, multiplier)? {
            return Ok(false);
        }
        rebuild_category(
            self.ctx.catalog.bodies_mut(),
            &mut self.ctx.handles,
            &mut self.renderer,
            root,
            kind,
            multiplier,
        )?;
        self.ctx.scale = next;
        self.ctx.events.push(EngineEvent::ScaleChanged { kind, multiplier });
        Ok(true)
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.ctx.overlay.set_visible(&mut self.renderer, show);
    }

    /// Start a focus transition toward the named body (case-insensitive).
    /// Unknown names change nothing and return `false`.
    pub fn request_focus(&mut self, name: &str) -> bool {
        if self.shut_down {
            return false;
        }
        match self.ctx.catalog.find_by_name(name).map(|b| b.id) {
            Some(id) => self.focus_body(id),
            None => {
                log::debug!("focus request for unknown body {:?}", name);
                false
            }
        }
    }

    fn focus_body(&mut self, id: BodyId) -> bool {
        let Some(body) = self.ctx.catalog.get(id) else {
            return false;
        };
        let look_at = body.position();
        let position = look_at
            + self.config.focus_offset_direction() * self.config.focus_distance(body.visual_radius);
        log::debug!("focusing {}", body.name);
        self.ctx.focus.request(&self.ctx.camera, position, look_at);
        true
    }

    /// Restore the configured camera and drop any focus transition.
    pub fn reset_view(&mut self) {
        self.ctx.focus.cancel();
        self.ctx.camera = self.config.camera;
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn time_scale(&self) -> f32 {
        self.ctx.time.time_scale()
    }

    pub fn paused(&self) -> bool {
        self.ctx.time.paused()
    }

    pub fn scale_config(&self) -> ScaleConfig {
        self.ctx.scale
    }

    pub fn show_orbits(&self) -> bool {
        self.ctx.overlay.visible()
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.ctx.selection.selected()
    }

    pub fn hovered(&self) -> Option<BodyId> {
        self.ctx.selection.hovered()
    }

    /// Info-panel data for the selected body.
    pub fn selected_info(&self) -> Option<&BodyInfo> {
        let id = self.ctx.selection.selected()?;
        self.ctx.catalog.get(id).map(|b| &b.info)
    }

    /// Names for the quick-select menu, in catalog order.
    pub fn focusable_names(&self) -> Vec<String> {
        self.ctx.catalog.names()
    }

    pub fn cursor(&self) -> Cursor {
        self.ctx.selection.cursor()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.ctx.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.ctx.catalog.get(id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.ctx.catalog
    }

    pub fn minor_bodies(&self) -> &MinorBodyField {
        &self.ctx.belt
    }

    pub fn focus(&self) -> &CameraFocus {
        &self.ctx.focus
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Events queued since the last call.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Frames whose presentation was skipped for a degenerate viewport.
    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    // ── Teardown ────────────────────────────────────────────────────────

    /// Dispose every drawable exactly once. Safe to call repeatedly; later
    /// `frame` and `handle_input` calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.ctx.focus.cancel();
        self.ctx.selection.reset();
        self.ctx.pointer = PointerState::default();

        for body in self.ctx.catalog.iter_mut() {
            despawn_body(body, &mut self.ctx.handles, &mut self.renderer);
        }
        if let Some(handle) = self.ctx.belt.drawable.take() {
            self.renderer.dispose(handle);
        }
        self.ctx.backdrop.dispose(&mut self.renderer);
        self.ctx.overlay.dispose(&mut self.renderer);
        if let Some(root) = self.ctx.root.take() {
            self.renderer.dispose(root);
        }
        self.ctx.handles.clear();
        log::info!("orrery: shut down after {} frames", self.frames);
    }
}

impl<R: RenderBackend> Drop for Orrery<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Highlight;
    use crate::catalog::solar_system::{EARTH, JUPITER, MERCURY, SATURN, VENUS};
    use crate::error::OrreryError;
    use crate::renderer::headless::HeadlessRenderer;
    use glam::Vec3;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn engine() -> Orrery<HeadlessRenderer> {
        Orrery::new(EngineConfig::default(), HeadlessRenderer::new()).unwrap()
    }

    fn top_down(o: &mut Orrery<HeadlessRenderer>) {
        o.context_mut().camera = CameraRig::new(Vec3::new(0.0, 700.0, 250.0), Vec3::ZERO);
    }

    fn pixel_of(o: &Orrery<HeadlessRenderer>, id: u32) -> Vec2 {
        let pos = o.body(BodyId(id)).unwrap().position();
        o.camera().project(pos, o.viewport()).unwrap()
    }

    fn click(o: &mut Orrery<HeadlessRenderer>, p: Vec2) {
        o.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
        o.handle_input(InputEvent::PointerUp { x: p.x, y: p.y });
    }

    fn focus_target(o: &Orrery<HeadlessRenderer>, id: u32) -> (Vec3, Vec3) {
        let body = o.body(BodyId(id)).unwrap();
        let look = body.position();
        let pos = look + o.config().focus_offset_direction() * o.config().focus_distance(body.visual_radius);
        (pos, look)
    }

    #[test]
    fn earth_advances_one_second() {
        let mut o = engine();
        o.context_mut().catalog.get_mut(BodyId(EARTH)).unwrap().orbit.angle = FRAC_PI_2;
        o.frame(1.0);
        let earth = o.body(BodyId(EARTH)).unwrap();
        assert!((earth.orbit.angle - 1.580796).abs() < 1e-5);
        assert!((earth.position().x - -1.0).abs() < 1e-3);
        assert!((earth.position().z - 99.995).abs() < 1e-3);
        assert_eq!(earth.position().y, 0.0);
    }

    #[test]
    fn pause_freezes_every_angle_and_position() {
        let mut o = engine();
        o.frame(0.3);
        o.set_paused(true);
        let before: Vec<_> = o.catalog().iter().map(|b| (b.orbit.angle, b.spin, b.position())).collect();
        let belt_before = o.minor_bodies().bodies().to_vec();
        let presented = o.renderer().frames_presented();
        o.frame(5.0);
        let after: Vec<_> = o.catalog().iter().map(|b| (b.orbit.angle, b.spin, b.position())).collect();
        assert_eq!(before, after);
        assert_eq!(belt_before, o.minor_bodies().bodies());
        assert_eq!(o.renderer().frames_presented(), presented + 1);
    }

    #[test]
    fn clicking_mercury_then_venus_leaves_only_venus() {
        let mut o = engine();
        top_down(&mut o);
        o.context_mut().catalog.get_mut(BodyId(MERCURY)).unwrap().orbit.angle = 0.0;
        o.context_mut().catalog.get_mut(BodyId(VENUS)).unwrap().orbit.angle = PI;
        // A zero step recomposes world positions without moving anything.
        o.frame(0.0);

        let mercury = pixel_of(&o, MERCURY);
        click(&mut o, mercury);
        assert_eq!(o.selected(), Some(BodyId(MERCURY)));
        assert_eq!(o.selected_info().unwrap().name, "Mercury");

        let venus = pixel_of(&o, VENUS);
        click(&mut o, venus);
        assert_eq!(o.selected(), Some(BodyId(VENUS)));
        let selected: Vec<_> = o.catalog().iter().filter(|b| b.highlight == Highlight::Selected).map(|b| b.id).collect();
        assert_eq!(selected, vec![BodyId(VENUS)]);
        let mercury_body = o.body(BodyId(MERCURY)).unwrap();
        assert_eq!(mercury_body.highlight, Highlight::None);
        let node = o.renderer().node(mercury_body.drawable.unwrap()).unwrap();
        assert_eq!(node.highlight, Highlight::None);
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let mut o = engine();
        top_down(&mut o);
        o.frame(0.0);
        let sun = pixel_of(&o, 0);
        click(&mut o, sun);
        assert_eq!(o.selected(), Some(BodyId(0)));
        o.take_events();
        click(&mut o, Vec2::new(2.0, 2.0));
        assert_eq!(o.selected(), None);
        assert!(o.selected_info().is_none());
        assert_eq!(o.take_events(), vec![EngineEvent::SelectionChanged { body: None }]);
    }

    #[test]
    fn hover_sets_pointer_cursor() {
        let mut o = engine();
        top_down(&mut o);
        o.frame(0.0);
        let sun = pixel_of(&o, 0);
        o.handle_input(InputEvent::PointerMove { x: sun.x, y: sun.y });
        assert_eq!(o.hovered(), Some(BodyId(0)));
        assert_eq!(o.cursor(), Cursor::Pointer);
        assert_eq!(o.body(BodyId(0)).unwrap().highlight, Highlight::Hover);
        o.handle_input(InputEvent::PointerMove { x: 2.0, y: 2.0 });
        assert_eq!(o.hovered(), None);
        assert_eq!(o.cursor(), Cursor::Default);
        assert_eq!(o.body(BodyId(0)).unwrap().highlight, Highlight::None);
    }

    #[test]
    fn planet_scale_doubles_radius_only() {
        let mut o = engine();
        let orbit_before = o.body(BodyId(EARTH)).unwrap().orbit;
        let moon_radius = o.body(BodyId(9)).unwrap().visual_radius;
        assert_eq!(o.body(BodyId(EARTH)).unwrap().visual_radius, 4.0);
        assert!(o.set_scale(BodyKind::Planet, 8.0).unwrap());
        let earth = o.body(BodyId(EARTH)).unwrap();
        assert_eq!(earth.visual_radius, 8.0);
        assert_eq!(earth.orbit.radius, 100.0);
        assert_eq!(earth.orbit.angle.to_bits(), orbit_before.angle.to_bits());
        assert_eq!(earth.orbit.angular_speed.to_bits(), orbit_before.angular_speed.to_bits());
        assert_eq!(o.body(BodyId(9)).unwrap().visual_radius, moon_radius);
        assert!(!o.set_scale(BodyKind::Planet, 8.0).unwrap());
        assert!(o.set_scale(BodyKind::Planet, -1.0).is_err());
        assert_eq!(o.scale_config().planet, 8.0);
    }

    #[test]
    fn focus_on_jupiter_completes_at_duration() {
        let mut o = engine();
        o.set_paused(true);
        let start = o.camera().position;
        assert!(o.request_focus("Jupiter"));
        let (target, look) = focus_target(&o, JUPITER);

        o.frame(0.75);
        let mid = o.camera().position;
        let full = start.distance(target);
        assert!(start.distance(mid) > 0.0 && start.distance(mid) < full);
        assert!((mid - (start + target) * 0.5).length() < 1e-2);

        o.frame(0.75);
        assert!((o.camera().position - target).length() < 1e-3);
        assert!((o.camera().look_at - look).length() < 1e-3);
        assert!(o.take_events().contains(&EngineEvent::FocusCompleted));
        assert!(!o.focus().is_active());
    }

    #[test]
    fn focus_runs_on_wall_time_regardless_of_time_scale() {
        let mut o = engine();
        o.set_time_scale(0.0);
        o.request_focus("Mars");
        o.frame(0.75);
        o.frame(0.75);
        assert!(!o.focus().is_active());
    }

    #[test]
    fn second_focus_redirects_mid_transition() {
        let mut o = engine();
        o.set_paused(true);
        o.request_focus("Jupiter");
        let (jupiter, _) = focus_target(&o, JUPITER);
        o.frame(0.75);
        assert!(o.request_focus("saturn"));
        let (saturn, _) = focus_target(&o, SATURN);
        for _ in 0..20 {
            o.frame(0.1);
            assert!((o.camera().position - jupiter).length() > 1.0);
        }
        assert!((o.camera().position - saturn).length() < 1e-3);
    }

    #[test]
    fn unknown_focus_name_changes_nothing() {
        let mut o = engine();
        let camera = *o.camera();
        assert!(!o.request_focus("Vulcan"));
        o.frame(0.5);
        assert!(!o.focus().is_active());
        assert_eq!(o.camera().look_at, camera.look_at);
    }

    #[test]
    fn drag_orbits_camera_and_cancels_focus() {
        let mut o = engine();
        o.request_focus("Earth");
        o.frame(0.1);
        let before = *o.camera();
        o.handle_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
        o.handle_input(InputEvent::PointerMove { x: 160.0, y: 100.0 });
        o.handle_input(InputEvent::PointerUp { x: 160.0, y: 100.0 });
        assert!(!o.focus().is_active());
        assert_ne!(o.camera().position, before.position);
        assert!((o.camera().distance() - before.distance()).abs() < 1e-2);
        assert_eq!(o.selected(), None);
    }

    #[test]
    fn wheel_zooms_within_limits() {
        let mut o = engine();
        o.handle_input(InputEvent::Wheel { delta: -1e4 });
        assert!((o.camera().distance() - o.config().min_camera_distance).abs() < 1e-2);
        o.handle_input(InputEvent::Wheel { delta: 1e4 });
        assert!((o.camera().distance() - o.config().max_camera_distance).abs() < 1e-1);
        o.handle_input(InputEvent::ResetView);
        assert_eq!(*o.camera(), o.config().camera);
    }

    #[test]
    fn degenerate_viewport_skips_present_only() {
        let mut o = engine();
        o.handle_input(InputEvent::Resize { width: 0.0, height: 480.0 });
        let angle = o.body(BodyId(EARTH)).unwrap().orbit.angle;
        o.frame(0.5);
        assert_eq!(o.renderer().frames_presented(), 0);
        assert_eq!(o.skipped_frames(), 1);
        assert_ne!(o.body(BodyId(EARTH)).unwrap().orbit.angle, angle);
        o.handle_input(InputEvent::Resize { width: 640.0, height: 480.0 });
        o.frame(0.5);
        assert_eq!(o.renderer().frames_presented(), 1);
    }

    #[test]
    fn belt_count_is_invariant() {
        let mut o = engine();
        for (i, scale) in [1.0, 0.0, 50.0, -4.0, 100.0].into_iter().enumerate() {
            o.set_time_scale(scale);
            o.set_paused(i % 2 == 1);
            o.frame(0.4);
            assert_eq!(o.minor_bodies().len(), 800);
        }
        let belt = o.minor_bodies().drawable.unwrap();
        assert_eq!(o.renderer().node(belt).unwrap().instances.len(), 800);
    }

    #[test]
    fn belt_uploads_once_per_unpaused_frame() {
        let mut o = engine();
        o.frame(0.1);
        assert_eq!(o.renderer().instance_uploads(), 1);
        o.frame(0.1);
        assert_eq!(o.renderer().instance_uploads(), 2);
        o.set_paused(true);
        o.frame(0.1);
        assert_eq!(o.renderer().instance_uploads(), 2);
    }

    #[test]
    fn time_scale_is_clamped() {
        let mut o = engine();
        o.handle_input(InputEvent::SetTimeScale(-2.0));
        assert_eq!(o.time_scale(), 0.0);
        o.handle_input(InputEvent::SetTimeScale(1e9));
        assert_eq!(o.time_scale(), o.config().max_time_scale);
    }

    #[test]
    fn pause_events() {
        let mut o = engine();
        o.handle_input(InputEvent::TogglePause);
        o.handle_input(InputEvent::SetPaused(true));
        o.handle_input(InputEvent::SetPaused(false));
        assert!(!o.paused());
        assert_eq!(
            o.take_events(),
            vec![
                EngineEvent::PauseChanged { paused: true },
                EngineEvent::PauseChanged { paused: false },
            ]
        );
    }

    #[test]
    fn orbit_toggle() {
        let mut o = engine();
        assert!(o.show_orbits());
        o.handle_input(InputEvent::SetShowOrbits(false));
        assert!(!o.show_orbits());
        let (_, path) = o.context().overlay.paths()[0];
        assert!(!o.renderer().node(path).unwrap().visible);
    }

    #[test]
    fn focusable_names_start_with_sun() {
        let o = engine();
        let names = o.focusable_names();
        assert_eq!(names[0], "Sun");
        assert!(names.iter().any(|n| n == "Triton"));
    }

    #[test]
    fn shutdown_disposes_everything_once() {
        let mut o = engine();
        o.set_scale(BodyKind::Planet, 6.0).unwrap();
        o.set_scale(BodyKind::Moon, 2.0).unwrap();
        o.frame(0.2);
        o.shutdown();
        o.shutdown();
        let r = o.renderer();
        assert_eq!(r.created_count(), r.disposed_count());
        assert_eq!(r.live_count(), 0);
        assert_eq!(r.invalid_disposals(), 0);

        let frames = r.frames_presented();
        o.frame(0.2);
        o.handle_input(InputEvent::TogglePause);
        assert_eq!(o.renderer().frames_presented(), frames);
        assert!(!o.paused());
        assert!(!o.request_focus("Earth"));
    }

    #[test]
    fn invalid_initial_scale_is_rejected() {
        let config = EngineConfig {
            scale: ScaleConfig { star: 0.0, ..Default::default() },
            ..Default::default()
        };
        let err = Orrery::new(config, HeadlessRenderer::new()).err().unwrap();
        assert!(matches!(err, OrreryError::InvalidMultiplier { kind: BodyKind::Star, .. }));
    }

    #[test]
    fn failed_construction_releases_partial_scene() {
        let mut full = HeadlessRenderer::new();
        drop(Orrery::new(EngineConfig::default(), &mut full).unwrap());
        let total = full.created_count();
        assert!(total > 20);

        for budget in 0..total {
            let mut renderer = HeadlessRenderer::new();
            renderer.fail_creates_after(budget);
            assert!(Orrery::new(EngineConfig::default(), &mut renderer).is_err());
            assert_eq!(renderer.created_count(), budget);
            assert_eq!(renderer.disposed_count(), budget, "leak after {} creates", budget);
            assert_eq!(renderer.live_count(), 0);
            assert_eq!(renderer.invalid_disposals(), 0);
        }
    }

    #[test]
    fn long_frame_completes_focus_on_wall_time() {
        let mut o = engine();
        o.set_paused(true);
        o.request_focus("Jupiter");
        let (target, _) = focus_target(&o, JUPITER);
        o.frame(1.5);
        assert!(!o.focus().is_active());
        assert!((o.camera().position - target).length() < 1e-3);
    }

    #[test]
    fn long_frame_advances_by_the_full_delta() {
        let mut o = engine();
        o.context_mut().catalog.get_mut(BodyId(EARTH)).unwrap().orbit.angle = FRAC_PI_2;
        o.frame(5.0);
        let angle = o.body(BodyId(EARTH)).unwrap().orbit.angle;
        assert!((angle - (FRAC_PI_2 + 0.05)).abs() < 1e-5);
    }

    #[test]
    fn negative_or_invalid_delta_is_a_zero_step() {
        let mut o = engine();
        let angle = o.body(BodyId(EARTH)).unwrap().orbit.angle;
        o.frame(-3.0);
        o.frame(f32::NAN);
        assert_eq!(o.body(BodyId(EARTH)).unwrap().orbit.angle, angle);
    }

    #[test]
    fn failed_rebuild_keeps_scale_and_geometry_in_step() {
        let mut o = engine();
        o.renderer_mut().fail_creates_after(3);
        assert!(o.set_scale(BodyKind::Planet, 8.0).is_err());
        let earth = o.body(BodyId(EARTH)).unwrap();
        assert_eq!(o.scale_config().planet, 4.0);
        assert_eq!(earth.visual_radius, o.scale_config().planet * earth.base_radius);
        assert!(o.take_events().is_empty());

        o.renderer_mut().set_fail_creates(false);
        assert!(o.set_scale(BodyKind::Planet, 8.0).unwrap());
        let earth = o.body(BodyId(EARTH)).unwrap();
        assert_eq!(o.scale_config().planet, 8.0);
        assert_eq!(earth.visual_radius, o.scale_config().planet * earth.base_radius);
        let r = o.renderer();
        assert_eq!(r.created_count() - r.disposed_count(), r.live_count());
    }

    #[test]
    fn queued_focus_event_starts_a_transition() {
        let mut o = engine();
        o.handle_input(InputEvent::Focus(BodyId(JUPITER)));
        assert!(o.focus().is_active());
        o.handle_input(InputEvent::Focus(BodyId(999)));
        let (target, _) = focus_target(&o, JUPITER);
        o.frame(1.5);
        assert!((o.camera().position - target).length() < 1e-3);
    }
}
