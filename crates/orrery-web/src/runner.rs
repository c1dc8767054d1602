use orrery::{EngineConfig, EngineEvent, InputEvent, InputQueue, Orrery, OrreryResult, RenderBackend};

/// Wires the engine to the browser's frame callback.
///
/// Browser events land in an `InputQueue` as they arrive and are applied in
/// order right before each frame, so a click is fully resolved before the
/// frame that renders it. Generic over the backend so it can be driven
/// headless in tests.
pub struct EngineRunner<R: RenderBackend> {
    engine: Orrery<R>,
    input: InputQueue,
    /// Events from the last tick, kept until the host reads them.
    events: Vec<EngineEvent>,
}

impl<R: RenderBackend> EngineRunner<R> {
    pub fn new(config: EngineConfig, renderer: R) -> OrreryResult<Self> {
        Ok(Self {
            engine: Orrery::new(config, renderer)?,
            input: InputQueue::new(),
            events: Vec::new(),
        })
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input, then run one frame.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.engine.handle_input(event);
        }
        self.engine.frame(dt);
        self.events.extend(self.engine.take_events());
    }

    /// Events since the last call, as a JSON array.
    pub fn take_events_json(&mut self) -> String {
        let events = std::mem::take(&mut self.events);
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("event serialization failed: {}", e);
            "[]".into()
        })
    }

    /// Queue a focus transition toward the named body (case-insensitive).
    /// The name is resolved now so the host learns at once whether it is
    /// known; unknown names queue nothing and return `false`.
    pub fn queue_focus(&mut self, name: &str) -> bool {
        match self.engine.catalog().find_by_name(name) {
            Some(body) => {
                self.input.push(InputEvent::Focus(body.id));
                true
            }
            None => {
                log::debug!("focus request for unknown body {:?}", name);
                false
            }
        }
    }

    pub fn selected_info_json(&self) -> Option<String> {
        let info = self.engine.selected_info()?;
        serde_json::to_string(info).ok()
    }

    pub fn focusable_names_json(&self) -> String {
        serde_json::to_string(&self.engine.focusable_names()).unwrap_or_else(|_| "[]".into())
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn engine(&self) -> &Orrery<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Orrery<R> {
        &mut self.engine
    }

    /// Drop queued input and dispose every drawable.
    pub fn shutdown(&mut self) {
        self.input.drain();
        self.engine.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery::{BodyKind, HeadlessRenderer};

    fn runner() -> EngineRunner<HeadlessRenderer> {
        EngineRunner::new(EngineConfig::default(), HeadlessRenderer::new()).unwrap()
    }

    #[test]
    fn input_is_applied_before_the_frame() {
        let mut r = runner();
        r.push_input(InputEvent::SetPaused(true));
        let angle = r.engine().catalog().bodies()[3].orbit.angle;
        assert_eq!(r.pending_input(), 1);
        r.tick(0.5);
        assert_eq!(r.pending_input(), 0);
        assert_eq!(r.engine().catalog().bodies()[3].orbit.angle, angle);
    }

    #[test]
    fn events_are_reported_as_json() {
        let mut r = runner();
        r.push_input(InputEvent::TogglePause);
        r.push_input(InputEvent::SetScale { kind: BodyKind::Moon, multiplier: 2.0 });
        r.tick(0.016);
        let json = r.take_events_json();
        assert!(json.contains(r#""type":"pause_changed""#));
        assert!(json.contains(r#""type":"scale_changed""#));
        assert_eq!(r.take_events_json(), "[]");
    }

    #[test]
    fn focus_is_queued_until_the_next_tick() {
        let mut r = runner();
        assert!(!r.queue_focus("Vulcan"));
        assert_eq!(r.pending_input(), 0);
        assert!(r.queue_focus("jupiter"));
        assert_eq!(r.pending_input(), 1);
        assert!(!r.engine().focus().is_active());
        r.tick(0.1);
        assert!(r.engine().focus().is_active());
    }

    #[test]
    fn names_and_info_json() {
        let r = runner();
        assert!(r.focusable_names_json().starts_with(r#"["Sun","Mercury""#));
        assert!(r.selected_info_json().is_none());
    }

    #[test]
    fn shutdown_releases_all_drawables() {
        let mut r = runner();
        r.tick(0.016);
        r.shutdown();
        let renderer = r.engine().renderer();
        assert_eq!(renderer.created_count(), renderer.disposed_count());
    }
}
