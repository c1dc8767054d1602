use crate::api::types::{BodyId, BodyKind};

/// Input event types the engine understands.
/// Pointer coordinates are viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y). Hover is recomputed; drags orbit the camera.
    PointerMove { x: f32, y: f32 },
    /// A press ended at (x, y). Counts as a click unless the pointer was dragged.
    PointerUp { x: f32, y: f32 },
    /// The pointer left the canvas.
    PointerLeave,
    /// Mouse wheel. Positive delta zooms out.
    Wheel { delta: f32 },
    /// The drawing surface changed size.
    Resize { width: f32, height: f32 },
    SetTimeScale(f32),
    SetPaused(bool),
    TogglePause,
    /// Change the visual size multiplier of one body category.
    SetScale { kind: BodyKind, multiplier: f32 },
    SetShowOrbits(bool),
    /// Restore the initial camera and drop any focus transition.
    ResetView,
    /// Start a focus transition toward a body. Unknown ids are ignored.
    Focus(BodyId),
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them right
/// before each frame so input always lands at a fixed point in the tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
