use serde::{Deserialize, Serialize};

/// Stable identifier of a body in the catalog. Doubles as its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle to a drawable node owned by the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableHandle(pub u32);

/// Body category. Also selects which scale multiplier applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    pub const ALL: [BodyKind; 3] = [BodyKind::Star, BodyKind::Planet, BodyKind::Moon];

    /// Map a UI category code (0 = star, 1 = planet, 2 = moon).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(BodyKind::Star),
            1 => Some(BodyKind::Planet),
            2 => Some(BodyKind::Moon),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
        }
    }
}

/// Visual emphasis applied to a body's drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    #[default]
    None,
    Hover,
    Selected,
}

/// Pointer appearance the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Notification queued for the host UI. The host drains the queue after each frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    SelectionChanged { body: Option<BodyId> },
    HoverChanged { body: Option<BodyId> },
    FocusCompleted,
    ScaleChanged { kind: BodyKind, multiplier: f32 },
    PauseChanged { paused: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip_labels() {
        assert_eq!(BodyKind::from_code(1), Some(BodyKind::Planet));
        assert_eq!(BodyKind::from_code(7), None);
        assert_eq!(BodyKind::Moon.label(), "moon");
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&EngineEvent::PauseChanged { paused: true }).unwrap();
        assert_eq!(json, r#"{"type":"pause_changed","paused":true}"#);
    }
}
