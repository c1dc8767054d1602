pub mod api;
pub mod catalog;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::engine::{Orrery, SimContext};
pub use api::types::{BodyId, BodyKind, Cursor, DrawableHandle, EngineEvent, Highlight};
pub use catalog::Catalog;
pub use components::body::{BodyInfo, CelestialBody, OrbitState, RingAttachment, Transform};
pub use components::mesh::{Appearance, Color, DrawableDesc, Geometry};
pub use core::handles::HandleMap;
pub use core::time::TimeControl;
pub use error::{CatalogError, OrreryError, OrreryResult, RenderError};
pub use extensions::{CameraFocus, Easing, FocusTransition};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraRig, Ray, Viewport};
pub use renderer::headless::HeadlessRenderer;
pub use renderer::instance::{InstanceBuffer, InstanceTransform};
pub use renderer::traits::{RayHit, RenderBackend};
pub use systems::instancer::{BeltSettings, MinorBody, MinorBodyField};
pub use systems::scale::ScaleConfig;
pub use systems::selection::SelectionState;
