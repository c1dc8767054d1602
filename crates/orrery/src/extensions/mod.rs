// extensions/mod.rs
//
// Camera animation helpers. Decoupled from the catalog and the render
// backend: they operate on a `CameraRig` and plain vectors only.

pub mod easing;
pub mod focus;

pub use easing::{ease, ease_vec3, lerp, lerp_vec3, Easing};
pub use focus::{CameraFocus, FocusStep, FocusTransition};
