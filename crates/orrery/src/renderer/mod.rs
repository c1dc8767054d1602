pub mod camera;
pub mod headless;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{CameraRig, Ray, Viewport};
pub use headless::{HeadlessNode, HeadlessRenderer};
pub use instance::{InstanceBuffer, InstanceTransform};
pub use traits::{RayHit, RenderBackend};
