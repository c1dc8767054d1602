pub mod backdrop;
pub mod compose;
pub mod instancer;
pub mod orbit;
pub mod overlay;
pub mod scale;
pub mod selection;
