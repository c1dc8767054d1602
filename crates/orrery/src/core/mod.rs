pub mod handles;
pub mod rng;
pub mod time;
