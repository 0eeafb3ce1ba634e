mod meteorite_types;
mod world_types;

pub use meteorite_types::*;
pub use world_types::*;
