mod fetch;
mod meteorites;
mod worker;
mod world;

pub use fetch::*;
pub use meteorites::*;
pub use worker::*;
pub use world::*;
