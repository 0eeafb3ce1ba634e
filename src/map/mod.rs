mod plugin;
mod renderer;

pub use plugin::*;
pub use renderer::*;
