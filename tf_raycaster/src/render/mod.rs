mod compositor;
mod render_loop;
mod render_options;
mod renderer;

pub use compositor::{step_size, Compositor, RayResult};
pub use render_loop::{FrameStats, RenderLoop};
pub use render_options::{OpacitySource, RenderOptions, RenderOptionsBuilder, DEFAULT_MAX_STEPS};
pub use renderer::{PassStats, Renderer, PIXEL_BYTES};
