mod blend;
mod context;
mod image;
mod ray;
mod render_options;
mod renderer;

pub use blend::{BlendMode, Blender};
pub use context::RenderContext;
pub use image::Image;
pub use ray::Ray;
pub use render_options::{RenderOptions, RenderOptionsBuilder, RenderType};
pub use renderer::Renderer;
