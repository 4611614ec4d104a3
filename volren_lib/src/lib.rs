//! CPU volume renderer.
//!
//! Casts one ray per pixel through a scalar volume, resamples the field with a
//! reconstruction kernel, classifies samples with a transfer function, shades them
//! and composites the result. Scanlines are distributed over worker threads or tasks.

pub mod camera;
pub mod color;
pub mod common;
pub mod error;
pub mod kernel;
pub mod lighting;
pub mod premade;
pub mod render;
pub mod test_helpers;
pub mod transfer_function;
pub mod volumetric;

pub use error::RenderError;

use std::sync::Arc;

use camera::{Camera, CameraParams};
use kernel::Kernel;
use lighting::Lighting;
use render::{Image, RenderContext, RenderOptions, Renderer};
use transfer_function::TransferFunction;
use volumetric::Volume;

/// Validate inputs and render one frame.
pub fn render_frame(
    volume: Arc<Volume>,
    kernel: Kernel,
    camera: CameraParams,
    tf: TransferFunction,
    lighting: Lighting,
    options: RenderOptions,
) -> Result<Image, RenderError> {
    let camera = Camera::new(camera)?;
    let ctx = RenderContext::new(volume, kernel, camera, tf, lighting, options)?;
    Renderer::new(ctx).render()
}
