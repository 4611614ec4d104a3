use std::sync::Arc;

use nalgebra::vector;

use crate::{
    camera::{Camera, CameraParams},
    color,
    common::ValueRange,
    error::RenderError,
    kernel::Kernel,
    lighting::{DirectionalLight, Lighting},
    render::{RenderContext, RenderOptions},
};

use super::{
    transfer_functions::{bands_tf, constant_tf},
    volumes::sphere_volume,
};

/// Default coefficients with one white light shining from the eye.
pub fn headlight(camera: &Camera) -> Result<Lighting, RenderError> {
    // View space points forward, the light points back towards the eye
    let light = DirectionalLight::from_view_space(
        vector![1.0, 1.0, 1.0],
        vector![0.0, 0.0, -1.0],
        camera,
    )?;
    Ok(Lighting {
        lights: vec![light],
        ..Default::default()
    })
}

/// Lit sphere seen by the default camera.
pub fn sphere_scene(
    side: usize,
    kernel: Kernel,
    camera: CameraParams,
    options: RenderOptions,
) -> Result<RenderContext, RenderError> {
    let volume = Arc::new(sphere_volume(side)?);
    let camera = Camera::new(camera)?;
    let lighting = headlight(&camera)?;
    let tf = bands_tf(0.03, 0.99)?;

    RenderContext::new(volume, kernel, camera, tf, lighting, options)
}

/// Sphere scene lit from a fixed HSV colored light, with an iso-surface at the sphere's half density.
pub fn iso_sphere_scene(
    side: usize,
    kernel: Kernel,
    options: RenderOptions,
) -> Result<RenderContext, RenderError> {
    let volume = Arc::new(sphere_volume(side)?);
    let camera = Camera::new(CameraParams::default())?;

    let warm = color::hsv_to_rgb(vector![0.1, 0.4, 1.0]);
    let mut lighting = Lighting::from_arrays(warm.as_slice(), &[1.0, 1.0, 1.0])?;
    lighting.lights.push(DirectionalLight::from_view_space(
        vector![0.5, 0.5, 0.5],
        vector![0.0, 0.0, -1.0],
        &camera,
    )?);

    let range = ValueRange::new(0.0, 1.0);
    let tf = constant_tf(range, color::new(0.9, 0.9, 0.9, 1.0), 0.03, 0.99)?
        .with_iso_surfaces(&[0.5, 1.0, 1.0])?;

    RenderContext::new(volume, kernel, camera, tf, lighting, options)
}
