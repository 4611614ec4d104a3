//! Module with helper functions
//! Saves repetition in unit and integration tests

use nalgebra::{point, vector};

use crate::{
    camera::CameraParams,
    color::RGBA,
    common::ValueRange,
    premade::{transfer_functions, volumes},
    transfer_function::TransferFunction,
    volumetric::Volume,
};

/// Cube `<-1;1>^3` with every sample equal to `value`.
pub fn uniform_volume(side: usize, value: f32) -> Volume {
    volumes::solid_volume(side, value).unwrap()
}

/// Cone density sphere of radius 0.5 around the origin.
pub fn sphere_volume(side: usize) -> Volume {
    volumes::sphere_volume(side).unwrap()
}

/// Single entry table over `<0;2>`, opacity calibrated for unit steps.
pub fn constant_tf(rgba: RGBA, alpha_near_1: f32) -> TransferFunction {
    transfer_functions::constant_tf(ValueRange::new(0.0, 2.0), rgba, 1.0, alpha_near_1).unwrap()
}

/// Gray ramp of 8 entries over `<0;1>`, values below 0.125 are transparent.
pub fn ramp_tf() -> TransferFunction {
    transfer_functions::grayscale_tf(ValueRange::new(0.0, 1.0), 8, 1.0).unwrap()
}

/// Perspective camera on the -z axis looking at the origin, y axis points down the image.
///
/// Clip planes enclose the unit cube, rays through the image corners stay outside of the radius 0.5 sphere.
pub fn looking_at_cube(width: usize, height: usize) -> CameraParams {
    CameraParams {
        eye: point![0.0, 0.0, -5.0],
        look_at: point![0.0, 0.0, 0.0],
        up: vector![0.0, -1.0, 0.0],
        near_clip: -4.0,
        far_clip: 4.0,
        fov: 20.0,
        width,
        height,
        orthographic: false,
    }
}
