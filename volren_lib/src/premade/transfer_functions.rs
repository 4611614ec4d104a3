use crate::{
    color::{self, RGBA},
    common::ValueRange,
    error::RenderError,
    transfer_function::TransferFunction,
};

/// Every value maps to `rgba`.
pub fn constant_tf(
    range: ValueRange,
    rgba: RGBA,
    unit_step: f32,
    alpha_near_1: f32,
) -> Result<TransferFunction, RenderError> {
    TransferFunction::from_colors(range, vec![rgba], unit_step, alpha_near_1)
}

/// Gray ramp, both intensity and opacity grow with the value.
/// The first entry is fully transparent.
pub fn grayscale_tf(
    range: ValueRange,
    length: usize,
    unit_step: f32,
) -> Result<TransferFunction, RenderError> {
    let last = usize::max(length, 2) - 1;
    let lut = (0..length)
        .map(|i| {
            let v = i as f32 / last as f32;
            color::mono(v, v)
        })
        .collect();
    TransferFunction::from_colors(range, lut, unit_step, 1.0)
}

// R G B A -- A <0;1>
/// Colored bands over `<0;1>`, transparent below 0.2.
pub fn bands_tf(unit_step: f32, alpha_near_1: f32) -> Result<TransferFunction, RenderError> {
    let lut = vec![
        color::zero(),
        color::new(0.8, 0.1, 0.1, 0.05),
        color::new(0.9, 0.6, 0.1, 0.1),
        color::new(0.9, 0.9, 0.8, 0.3),
        color::new(1.0, 1.0, 1.0, 0.8),
    ];
    TransferFunction::from_colors(ValueRange::new(0.0, 1.0), lut, unit_step, alpha_near_1)
}
