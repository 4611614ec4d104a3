//! Classification of samples into color and opacity.

use nalgebra::vector;

use crate::{
    color::{self, RGBA},
    common::ValueRange,
    error::RenderError,
};

/// One semi-transparent iso-surface of the opacity boost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoSurface {
    pub value: f32,
    /// Width of the opacity falloff, in units of the gradient magnitude
    pub radius: f32,
    pub max_opacity: f32,
}

impl IsoSurface {
    /// Opacity of this surface at a sample.
    fn opacity(&self, value: f32, gradient_magnitude: f32) -> f32 {
        let opacity = if gradient_magnitude != 0.0 {
            let distance = ((value - self.value) / gradient_magnitude).abs();
            f32::max(0.0, 1.0 - distance / self.radius)
        } else if value == self.value {
            1.0
        } else {
            0.0
        };
        opacity * self.max_opacity
    }
}

/// Lookup table from scalar value to RGBA.
///
/// The table splits `range` into equally wide bins, see [`ValueRange::quantize`].
/// Opacities are calibrated for samples `unit_step` apart.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    range: ValueRange,
    lut: Vec<RGBA>,
    unit_step: f32,
    alpha_near_1: f32,
    iso_surfaces: Option<Vec<IsoSurface>>,
}

impl TransferFunction {
    /// Table of `length` entries from flat `rgba` values (`length * 4` floats in `<0;1>`).
    pub fn new(
        range: ValueRange,
        length: usize,
        rgba: &[f32],
        unit_step: f32,
        alpha_near_1: f32,
    ) -> Result<TransferFunction, RenderError> {
        if length == 0 {
            return Err(RenderError::EmptyLut);
        }
        if rgba.len() != length * 4 {
            return Err(RenderError::LutLength {
                expected: length * 4,
                actual: rgba.len(),
            });
        }
        let lut = rgba
            .chunks_exact(4)
            .map(|c| color::new(c[0], c[1], c[2], c[3]))
            .collect();
        TransferFunction::from_colors(range, lut, unit_step, alpha_near_1)
    }

    pub fn from_colors(
        range: ValueRange,
        lut: Vec<RGBA>,
        unit_step: f32,
        alpha_near_1: f32,
    ) -> Result<TransferFunction, RenderError> {
        if lut.is_empty() {
            return Err(RenderError::EmptyLut);
        }
        if !(range.low < range.high) {
            return Err(RenderError::LutDomain {
                min: range.low,
                max: range.high,
            });
        }
        if !(unit_step > 0.0) || !unit_step.is_finite() {
            return Err(RenderError::UnitStep(unit_step));
        }
        if !(0.0..=1.0).contains(&alpha_near_1) {
            return Err(RenderError::AlphaNear1(alpha_near_1));
        }

        Ok(TransferFunction {
            range,
            lut,
            unit_step,
            alpha_near_1,
            iso_surfaces: None,
        })
    }

    /// Add the iso-surface opacity boost from flat `(value, radius, max opacity)` rows.
    ///
    /// An empty table disables the boost.
    pub fn with_iso_surfaces(mut self, table: &[f32]) -> Result<TransferFunction, RenderError> {
        if table.len() % 3 != 0 {
            return Err(RenderError::IsoSurfaceLength(table.len()));
        }
        let rows: Vec<_> = table
            .chunks_exact(3)
            .map(|row| IsoSurface {
                value: row[0],
                radius: row[1],
                max_opacity: row[2],
            })
            .collect();
        self.iso_surfaces = if rows.is_empty() { None } else { Some(rows) };
        Ok(self)
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.lut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    pub fn unit_step(&self) -> f32 {
        self.unit_step
    }

    /// Rays stop once accumulated opacity exceeds this.
    pub fn alpha_near_1(&self) -> f32 {
        self.alpha_near_1
    }

    pub fn iso_surfaces(&self) -> Option<&[IsoSurface]> {
        self.iso_surfaces.as_deref()
    }

    /// Table index of `value`.
    pub fn index(&self, value: f32) -> usize {
        self.range.quantize(value, self.lut.len())
    }

    /// Table entry of `value`, without the iso-surface boost.
    pub fn lookup(&self, value: f32) -> RGBA {
        self.lut[self.index(value)]
    }

    /// Combined opacity of all iso-surfaces, 1 without a table.
    pub fn levoy(&self, value: f32, gradient_magnitude: f32) -> f32 {
        match &self.iso_surfaces {
            None => 1.0,
            Some(rows) => {
                let transparency = rows.iter().fold(1.0, |transp, row| {
                    transp * (1.0 - row.opacity(value, gradient_magnitude))
                });
                1.0 - transparency
            }
        }
    }

    /// Color and opacity of a sample.
    pub fn classify(&self, value: f32, gradient_magnitude: f32) -> RGBA {
        let rgba = self.lookup(value);
        if self.iso_surfaces.is_some() {
            let alpha = rgba.w * self.levoy(value, gradient_magnitude);
            vector![rgba.x, rgba.y, rgba.z, alpha]
        } else {
            rgba
        }
    }
}
