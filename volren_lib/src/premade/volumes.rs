use nalgebra::{point, vector, Vector3};

use crate::{
    error::RenderError,
    volumetric::{BuildVolume, Volume, VolumeMetadata},
};

/// Generates one sample at a time, at any lattice location.
pub trait SampleGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> f32;
}

/// All samples are the same.
pub struct SolidGenerator {
    pub sample: f32,
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, _coords: Vector3<usize>) -> f32 {
        self.sample
    }
}

/// Cone shaped density, 1 in the center, falling to 0 at `radius`.
///
/// Radius is a fraction of half the volume side.
pub struct SphereGenerator {
    pub dims: Vector3<usize>,
    pub radius: f32,
}

impl SampleGenerator for SphereGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> f32 {
        let pos = unit_cube_position(coords, self.dims);
        f32::max(0.0, 1.0 - pos.norm() / self.radius)
    }
}

/// Value grows linearly along x, from 0 to 1.
pub struct RampGenerator {
    pub dims: Vector3<usize>,
}

impl SampleGenerator for RampGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> f32 {
        if self.dims.x < 2 {
            return 0.0;
        }
        coords.x as f32 / (self.dims.x - 1) as f32
    }
}

// Lattice position mapped into <-1;1>^3
fn unit_cube_position(coords: Vector3<usize>, dims: Vector3<usize>) -> Vector3<f32> {
    let mut pos = Vector3::zeros();
    for axis in 0..3 {
        pos[axis] = if dims[axis] < 2 {
            0.0
        } else {
            -1.0 + 2.0 * coords[axis] as f32 / (dims[axis] - 1) as f32
        };
    }
    pos
}

/// Metadata of a volume filled by `generator`, spanning the cube `<-1;1>^3` in world space.
pub fn generate(dims: Vector3<usize>, generator: &impl SampleGenerator) -> VolumeMetadata<f32> {
    let mut data = Vec::with_capacity(dims.x * dims.y * dims.z);
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                data.push(generator.sample_at(vector![x, y, z]));
            }
        }
    }

    let scale = dims.map(|d| if d < 2 { 1.0 } else { 2.0 / (d - 1) as f32 });
    let mut meta = VolumeMetadata::new(dims, data);
    meta.set_placement(scale, point![-1.0, -1.0, -1.0]);
    meta
}

pub fn solid_volume(side: usize, sample: f32) -> Result<Volume, RenderError> {
    let dims = vector![side, side, side];
    BuildVolume::build(generate(dims, &SolidGenerator { sample }))
}

/// Sphere of radius 0.5 in the world.
pub fn sphere_volume(side: usize) -> Result<Volume, RenderError> {
    let dims = vector![side, side, side];
    BuildVolume::build(generate(dims, &SphereGenerator { dims, radius: 0.5 }))
}

pub fn ramp_volume(side: usize) -> Result<Volume, RenderError> {
    let dims = vector![side, side, side];
    BuildVolume::build(generate(dims, &RampGenerator { dims }))
}
