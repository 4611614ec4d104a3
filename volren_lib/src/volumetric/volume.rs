use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::{
    common::{affine_inverse, gradient_transform, ValueRange},
    error::RenderError,
};

/// Immutable scalar field on a regular lattice.
///
/// Samples are stored with x varying fastest, then y, then z.
/// Extents are stored in `(x, y, z)` order.
pub struct Volume {
    extents: Vector3<usize>,
    index_to_world: Matrix4<f32>,
    world_to_index: Matrix4<f32>,
    gradient_to_world: Matrix3<f32>,
    data: Vec<f32>,
}

impl std::fmt::Debug for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("extents", &self.extents)
            .field("index_to_world", &self.index_to_world)
            .field("data len", &self.data.len())
            .finish()
    }
}

impl Volume {
    /// Construct volume from samples and the affine transform of lattice indices into world space.
    pub fn new(
        extents: Vector3<usize>,
        index_to_world: Matrix4<f32>,
        data: Vec<f32>,
    ) -> Result<Volume, RenderError> {
        if extents.iter().any(|&e| e == 0) {
            return Err(RenderError::VolumeExtents);
        }

        let expected = extents.x * extents.y * extents.z;
        if data.len() != expected {
            return Err(RenderError::VolumeDataLength {
                expected,
                actual: data.len(),
            });
        }

        let world_to_index = affine_inverse(&index_to_world)?;
        let gradient_to_world = gradient_transform(&index_to_world)?;

        Ok(Volume {
            extents,
            index_to_world,
            world_to_index,
            gradient_to_world,
            data,
        })
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.extents.x * (y + self.extents.y * z)
    }

    /// Sample at lattice index, `None` if outside.
    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.extents.x || y >= self.extents.y || z >= self.extents.z {
            return None;
        }
        self.data.get(self.get_3d_index(x, y, z)).copied()
    }

    /// All samples, x fastest.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn extents(&self) -> Vector3<usize> {
        self.extents
    }

    pub fn index_to_world(&self) -> &Matrix4<f32> {
        &self.index_to_world
    }

    pub fn world_to_index(&self) -> &Matrix4<f32> {
        &self.world_to_index
    }

    /// Inverse transpose of the linear part of `index_to_world`.
    /// Takes index space gradients to world space.
    pub fn gradient_to_world(&self) -> &Matrix3<f32> {
        &self.gradient_to_world
    }

    /// Position of world point in index space.
    pub fn to_index_space(&self, world: &Point3<f32>) -> Point3<f32> {
        let h = self.world_to_index * world.to_homogeneous();
        Point3::new(h.x, h.y, h.z)
    }

    /// World position of lattice index.
    pub fn to_world_space(&self, index: &Point3<f32>) -> Point3<f32> {
        let h = self.index_to_world * index.to_homogeneous();
        Point3::new(h.x, h.y, h.z)
    }

    /// Range of stored sample values.
    pub fn value_range(&self) -> ValueRange {
        ValueRange::from_samples(self.data.iter())
    }
}
