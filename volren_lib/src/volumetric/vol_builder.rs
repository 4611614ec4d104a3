use nalgebra::{point, vector, Matrix4, Point3, Vector3};

use crate::error::RenderError;

use super::Volume;

/// Volume types constructible from parsed metadata with samples of type `M`.
pub trait BuildVolume<M>
where
    Self: Sized,
{
    fn build(metadata: VolumeMetadata<M>) -> Result<Self, RenderError>;
}

/// Everything known about a volume before it is built.
///
/// Either `index_to_world` is given, or it is assembled from
/// `scale` (voxel spacing, default 1) and `position` (world position of index 0, default origin).
pub struct VolumeMetadata<T> {
    pub size: Option<Vector3<usize>>,
    pub data: Option<Vec<T>>,
    pub index_to_world: Option<Matrix4<f32>>,
    pub scale: Option<Vector3<f32>>, // shape of voxels
    pub position: Option<Point3<f32>>,
}

impl<T> Default for VolumeMetadata<T> {
    fn default() -> Self {
        Self {
            size: None,
            data: None,
            index_to_world: None,
            scale: None,
            position: None,
        }
    }
}

impl<T> VolumeMetadata<T> {
    pub fn new(size: Vector3<usize>, data: Vec<T>) -> VolumeMetadata<T> {
        VolumeMetadata {
            size: Some(size),
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn set_index_to_world(&mut self, transform: Matrix4<f32>) {
        self.index_to_world = Some(transform);
    }

    pub fn set_placement(&mut self, scale: Vector3<f32>, position: Point3<f32>) {
        self.scale = Some(scale);
        self.position = Some(position);
    }

    /// Index-to-world transform, explicit or assembled from placement.
    pub fn transform(&self) -> Matrix4<f32> {
        match self.index_to_world {
            Some(t) => t,
            None => {
                let scale = self.scale.unwrap_or_else(|| vector![1.0, 1.0, 1.0]);
                let position = self.position.unwrap_or_else(|| point![0.0, 0.0, 0.0]);
                placement_transform(scale, position)
            }
        }
    }
}

/// Axis aligned transform, voxel `(i, j, k)` lands at `position + scale * (i, j, k)`.
pub fn placement_transform(scale: Vector3<f32>, position: Point3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(&position.coords) * Matrix4::new_nonuniform_scaling(&scale)
}

impl<T> BuildVolume<T> for Volume
where
    T: Into<f32> + Copy,
{
    fn build(metadata: VolumeMetadata<T>) -> Result<Volume, RenderError> {
        let transform = metadata.transform();
        let size = metadata.size.ok_or(RenderError::MissingMetadata("size"))?;
        let data = metadata.data.ok_or(RenderError::MissingMetadata("data"))?;

        let data: Vec<f32> = data.into_iter().map(|v| v.into()).collect();

        log::debug!("Building volume, size {size:?}, {} samples", data.len());

        Volume::new(size, transform, data)
    }
}
