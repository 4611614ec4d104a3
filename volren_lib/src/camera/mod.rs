use nalgebra::{point, vector, Point3, Vector3};

mod target_camera;

pub use target_camera::Camera;

/// User facing camera parameters, validated by [`Camera::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParams {
    pub eye: Point3<f32>,
    pub look_at: Point3<f32>,
    pub up: Vector3<f32>,
    /// Near clip offset relative to the look-at distance
    pub near_clip: f32,
    /// Far clip offset relative to the look-at distance
    pub far_clip: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub width: usize,
    pub height: usize,
    pub orthographic: bool,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            eye: point![3.8, 6.9, 4.1],
            look_at: point![0.0, -0.067, -0.11],
            up: vector![0.25, 0.40, 0.88],
            near_clip: -1.86,
            far_clip: 1.805,
            fov: 26.0,
            width: 185,
            height: 190,
            orthographic: false,
        }
    }
}
