use nalgebra::{matrix, Matrix4, Point3, Vector3};

use crate::error::RenderError;

use super::CameraParams;

/// Camera looking from `eye` at a target point.
///
/// View space basis is right (`u`), down (`v`) and forward (`n`).
/// Clip distances are measured along `n` from the eye.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    params: CameraParams,
    u: Vector3<f32>,
    v: Vector3<f32>,
    n: Vector3<f32>,
    view_to_world: Matrix4<f32>,
    // eye to look-at distance
    dist: f32,
    near: f32,
    far: f32,
    plane_width: f32,
    plane_height: f32,
}

impl Camera {
    pub fn new(params: CameraParams) -> Result<Camera, RenderError> {
        let CameraParams {
            eye,
            look_at,
            up,
            near_clip,
            far_clip,
            fov,
            width,
            height,
            ..
        } = params;

        // Negated comparisons catch NaN too
        if !(near_clip < far_clip) {
            return Err(RenderError::ClipPlanes {
                near: near_clip,
                far: far_clip,
            });
        }
        if !(fov > 0.0 && fov < 160.0) {
            return Err(RenderError::FieldOfView(fov));
        }
        if width == 0 || height == 0 {
            return Err(RenderError::ImageSize { width, height });
        }

        let forward = look_at - eye;
        let dist = forward.norm();
        if !(dist > 0.0) || !dist.is_finite() {
            return Err(RenderError::DegenerateView);
        }
        let n = forward / dist;

        let right = n.cross(&up);
        let right_len = right.norm();
        if !(right_len > 0.0) || !right_len.is_finite() {
            return Err(RenderError::DegenerateView);
        }
        let u = right / right_len;
        let v = n.cross(&u);

        // cam to world matrix
        let view_to_world = matrix![u.x, v.x, n.x, eye.x;
                                    u.y, v.y, n.y, eye.y;
                                    u.z, v.z, n.z, eye.z;
                                    0.0, 0.0, 0.0, 1.0];

        let plane_height = 2.0 * dist * (fov * std::f32::consts::PI / 360.0).tan();
        let aspect = width as f32 / height as f32;
        let plane_width = aspect * plane_height;

        Ok(Camera {
            params,
            u,
            v,
            n,
            view_to_world,
            dist,
            near: near_clip + dist,
            far: far_clip + dist,
            plane_width,
            plane_height,
        })
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }

    pub fn get_resolution(&self) -> (usize, usize) {
        (self.params.width, self.params.height)
    }

    pub fn get_position(&self) -> Point3<f32> {
        self.params.eye
    }

    pub fn is_orthographic(&self) -> bool {
        self.params.orthographic
    }

    /// Right axis
    pub fn u(&self) -> Vector3<f32> {
        self.u
    }

    /// Down axis
    pub fn v(&self) -> Vector3<f32> {
        self.v
    }

    /// Forward axis
    pub fn n(&self) -> Vector3<f32> {
        self.n
    }

    /// `view_to_world * view_space = world_space`
    pub fn view_to_world(&self) -> &Matrix4<f32> {
        &self.view_to_world
    }

    /// Distance from eye to look-at point.
    pub fn look_at_distance(&self) -> f32 {
        self.dist
    }

    /// View space depth of the near clip plane.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// View space depth of the far clip plane.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// World space size of the image plane through the look-at point.
    pub fn plane_size(&self) -> (f32, f32) {
        (self.plane_width, self.plane_height)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use nalgebra::{point, vector};

    fn simple_params() -> CameraParams {
        CameraParams {
            eye: point![0.0, 0.0, -5.0],
            look_at: point![0.0, 0.0, 0.0],
            up: vector![0.0, -1.0, 0.0],
            near_clip: -1.0,
            far_clip: 2.0,
            fov: 90.0,
            width: 20,
            height: 10,
            orthographic: false,
        }
    }

    #[test]
    fn basis() {
        let cam = Camera::new(simple_params()).unwrap();

        assert_eq!(cam.n(), vector![0.0, 0.0, 1.0]);
        assert_eq!(cam.u(), vector![1.0, 0.0, 0.0]);
        assert_eq!(cam.v(), vector![0.0, 1.0, 0.0]);
        assert_eq!(cam.look_at_distance(), 5.0);
        assert_eq!(cam.near(), 4.0);
        assert_eq!(cam.far(), 7.0);

        let look_at = cam.view_to_world() * vector![0.0, 0.0, 5.0, 1.0];
        assert_eq!(look_at, vector![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn plane_size() {
        let cam = Camera::new(simple_params()).unwrap();
        let (w, h) = cam.plane_size();

        // tan(45 deg) == 1
        assert!((h - 10.0).abs() < 1e-4);
        assert!((w - 20.0).abs() < 1e-4);
    }

    #[test]
    fn default_is_orthonormal() {
        let cam = Camera::new(CameraParams::default()).unwrap();
        let (u, v, n) = (cam.u(), cam.v(), cam.n());

        for axis in [u, v, n] {
            assert!((axis.norm() - 1.0).abs() < 1e-5);
        }
        assert!(u.dot(&v).abs() < 1e-5);
        assert!(u.dot(&n).abs() < 1e-5);
        assert!(v.dot(&n).abs() < 1e-5);
        assert!(cam.near() < cam.far());
    }

    #[test]
    fn validation() {
        let bad = |f: fn(&mut CameraParams)| {
            let mut params = simple_params();
            f(&mut params);
            Camera::new(params)
        };

        assert!(matches!(
            bad(|p| p.far_clip = -1.0),
            Err(RenderError::ClipPlanes { .. })
        ));
        assert!(matches!(
            bad(|p| p.fov = 0.0),
            Err(RenderError::FieldOfView(_))
        ));
        assert!(matches!(
            bad(|p| p.fov = 160.0),
            Err(RenderError::FieldOfView(_))
        ));
        assert!(matches!(
            bad(|p| p.height = 0),
            Err(RenderError::ImageSize { .. })
        ));
        assert!(matches!(
            bad(|p| p.look_at = p.eye),
            Err(RenderError::DegenerateView)
        ));
        assert!(matches!(
            bad(|p| p.up = vector![0.0, 0.0, 3.0]),
            Err(RenderError::DegenerateView)
        ));
    }
}
