//! Blinn-Phong shading with directional lights and depth cueing.

use nalgebra::{vector, Vector3};

use crate::{
    camera::Camera,
    color::RGB,
    common::{lerp, unlerp},
    error::RenderError,
};

/// Light infinitely far away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    color: RGB,
    // world space, normalized, points towards the light
    direction: Vector3<f32>,
}

impl DirectionalLight {
    pub fn new(color: RGB, direction: Vector3<f32>) -> Result<DirectionalLight, RenderError> {
        let len = direction.norm();
        if !(len > 0.0) || !len.is_finite() {
            return Err(RenderError::LightDirection);
        }
        Ok(DirectionalLight {
            color,
            direction: direction / len,
        })
    }

    /// Light with direction given in the camera's view space (right, down, forward).
    pub fn from_view_space(
        color: RGB,
        direction: Vector3<f32>,
        camera: &Camera,
    ) -> Result<DirectionalLight, RenderError> {
        let rotation = camera.view_to_world().fixed_slice::<3, 3>(0, 0);
        DirectionalLight::new(color, rotation * direction)
    }

    pub fn color(&self) -> RGB {
        self.color
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }
}

/// Material coefficients, depth cue and lights.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    /// Color multiplier at the near clip plane
    pub cue_near: RGB,
    /// Color multiplier at the far clip plane
    pub cue_far: RGB,
    pub lights: Vec<DirectionalLight>,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            diffuse: 0.8,
            specular: 0.1,
            shininess: 150.0,
            cue_near: vector![1.1, 1.1, 1.1],
            cue_far: vector![0.4, 0.4, 0.4],
            lights: vec![],
        }
    }
}

impl Lighting {
    /// Default coefficients with lights from parallel flat arrays of RGB colors and world directions.
    pub fn from_arrays(colors: &[f32], directions: &[f32]) -> Result<Lighting, RenderError> {
        if colors.len() % 3 != 0 || colors.len() != directions.len() {
            return Err(RenderError::LightArrays {
                colors: colors.len(),
                directions: directions.len(),
            });
        }

        let lights = colors
            .chunks_exact(3)
            .zip(directions.chunks_exact(3))
            .map(|(c, d)| DirectionalLight::new(vector![c[0], c[1], c[2]], vector![d[0], d[1], d[2]]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Lighting {
            lights,
            ..Default::default()
        })
    }

    /// Blinn-Phong shading of `base` color.
    ///
    /// `gradient` points towards denser material, `viewer_dir` points from the sample to the eye.
    pub fn shade(&self, base: &RGB, gradient: &Vector3<f32>, viewer_dir: &Vector3<f32>) -> RGB {
        let mut result = base * self.ambient;

        if (self.specular == 0.0 && self.diffuse == 0.0) || *gradient == Vector3::zeros() {
            return result;
        }

        let normal = -gradient.normalize();

        for light in &self.lights {
            let lambert = f32::max(0.0, normal.dot(&light.direction));
            result += light.color.component_mul(base) * (lambert * self.diffuse);

            let half = light.direction + viewer_dir;
            let half_len = half.norm();
            // Light exactly behind the sample, no highlight
            if half_len > 0.0 {
                let highlight = f32::max(0.0, normal.dot(&(half / half_len)));
                result += light.color * (highlight.powf(self.shininess) * self.specular);
            }
        }

        result
    }

    /// Depth cue color at view space `depth` between the clip planes.
    pub fn depth_cue(&self, near: f32, depth: f32, far: f32) -> RGB {
        let t = unlerp(near, depth, far);
        self.cue_near.zip_map(&self.cue_far, |a, b| lerp(a, b, t))
    }

    /// Shaded and depth cued color of a sample.
    pub fn light(
        &self,
        base: &RGB,
        gradient: &Vector3<f32>,
        viewer_dir: &Vector3<f32>,
        cue: &RGB,
    ) -> RGB {
        self.shade(base, gradient, viewer_dir).component_mul(cue)
    }

    /// Lighting which leaves colors unchanged.
    pub fn unlit() -> Lighting {
        Lighting {
            ambient: 1.0,
            diffuse: 0.0,
            specular: 0.0,
            shininess: 1.0,
            cue_near: vector![1.0, 1.0, 1.0],
            cue_far: vector![1.0, 1.0, 1.0],
            lights: vec![],
        }
    }
}
