use nalgebra::{point, vector, Vector2, Vector3};

use crate::{
    color::{self, RGBA},
    common::lerp_range,
    volumetric::Convolution,
};

use super::{BlendMode, RenderContext, RenderType};

/// Marches one pixel's ray through sampling planes parallel to the image plane.
///
/// A worker keeps one `Ray` and reuses it for every pixel it renders.
/// Positions are in view space, the ray starts on the near clip plane and ends past the far one.
pub struct Ray<'a> {
    ctx: &'a RenderContext,
    convo: Convolution,
    x: usize,
    y: usize,
    start: Vector3<f32>,
    step: Vector3<f32>,
    pos: Vector3<f32>,
    steps: u32,
    // unit vector from sample towards the eye, world space
    viewer_dir: Vector3<f32>,
    // opacity correction exponent
    delta_over_u: f32,
    result: RGBA,
    cur: RGBA,
    valid: u32,
}

impl<'a> Ray<'a> {
    pub fn new(ctx: &'a RenderContext) -> Ray<'a> {
        Ray {
            ctx,
            convo: Convolution::with_params(ctx.kernel(), ctx.convo_params()),
            x: 0,
            y: 0,
            start: Vector3::zeros(),
            step: Vector3::zeros(),
            pos: Vector3::zeros(),
            steps: 0,
            viewer_dir: Vector3::zeros(),
            delta_over_u: 0.0,
            result: color::zero(),
            cur: color::zero(),
            valid: 0,
        }
    }

    /// Render pixel `(x, y)`.
    pub fn cast(&mut self, x: usize, y: usize) -> RGBA {
        self.start(x, y);
        while self.step() {}
        self.finish()
    }

    /// Pixel currently being rendered.
    pub fn pixel(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Number of samples inside the volume so far.
    pub fn valid_samples(&self) -> u32 {
        self.valid
    }

    /// Reset state for pixel `(x, y)`.
    pub fn start(&mut self, x: usize, y: usize) {
        let camera = self.ctx.camera();
        let (width, height) = camera.get_resolution();
        let (plane_w, plane_h) = camera.plane_size();
        let near = camera.near();
        let dist = camera.look_at_distance();
        let sep = self.ctx.options().plane_sep;

        self.x = x;
        self.y = y;

        // Pixel center on the image plane through the look-at point
        let plane_vec: Vector2<f32> = vector![
            plane_w / 2.0 * lerp_range(-1.0, 1.0, -0.5, x as f32, width as f32 - 0.5),
            plane_h / 2.0 * lerp_range(-1.0, 1.0, -0.5, y as f32, height as f32 - 0.5)
        ];

        if camera.is_orthographic() || plane_vec == Vector2::zeros() {
            self.start = vector![plane_vec.x, plane_vec.y, near];
            self.step = vector![0.0, 0.0, sep];
        } else {
            // Similar triangles through the eye
            let len = plane_vec.norm();
            let dir = plane_vec / len;
            let near_len = len * near / dist;
            self.start = vector![near_len * dir.x, near_len * dir.y, near];
            let delta_len = len * sep / dist;
            self.step = vector![delta_len * dir.x, delta_len * dir.y, sep];
        }

        let world_step = camera.view_to_world() * self.step.to_homogeneous();
        let world_step = world_step.xyz();
        let step_len = world_step.norm();
        self.viewer_dir = world_step / -step_len;
        self.delta_over_u = step_len / self.ctx.transfer_function().unit_step();

        self.pos = self.start;
        self.steps = 0;
        self.valid = 0;
        self.result = color::zero();
    }

    /// Take one sample and advance.
    ///
    /// Returns `false` once the ray is done.
    pub fn step(&mut self) -> bool {
        if self.pos.z > self.ctx.camera().far() {
            return false;
        }

        if self.sample() {
            self.result = if self.valid == 0 {
                self.cur
            } else {
                self.ctx.blender().blend(&self.result, &self.cur)
            };
            self.valid += 1;
        }

        if self.ctx.options().blend_mode == BlendMode::Over
            && self.valid > 0
            && 1.0 - self.result.w > self.ctx.transfer_function().alpha_near_1()
        {
            // Nearly opaque, undo premultiplication
            let opacity = 1.0 - self.result.w;
            self.result /= opacity;
            self.result.w = 0.0;
            return false;
        }

        self.steps += 1;
        self.pos = self.start + self.step * self.steps as f32;
        true
    }

    /// Classify and shade the sample at the current position into `cur`.
    ///
    /// Returns `false` if the position is outside the volume.
    fn sample(&mut self) -> bool {
        let ctx = self.ctx;
        let camera = ctx.camera();

        let world = camera.view_to_world() * point![self.pos.x, self.pos.y, self.pos.z].to_homogeneous();
        let world = point![world.x, world.y, world.z];

        if !self.convo.eval(ctx.volume(), &world) {
            return false;
        }

        let gradient = self.convo.gradient();
        let mut rgba = ctx
            .transfer_function()
            .classify(self.convo.value(), gradient.norm());

        let alpha = rgba.w.clamp(0.0, 1.0);
        let alpha = 1.0 - (1.0 - alpha).powf(self.delta_over_u);
        rgba.w = alpha;

        let options = ctx.options();
        if options.render_type == RenderType::RgbaMat {
            self.cur = rgba;
            return true;
        }

        if options.blend_mode == BlendMode::Over && alpha == 0.0 {
            self.cur = color::transparent_rgbt();
            return true;
        }

        let lighting = ctx.lighting();
        let cue = lighting.depth_cue(camera.near(), self.pos.z, camera.far());
        let rgb = lighting.light(&rgba.xyz(), &gradient, &self.viewer_dir, &cue);

        self.cur = match options.render_type {
            RenderType::Rgbt => {
                let rgb = rgb * alpha;
                color::new(rgb.x, rgb.y, rgb.z, 1.0 - alpha)
            }
            _ => color::new(rgb.x, rgb.y, rgb.z, alpha),
        };
        true
    }

    /// Final color of the pixel.
    pub fn finish(&mut self) -> RGBA {
        let options = self.ctx.options();
        if self.valid == 0 {
            return match options.render_type {
                RenderType::Rgbt => color::transparent_rgbt(),
                _ => color::zero(),
            };
        }
        if options.blend_mode == BlendMode::Mean {
            self.result /= self.valid as f32;
        }
        self.result
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::{
        camera::{Camera, CameraParams},
        kernel::{Kernel, KernelFamily},
        lighting::Lighting,
        render::RenderOptions,
        test_helpers::*,
    };
    use std::sync::Arc;

    fn context(options: RenderOptions, alpha_near_1: f32, orthographic: bool) -> RenderContext {
        let camera = Camera::new(CameraParams {
            orthographic,
            ..looking_at_cube(4, 4)
        })
        .unwrap();
        RenderContext::new(
            Arc::new(uniform_volume(8, 1.0)),
            Kernel::new(KernelFamily::Box),
            camera,
            constant_tf(color::new(0.5, 0.25, 1.0, 0.5), alpha_near_1),
            Lighting::unlit(),
            options,
        )
        .unwrap()
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let ctx = context(RenderOptions::default(), 1.0, true);
        let mut ray = Ray::new(&ctx);

        ray.start(0, 0);
        let first = (ray.start, ray.step);
        ray.start(3, 2);

        assert_eq!(ray.step, first.1);
        assert_eq!(ray.step, vector![0.0, 0.0, 0.01]);
        assert_eq!(ray.start.z, first.0.z);
        assert!(ray.start.x > first.0.x);
        assert!(ray.start.y > first.0.y);
        assert_eq!(ray.pixel(), (3, 2));
    }

    #[test]
    fn perspective_rays_diverge() {
        let ctx = context(RenderOptions::default(), 1.0, false);
        let mut ray = Ray::new(&ctx);

        ray.start(3, 3);
        assert!(ray.step.x > 0.0 && ray.step.y > 0.0);
        assert_eq!(ray.step.z, 0.01);
        // Start lies on the line through the eye
        let ratio = ray.start.z / ray.step.z;
        assert!((ray.start.x - ray.step.x * ratio).abs() < 1e-5);

        // Viewer direction points back along the ray
        let world_step = ctx.camera().view_to_world() * ray.step.to_homogeneous();
        assert!(ray.viewer_dir.dot(&world_step.xyz()) < 0.0);
        assert!((ray.viewer_dir.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sampler_uses_context_bounds() {
        let ctx = context(RenderOptions::default(), 1.0, true);
        let ray = Ray::new(&ctx);
        assert_eq!(ray.convo.params(), ctx.convo_params());
        assert_eq!(ray.convo.kernel(), ctx.kernel());
    }

    #[test]
    fn opacity_correction_exponent() {
        let ctx = context(RenderOptions::default(), 1.0, true);
        let mut ray = Ray::new(&ctx);
        ray.start(1, 1);

        // Orthographic step is plane separation long, unit step of the transfer function is 1
        assert!((ray.delta_over_u - 0.01).abs() < 1e-6);
    }

    #[test]
    fn early_termination() {
        let options = RenderOptions::builder().plane_separation(0.05).build().unwrap();
        let ctx = context(options, 0.3, true);
        let mut ray = Ray::new(&ctx);

        let res = ray.cast(2, 2);
        assert_eq!(res.w, 0.0);
        assert!(ray.pos.z < ctx.camera().far());
        // Premultiplication removed
        assert!((res.x - 0.5).abs() < 1e-4);
        assert!((res.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn mean_divides_by_valid_samples() {
        let options = RenderOptions::builder()
            .render_type(RenderType::RgbaMat)
            .blend_mode(BlendMode::Mean)
            .build()
            .unwrap();
        let ctx = context(options, 1.0, true);
        let mut ray = Ray::new(&ctx);

        let res = ray.cast(1, 2);
        assert!(ray.valid_samples() > 1);
        assert!((res.x - 0.5).abs() < 1e-5);
        assert!((res.y - 0.25).abs() < 1e-5);
    }
}
