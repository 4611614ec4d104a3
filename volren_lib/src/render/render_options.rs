use crate::error::RenderError;

use super::BlendMode;

/// Meaning of the four output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderType {
    /// Transfer function color, unlit
    RgbaMat,
    /// Shaded color with opacity
    RgbaLit,
    /// Shaded, premultiplied color with transmittance in the last channel
    #[default]
    Rgbt,
}

impl RenderType {
    /// Last channel holds transmittance instead of opacity.
    pub fn is_transmittance(&self) -> bool {
        matches!(self, RenderType::Rgbt)
    }
}

/// Per render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// View space distance between sampling planes
    pub plane_sep: f32,
    pub render_type: RenderType,
    pub blend_mode: BlendMode,
    /// Zero renders sequentially on the calling thread
    pub workers: usize,
    /// Spawn OS threads instead of tasks on a pool
    pub use_threads: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            plane_sep: 0.01,
            render_type: RenderType::Rgbt,
            blend_mode: BlendMode::Over,
            workers: 0,
            use_threads: false,
        }
    }
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if !(self.plane_sep > 0.0) || !self.plane_sep.is_finite() {
            return Err(RenderError::PlaneSeparation(self.plane_sep));
        }
        if self.blend_mode == BlendMode::Over && self.render_type != RenderType::Rgbt {
            return Err(RenderError::IncompatibleBlend {
                blend_mode: self.blend_mode,
                render_type: self.render_type,
            });
        }
        Ok(())
    }
}

/// Builder of [`RenderOptions`], unset fields take their defaults.
#[derive(Debug, Default)]
pub struct RenderOptionsBuilder {
    plane_sep: Option<f32>,
    render_type: Option<RenderType>,
    blend_mode: Option<BlendMode>,
    workers: Option<usize>,
    use_threads: Option<bool>,
}

impl RenderOptionsBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn plane_separation(mut self, plane_sep: f32) -> Self {
        self.plane_sep = Some(plane_sep);
        self
    }

    pub fn render_type(mut self, render_type: RenderType) -> Self {
        self.render_type = Some(render_type);
        self
    }

    pub fn blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = Some(blend_mode);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn use_threads(mut self, use_threads: bool) -> Self {
        self.use_threads = Some(use_threads);
        self
    }

    /// Build and validate.
    pub fn build(self) -> Result<RenderOptions, RenderError> {
        let options = self.build_unchecked();
        options.validate()?;
        Ok(options)
    }

    /// Build without validation, the render context still validates.
    pub fn build_unchecked(self) -> RenderOptions {
        let default = RenderOptions::default();
        RenderOptions {
            plane_sep: self.plane_sep.unwrap_or(default.plane_sep),
            render_type: self.render_type.unwrap_or(default.render_type),
            blend_mode: self.blend_mode.unwrap_or(default.blend_mode),
            workers: self.workers.unwrap_or(default.workers),
            use_threads: self.use_threads.unwrap_or(default.use_threads),
        }
    }
}
