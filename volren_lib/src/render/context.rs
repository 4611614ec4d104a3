use std::sync::Arc;

use crate::{
    camera::Camera,
    error::RenderError,
    kernel::Kernel,
    lighting::Lighting,
    transfer_function::TransferFunction,
    volumetric::{ConvoParams, Volume},
};

use super::{Blender, RenderOptions};

/// Everything a render reads, shared by all workers.
#[derive(Debug)]
pub struct RenderContext {
    volume: Arc<Volume>,
    kernel: Kernel,
    camera: Camera,
    tf: TransferFunction,
    lighting: Lighting,
    options: RenderOptions,
    blender: Blender,
    convo_params: ConvoParams,
}

impl RenderContext {
    pub fn new(
        volume: Arc<Volume>,
        kernel: Kernel,
        camera: Camera,
        tf: TransferFunction,
        lighting: Lighting,
        options: RenderOptions,
    ) -> Result<RenderContext, RenderError> {
        options.validate()?;

        let blender = options.blend_mode.blender();
        let convo_params = ConvoParams::from_kernel(&kernel);

        log::debug!(
            "Render context: kernel {}, {:?}, {:?}, plane separation {}, {} lights",
            kernel.name(),
            options.render_type,
            options.blend_mode,
            options.plane_sep,
            lighting.lights.len()
        );

        Ok(RenderContext {
            volume,
            kernel,
            camera,
            tf,
            lighting,
            options,
            blender,
            convo_params,
        })
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn transfer_function(&self) -> &TransferFunction {
        &self.tf
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn blender(&self) -> Blender {
        self.blender
    }

    pub fn convo_params(&self) -> ConvoParams {
        self.convo_params
    }

    /// Output image size.
    pub fn resolution(&self) -> (usize, usize) {
        self.camera.get_resolution()
    }
}
