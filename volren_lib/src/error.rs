use thiserror::Error;

use crate::render::{BlendMode, RenderType};

/// Errors detected while setting up a render.
///
/// Everything except the scheduler variants is reported before the first sample is taken.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("near clip offset {near} must be less than far clip offset {far}")]
    ClipPlanes { near: f32, far: f32 },

    #[error("field of view {0} is not in (0, 160) degrees")]
    FieldOfView(f32),

    #[error("image dimensions must be positive, got {width}x{height}")]
    ImageSize { width: usize, height: usize },

    #[error("camera basis is degenerate (eye equals look-at or up is parallel to the view direction)")]
    DegenerateView,

    #[error("plane separation must be positive, got {0}")]
    PlaneSeparation(f32),

    #[error("blend mode {blend_mode:?} is not compatible with render type {render_type:?}")]
    IncompatibleBlend {
        blend_mode: BlendMode,
        render_type: RenderType,
    },

    #[error("volume extents must be positive in every axis")]
    VolumeExtents,

    #[error("volume data has {actual} samples, extents require {expected}")]
    VolumeDataLength { expected: usize, actual: usize },

    #[error("volume metadata is missing {0}")]
    MissingMetadata(&'static str),

    #[error("index-to-world transform is not affine")]
    NotAffine,

    #[error("index-to-world transform is not invertible")]
    SingularTransform,

    #[error("lookup table is empty")]
    EmptyLut,

    #[error("lookup table has {actual} values, expected {expected}")]
    LutLength { expected: usize, actual: usize },

    #[error("lookup table domain [{min}, {max}] is empty")]
    LutDomain { min: f32, max: f32 },

    #[error("iso-surface table length {0} is not a multiple of 3")]
    IsoSurfaceLength(usize),

    #[error("opacity unit step must be positive, got {0}")]
    UnitStep(f32),

    #[error("early termination threshold {0} is not in [0, 1]")]
    AlphaNear1(f32),

    #[error("light arrays do not match ({colors} color values, {directions} direction values)")]
    LightArrays { colors: usize, directions: usize },

    #[error("light direction has zero length")]
    LightDirection,

    #[error("cannot spawn render thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),

    #[error("cannot build task pool: {0}")]
    TaskPool(#[from] rayon::ThreadPoolBuildError),

    #[error("render worker panicked")]
    WorkerPanicked,
}
