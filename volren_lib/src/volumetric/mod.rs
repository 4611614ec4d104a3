//! Scalar volumes and their resampling.

mod convolution;
mod vol_builder;
mod volume;

pub use convolution::{ConvoParams, Convolution};
pub use vol_builder::{placement_transform, BuildVolume, VolumeMetadata};
pub use volume::Volume;
