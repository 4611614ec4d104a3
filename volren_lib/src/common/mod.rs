mod affine;
mod interp;
mod value_range;

pub use affine::{affine_inverse, gradient_transform};
pub use interp::{lerp, lerp_range, unlerp};
pub use value_range::ValueRange;
