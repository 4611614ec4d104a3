use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::error::RenderError;

fn linear_part(transform: &Matrix4<f32>) -> Result<Matrix3<f32>, RenderError> {
    let bottom = transform.row(3);
    if bottom[0] != 0.0 || bottom[1] != 0.0 || bottom[2] != 0.0 || bottom[3] != 1.0 {
        return Err(RenderError::NotAffine);
    }
    Ok(transform.fixed_slice::<3, 3>(0, 0).into_owned())
}

fn inverse_3x3(linear: Matrix3<f32>) -> Result<Matrix3<f32>, RenderError> {
    let inv = linear
        .try_inverse()
        .ok_or(RenderError::SingularTransform)?;
    if inv.iter().all(|v| v.is_finite()) {
        Ok(inv)
    } else {
        Err(RenderError::SingularTransform)
    }
}

/// Inverse of an affine transform.
///
/// Fails if the bottom row is not `[0, 0, 0, 1]` or the linear part is singular.
pub fn affine_inverse(transform: &Matrix4<f32>) -> Result<Matrix4<f32>, RenderError> {
    let inv_linear = inverse_3x3(linear_part(transform)?)?;
    let translation: Vector3<f32> = transform.fixed_slice::<3, 1>(0, 3).into_owned();
    let inv_translation = inv_linear * -translation;

    let mut inverse = Matrix4::identity();
    inverse.fixed_slice_mut::<3, 3>(0, 0).copy_from(&inv_linear);
    inverse
        .fixed_slice_mut::<3, 1>(0, 3)
        .copy_from(&inv_translation);
    Ok(inverse)
}

/// Matrix mapping an index-space gradient to world space.
///
/// Gradients are covectors, so this is the inverse-transpose of the linear part of `transform`.
pub fn gradient_transform(transform: &Matrix4<f32>) -> Result<Matrix3<f32>, RenderError> {
    Ok(inverse_3x3(linear_part(transform)?)?.transpose())
}
