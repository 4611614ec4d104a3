/// Inverse of [`lerp`], position of `x` inside `[x1, x2]` as a fraction.
pub fn unlerp(x1: f32, x: f32, x2: f32) -> f32 {
    (x - x1) / (x2 - x1)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Maps `x` from `[x1, x2]` to `[y1, y2]`.
pub fn lerp_range(y1: f32, y2: f32, x1: f32, x: f32, x2: f32) -> f32 {
    lerp(y1, y2, unlerp(x1, x, x2))
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn range_mapping() {
        assert_eq!(unlerp(10.0, 15.0, 20.0), 0.5);
        assert_eq!(lerp_range(-1.0, 1.0, -0.5, 0.0, 0.5), 0.0);
        assert_eq!(lerp_range(-1.0, 1.0, -0.5, -0.5, 0.5), -1.0);
    }
}
