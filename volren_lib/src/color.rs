use nalgebra::{vector, Vector3, Vector4};

/// Four float channels, either RGBA or premultiplied RGB + transmittance.
pub type RGBA = Vector4<f32>;

/// Three float channels.
pub type RGB = Vector3<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Fully transparent pixel in premultiplied RGB + transmittance form.
pub fn transparent_rgbt() -> RGBA {
    vector![0.0, 0.0, 0.0, 1.0]
}

/// Convert HSV (all channels in `<0;1>`) to RGB.
///
/// Hue 1.0 wraps around to 0.0.
pub fn hsv_to_rgb(hsv: RGB) -> RGB {
    let (mut h, s, v) = (hsv.x, hsv.y, hsv.z);
    if s == 0.0 {
        return vector![v, v, v];
    }
    if h == 1.0 {
        h = 0.0;
    }
    h *= 6.0;
    let sextant = h as u32;
    let frac = h - sextant as f32;
    let vsf = s * v * frac;
    let min = v * (1.0 - s);
    let mid1 = min + vsf;
    let mid2 = v - vsf;
    match sextant {
        0 => vector![v, mid1, min],
        1 => vector![mid2, v, min],
        2 => vector![min, v, mid1],
        3 => vector![min, mid2, v],
        4 => vector![mid1, min, v],
        _ => vector![v, min, mid2],
    }
}

/// Returns `color` as RGB, converting it first if it is stored as HSV.
pub fn ensure_rgb(color: RGB, is_hsv: bool) -> RGB {
    if is_hsv {
        hsv_to_rgb(color)
    } else {
        color
    }
}
