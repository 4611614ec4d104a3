use crate::color::RGBA;

/// How samples along a ray are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Maximum intensity projection
    Max,
    Sum,
    /// Sum divided by the number of valid samples
    Mean,
    /// Front to back compositing of premultiplied color and transmittance
    #[default]
    Over,
}

impl BlendMode {
    /// Accumulation step of this mode.
    pub fn blender(&self) -> Blender {
        match self {
            BlendMode::Max => Blender::Max,
            BlendMode::Sum | BlendMode::Mean => Blender::Sum,
            BlendMode::Over => Blender::Over,
        }
    }

    pub fn from_name(name: &str) -> Option<BlendMode> {
        match name {
            "Max" => Some(BlendMode::Max),
            "Sum" => Some(BlendMode::Sum),
            "Mean" => Some(BlendMode::Mean),
            "Over" => Some(BlendMode::Over),
            _ => None,
        }
    }
}

/// Combines the running result of a ray with a new sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blender {
    Max,
    Sum,
    Over,
}

impl Blender {
    pub fn blend(&self, accum: &RGBA, cur: &RGBA) -> RGBA {
        match self {
            Blender::Max => accum.sup(cur),
            Blender::Sum => accum + cur,
            Blender::Over => {
                // Channel 3 is transmittance
                let mut res = cur * accum.w;
                res.x += accum.x;
                res.y += accum.y;
                res.z += accum.z;
                res
            }
        }
    }
}
