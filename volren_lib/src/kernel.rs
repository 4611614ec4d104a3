//! Reconstruction kernels for convolution.
//!
//! A kernel is nonzero only within `[-support/2, support/2]`. Each kernel knows its derivative;
//! the derivative chain of every family ends in a zero kernel whose derivative is itself.

/// Weights of up to four neighbouring lattice samples, unused taps are zero.
pub type TapWeights = [f32; 4];

/// Kernel shapes, each with a fixed number of nonzero derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelFamily {
    /// Nearest neighbour
    Box,
    /// Linear interpolation
    Tent,
    /// Quadratic B-spline, smooth but not interpolating
    BSpline2,
    /// Cubic B-spline
    BSpline3,
}

impl KernelFamily {
    /// Number of lattice samples touched by the kernel.
    pub fn support(self) -> u8 {
        match self {
            KernelFamily::Box => 1,
            KernelFamily::Tent => 2,
            KernelFamily::BSpline2 => 3,
            KernelFamily::BSpline3 => 4,
        }
    }

    /// Highest derivative order which is not identically zero.
    fn max_order(self) -> u8 {
        match self {
            KernelFamily::Box => 0,
            KernelFamily::Tent => 1,
            KernelFamily::BSpline2 => 2,
            KernelFamily::BSpline3 => 3,
        }
    }

    /// Parse kernel family from its short name (`Box`, `Tent`, `BSpline2`, `BSpline3`).
    pub fn from_name(name: &str) -> Option<KernelFamily> {
        match name {
            "Box" => Some(KernelFamily::Box),
            "Tent" => Some(KernelFamily::Tent),
            "BSpline2" => Some(KernelFamily::BSpline2),
            "BSpline3" => Some(KernelFamily::BSpline3),
            _ => None,
        }
    }
}

/// A kernel of some family, differentiated `order` times.
///
/// Orders above the family's last nonzero derivative are the zero kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    family: KernelFamily,
    order: u8,
}

impl Kernel {
    pub fn new(family: KernelFamily) -> Kernel {
        Kernel { family, order: 0 }
    }

    pub fn family(&self) -> KernelFamily {
        self.family
    }

    /// How many times the family's base kernel was differentiated.
    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn support(&self) -> u8 {
        self.family.support()
    }

    pub fn is_zero(&self) -> bool {
        self.order > self.family.max_order()
    }

    /// Kernel whose convolution gives the derivative of this kernel's convolution.
    ///
    /// The zero kernel is its own derivative.
    pub fn derivative(&self) -> Kernel {
        if self.is_zero() {
            *self
        } else {
            Kernel {
                family: self.family,
                order: self.order + 1,
            }
        }
    }

    /// Short identifying name.
    pub fn name(&self) -> &'static str {
        use KernelFamily::*;
        if self.is_zero() {
            return "Zero";
        }
        match (self.family, self.order) {
            (Box, _) => "Box",
            (Tent, 0) => "Tent",
            (Tent, _) => "DTent",
            (BSpline2, 0) => "BSpline2",
            (BSpline2, 1) => "DBSpline2",
            (BSpline2, _) => "DDBSpline2",
            (BSpline3, 0) => "BSpline3",
            (BSpline3, 1) => "dBSpline3",
            (BSpline3, 2) => "ddBSpline3",
            (BSpline3, _) => "dddBSpline3",
        }
    }

    /// Evaluate the kernel at offset `x`.
    pub fn eval(&self, x: f32) -> f32 {
        use KernelFamily::*;
        if self.is_zero() {
            return 0.0;
        }
        let ax = x.abs();
        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        match (self.family, self.order) {
            (Box, _) => {
                if (-0.5..0.5).contains(&x) {
                    1.0
                } else {
                    0.0
                }
            }
            (Tent, 0) => {
                if x < -1.0 {
                    0.0
                } else if x < 0.0 {
                    x + 1.0
                } else if x < 1.0 {
                    1.0 - x
                } else {
                    0.0
                }
            }
            (Tent, _) => {
                if x < -1.0 {
                    0.0
                } else if x < 0.0 {
                    1.0
                } else if x < 1.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            (BSpline2, 0) => {
                if ax < 0.5 {
                    0.75 - ax * ax
                } else if ax < 1.5 {
                    (ax - 1.5) * (ax - 1.5) / 2.0
                } else {
                    0.0
                }
            }
            (BSpline2, 1) => {
                let res = if ax < 0.5 {
                    -2.0 * ax
                } else if ax < 1.5 {
                    ax - 1.5
                } else {
                    0.0
                };
                sign * res
            }
            (BSpline2, _) => {
                if ax < 0.5 {
                    -2.0
                } else if ax < 1.5 {
                    1.0
                } else {
                    0.0
                }
            }
            (BSpline3, 0) => {
                if ax < 1.0 {
                    2.0 / 3.0 + ax * ax * (-1.0 + ax / 2.0)
                } else if ax < 2.0 {
                    1.0 / 6.0 + (ax - 1.0) * (-0.5 + (ax - 1.0) * (0.5 - (ax - 1.0) / 6.0))
                } else {
                    0.0
                }
            }
            (BSpline3, 1) => {
                let res = if ax < 1.0 {
                    ax * (-2.0 + ax * 1.5)
                } else if ax < 2.0 {
                    -0.5 + (ax - 1.0) * (1.0 - (ax - 1.0) / 2.0)
                } else {
                    0.0
                };
                sign * res
            }
            (BSpline3, 2) => {
                if ax < 1.0 {
                    -2.0 + 3.0 * ax
                } else if ax < 2.0 {
                    1.0 - (ax - 1.0)
                } else {
                    0.0
                }
            }
            (BSpline3, _) => {
                let res = if ax < 1.0 {
                    3.0
                } else if ax < 2.0 {
                    -1.0
                } else {
                    0.0
                };
                sign * res
            }
        }
    }

    /// Weights of all `support` taps around the fractional offset `x`.
    ///
    /// `x` is in `[0, 1)` for even support and in `[-0.5, 0.5)` for odd support.
    /// Tap `i` is the weight of the lattice sample at `first tap + i`.
    pub fn apply(&self, x: f32) -> TapWeights {
        use KernelFamily::*;
        if self.is_zero() {
            return [0.0; 4];
        }
        match (self.family, self.order) {
            (Box, _) => [1.0, 0.0, 0.0, 0.0],
            (Tent, 0) => [1.0 - x, x, 0.0, 0.0],
            (Tent, _) => [-1.0, 1.0, 0.0, 0.0],
            (BSpline2, 0) => [
                1.0 / 8.0 + x * (-0.5 + x / 2.0),
                3.0 / 4.0 - x * x,
                1.0 / 8.0 + x * (0.5 + x / 2.0),
                0.0,
            ],
            (BSpline2, 1) => [x - 0.5, -2.0 * x, x + 0.5, 0.0],
            (BSpline2, _) => [1.0, -2.0, 1.0, 0.0],
            (BSpline3, 0) => [
                1.0 / 6.0 + x * (-0.5 + x * (0.5 - x / 6.0)),
                2.0 / 3.0 + x * x * (-1.0 + x / 2.0),
                1.0 / 6.0 + x * (0.5 + x * (0.5 - x / 2.0)),
                x * x * x / 6.0,
            ],
            (BSpline3, 1) => [
                -0.5 + x * (1.0 - x / 2.0),
                x * (-2.0 + x * 3.0 / 2.0),
                0.5 + x * (1.0 - 3.0 * x / 2.0),
                x * x / 2.0,
            ],
            (BSpline3, 2) => [1.0 - x, -2.0 + 3.0 * x, 1.0 - 3.0 * x, x],
            (BSpline3, _) => [-1.0, 3.0, -3.0, 1.0],
        }
    }
}

impl From<KernelFamily> for Kernel {
    fn from(family: KernelFamily) -> Self {
        Kernel::new(family)
    }
}
