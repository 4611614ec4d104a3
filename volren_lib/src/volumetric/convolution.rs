use nalgebra::{Point3, Vector3};

use crate::kernel::{Kernel, TapWeights};

use super::Volume;

/// Iteration bounds of a kernel's support around the lattice cell.
///
/// For even support the cell is `floor(index)` and taps run from `1 - support / 2` to `support / 2`.
/// For odd support the cell is the nearest lattice point and taps are symmetric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvoParams {
    /// Added to the index position before flooring
    pub n_offset: f32,
    pub min: i64,
    pub max: i64,
}

impl ConvoParams {
    pub fn from_kernel(kernel: &Kernel) -> ConvoParams {
        let support = kernel.support() as i64;
        if support % 2 == 0 {
            let max = support / 2;
            ConvoParams {
                n_offset: 0.0,
                min: 1 - max,
                max,
            }
        } else {
            let max = (support - 1) / 2;
            ConvoParams {
                n_offset: 0.5,
                min: -max,
                max,
            }
        }
    }

    /// Number of taps per axis.
    pub fn span(&self) -> usize {
        (self.max - self.min + 1) as usize
    }
}

/// Resamples a volume and its gradient at arbitrary world positions.
///
/// One instance per worker, reused for every sample.
/// All state of a sample lives in fixed-size arrays, nothing is allocated per sample.
#[derive(Debug, Clone)]
pub struct Convolution {
    kernel: Kernel,
    derivative: Kernel,
    params: ConvoParams,
    // Cached tap weights per axis
    weights: [TapWeights; 3],
    d_weights: [TapWeights; 3],
    index: Point3<f32>,
    inside: bool,
    value: f32,
    gradient: Vector3<f32>,
}

impl Convolution {
    pub fn new(kernel: Kernel) -> Convolution {
        Convolution::with_params(kernel, ConvoParams::from_kernel(&kernel))
    }

    /// Sampler using iteration bounds computed ahead of time, see [`ConvoParams::from_kernel`].
    pub fn with_params(kernel: Kernel, params: ConvoParams) -> Convolution {
        Convolution {
            kernel,
            derivative: kernel.derivative(),
            params,
            weights: [[0.0; 4]; 3],
            d_weights: [[0.0; 4]; 3],
            index: Point3::origin(),
            inside: false,
            value: 0.0,
            gradient: Vector3::zeros(),
        }
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn params(&self) -> ConvoParams {
        self.params
    }

    /// Index space position of the last sample.
    pub fn index(&self) -> Point3<f32> {
        self.index
    }

    /// Whether the last sample's support lay inside the volume.
    pub fn inside(&self) -> bool {
        self.inside
    }

    /// Convolved value of the last valid sample.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// World space gradient of the last valid sample.
    pub fn gradient(&self) -> Vector3<f32> {
        self.gradient
    }

    /// Sample `volume` at world position `world`.
    ///
    /// Returns `false` if any tap falls outside the volume, value and gradient are then stale.
    pub fn eval(&mut self, volume: &Volume, world: &Point3<f32>) -> bool {
        self.index = volume.to_index_space(world);

        let extents = volume.extents();
        let ConvoParams { n_offset, min, max } = self.params;

        let mut cell = [0i64; 3];
        for axis in 0..3 {
            let pos = self.index[axis];
            let n = (pos + n_offset).floor();
            if !n.is_finite() {
                self.inside = false;
                return false;
            }
            // Checked in floats, far positions do not fit the cell index
            if n + (min as f32) < 0.0 || n + (max as f32) >= extents[axis] as f32 {
                self.inside = false;
                return false;
            }
            let alpha = pos - n;
            cell[axis] = n as i64;
            self.weights[axis] = self.kernel.apply(alpha);
            self.d_weights[axis] = self.derivative.apply(alpha);
        }
        self.inside = true;

        let data = volume.data();
        let (ex, ey) = (extents.x, extents.y);
        let span = self.params.span();

        let [wx, wy, wz] = &self.weights;
        let [dwx, dwy, dwz] = &self.d_weights;

        let mut value = 0.0;
        let mut gradient = Vector3::zeros();

        // Bounds checked above, every index below is in range
        for k in 0..span {
            let z = (cell[2] + min) as usize + k;
            for j in 0..span {
                let y = (cell[1] + min) as usize + j;
                let row = ex * (y + ey * z);
                for i in 0..span {
                    let x = (cell[0] + min) as usize + i;
                    let v = data[x + row];

                    value += v * wx[i] * wy[j] * wz[k];
                    gradient.x += v * dwx[i] * wy[j] * wz[k];
                    gradient.y += v * wx[i] * dwy[j] * wz[k];
                    gradient.z += v * wx[i] * wy[j] * dwz[k];
                }
            }
        }

        self.value = value;
        self.gradient = volume.gradient_to_world() * gradient;
        true
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::kernel::KernelFamily;
    use nalgebra::{point, vector, Matrix4};

    // Value equals the x index
    fn ramp_volume(size: usize, transform: Matrix4<f32>) -> Volume {
        let mut data = Vec::with_capacity(size * size * size);
        for _z in 0..size {
            for _y in 0..size {
                for x in 0..size {
                    data.push(x as f32);
                }
            }
        }
        Volume::new(vector![size, size, size], transform, data).unwrap()
    }

    fn counting_volume() -> Volume {
        let data = (0..60).map(|v| (v * 7 % 13) as f32).collect();
        Volume::new(vector![3, 4, 5], Matrix4::identity(), data).unwrap()
    }

    #[test]
    fn params() {
        let p = |f| ConvoParams::from_kernel(&Kernel::new(f));
        assert_eq!(
            p(KernelFamily::Box),
            ConvoParams {
                n_offset: 0.5,
                min: 0,
                max: 0
            }
        );
        assert_eq!(
            p(KernelFamily::Tent),
            ConvoParams {
                n_offset: 0.0,
                min: 0,
                max: 1
            }
        );
        assert_eq!(
            p(KernelFamily::BSpline2),
            ConvoParams {
                n_offset: 0.5,
                min: -1,
                max: 1
            }
        );
        assert_eq!(
            p(KernelFamily::BSpline3),
            ConvoParams {
                n_offset: 0.0,
                min: -1,
                max: 2
            }
        );
    }

    #[test]
    fn box_reproduces_lattice() {
        let vol = counting_volume();
        let mut convo = Convolution::new(Kernel::new(KernelFamily::Box));

        for z in 0..5 {
            for y in 0..4 {
                for x in 0..3 {
                    let pos = point![x as f32, y as f32, z as f32];
                    assert!(convo.eval(&vol, &pos));
                    assert_eq!(Some(convo.value()), vol.get_data(x, y, z));
                    assert_eq!(convo.gradient(), Vector3::zeros());
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_is_invalid() {
        let vol = counting_volume();
        let mut convo = Convolution::new(Kernel::new(KernelFamily::Tent));

        assert!(convo.eval(&vol, &point![0.0, 0.0, 0.0]));
        assert!(convo.inside());
        // Tent needs the next sample too
        assert!(!convo.eval(&vol, &point![2.0, 0.0, 0.0]));
        assert!(!convo.inside());
        assert!(!convo.eval(&vol, &point![-0.1, 1.0, 1.0]));
        assert!(!convo.eval(&vol, &point![1.0, 1.0, 40.0]));
        assert!(!convo.eval(&vol, &point![f32::NAN, 1.0, 1.0]));

        let mut convo = Convolution::new(Kernel::new(KernelFamily::Box));
        assert!(convo.eval(&vol, &point![-0.4, 0.0, 0.0]));
        assert!(!convo.eval(&vol, &point![-0.6, 0.0, 0.0]));
        assert!(!convo.eval(&vol, &point![2.5, 0.0, 0.0]));
    }

    #[test]
    fn far_position_is_invalid() {
        let vol = Volume::new(
            vector![4, 4, 4],
            Matrix4::new_scaling(1e-12),
            vec![1.0; 64],
        )
        .unwrap();

        for family in [KernelFamily::Box, KernelFamily::Tent, KernelFamily::BSpline3] {
            let mut convo = Convolution::new(Kernel::new(family));
            assert!(!convo.eval(&vol, &point![1e8, 0.0, 0.0]));
            assert!(!convo.eval(&vol, &point![0.0, -1e8, 0.0]));
            assert!(!convo.eval(&vol, &point![0.0, 0.0, f32::MAX]));
            assert!(!convo.inside());
        }
    }

    #[test]
    fn precomputed_params() {
        let kernel = Kernel::new(KernelFamily::BSpline2);
        let convo = Convolution::with_params(kernel, ConvoParams::from_kernel(&kernel));
        assert_eq!(convo.params(), Convolution::new(kernel).params());
        assert_eq!(convo.params().span(), 3);
    }

    #[test]
    fn tent_interpolates() {
        let vol = ramp_volume(4, Matrix4::identity());
        let mut convo = Convolution::new(Kernel::new(KernelFamily::Tent));

        assert!(convo.eval(&vol, &point![1.25, 1.5, 2.0]));
        assert_eq!(convo.value(), 1.25);
        assert_eq!(convo.gradient(), vector![1.0, 0.0, 0.0]);
    }

    #[test]
    fn bspline_reproduces_linear_field() {
        let vol = ramp_volume(6, Matrix4::identity());

        for family in [KernelFamily::BSpline2, KernelFamily::BSpline3] {
            let mut convo = Convolution::new(Kernel::new(family));
            assert!(convo.eval(&vol, &point![2.3, 2.6, 2.0]));
            assert!((convo.value() - 2.3).abs() < 1e-5);
            assert!((convo.gradient() - vector![1.0, 0.0, 0.0]).norm() < 1e-5);
        }
    }

    #[test]
    fn gradient_in_world_space() {
        // Voxels twice as long in x, field changes half as fast per world unit
        let transform = Matrix4::new_nonuniform_scaling(&vector![2.0, 1.0, 1.0]);
        let vol = ramp_volume(4, transform);
        let mut convo = Convolution::new(Kernel::new(KernelFamily::Tent));

        assert!(convo.eval(&vol, &point![3.0, 1.0, 1.0]));
        assert_eq!(convo.index(), point![1.5, 1.0, 1.0]);
        assert_eq!(convo.value(), 1.5);
        assert_eq!(convo.gradient(), vector![0.5, 0.0, 0.0]);
    }
}
