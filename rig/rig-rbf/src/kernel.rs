//! Radial basis kernels.
//!
//! Every kernel is evaluated on a non-negative distance together with a
//! radius. Non-positive radii are replaced with [`MIN_RADIUS`] so no kernel
//! divides by zero.

use nalgebra::{DMatrix, DVector};

/// Radius used in place of a non-positive radius.
pub const MIN_RADIUS: f64 = 0.001;

/// Gaussian width as a fraction of the radius.
const GAUSSIAN_FALLOFF: f64 = 0.4;

/// RBF kernel function type.
///
/// # Examples
///
/// ```
/// use rig_rbf::RbfKernel;
///
/// let gaussian = RbfKernel::Gaussian;
/// assert!((gaussian.evaluate(0.0, 1.0) - 1.0).abs() < 1e-12);
///
/// // Wendland C2 has compact support
/// assert_eq!(RbfKernel::WendlandC2.evaluate(1.5, 1.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RbfKernel {
    /// `x`. The radius is ignored.
    #[default]
    Linear,

    /// `exp(-x² / (2·(0.4·r)²))`
    ///
    /// Smooth, local influence; most of the falloff happens inside the radius.
    Gaussian,

    /// `v² ln v` with `v = x / r`.
    ThinPlate,

    /// `√(x² + r²)`
    Multiquadric,

    /// `1 / √(x² + r²)`
    InverseMultiquadric,

    /// Wendland C2: `(1 - v)⁴ (4v + 1)` for `v = x / r < 1`, zero beyond.
    WendlandC2,
}

impl RbfKernel {
    /// Evaluates the kernel at distance `x` with the given radius.
    #[must_use]
    pub fn evaluate(&self, x: f64, radius: f64) -> f64 {
        let r = if radius > 0.0 { radius } else { MIN_RADIUS };
        match self {
            Self::Linear => x,
            Self::Gaussian => {
                let width = r * GAUSSIAN_FALLOFF;
                (-(x * x) / (2.0 * width * width)).exp()
            }
            Self::ThinPlate => {
                let v = x / r;
                if v > 0.0 { v * v * v.ln() } else { v }
            }
            Self::Multiquadric => (x * x + r * r).sqrt(),
            Self::InverseMultiquadric => 1.0 / (x * x + r * r).sqrt(),
            Self::WendlandC2 => {
                let v = x / r;
                let falloff = 1.0 - v;
                if falloff > 0.0 {
                    falloff.powi(4) * (4.0 * v + 1.0)
                } else {
                    0.0
                }
            }
        }
    }

    /// Applies the kernel in place to every element of a matrix.
    pub fn apply_to_matrix(&self, m: &mut DMatrix<f64>, radius: f64) {
        if *self == Self::Linear {
            return;
        }
        m.apply(|x| *x = self.evaluate(*x, radius));
    }

    /// Applies the kernel in place to a contiguous run of a vector.
    pub fn apply_to_segment(&self, v: &mut DVector<f64>, start: usize, len: usize, radius: f64) {
        if *self == Self::Linear {
            return;
        }
        for x in v.rows_mut(start, len).iter_mut() {
            *x = self.evaluate(*x, radius);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [RbfKernel; 6] = [
        RbfKernel::Linear,
        RbfKernel::Gaussian,
        RbfKernel::ThinPlate,
        RbfKernel::Multiquadric,
        RbfKernel::InverseMultiquadric,
        RbfKernel::WendlandC2,
    ];

    #[test]
    fn test_linear_is_identity() {
        for x in [0.0, 0.25, 3.0] {
            assert_eq!(RbfKernel::Linear.evaluate(x, 0.5), x);
        }
    }

    #[test]
    fn test_gaussian_falloff() {
        let at_zero = RbfKernel::Gaussian.evaluate(0.0, 1.0);
        let at_radius = RbfKernel::Gaussian.evaluate(1.0, 1.0);
        assert_relative_eq!(at_zero, 1.0);
        assert_relative_eq!(at_radius, (-1.0 / (2.0 * 0.16_f64)).exp(), epsilon = 1e-12);
        assert!(at_radius > 0.0);
    }

    #[test]
    fn test_thin_plate() {
        assert_eq!(RbfKernel::ThinPlate.evaluate(0.0, 1.0), 0.0);
        assert_relative_eq!(RbfKernel::ThinPlate.evaluate(1.0, 1.0), 0.0);
        assert_relative_eq!(
            RbfKernel::ThinPlate.evaluate(2.0, 1.0),
            4.0 * 2.0_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_wendland_compact_support() {
        assert_relative_eq!(RbfKernel::WendlandC2.evaluate(0.0, 2.0), 1.0);
        assert_eq!(RbfKernel::WendlandC2.evaluate(2.0, 2.0), 0.0);
        assert_eq!(RbfKernel::WendlandC2.evaluate(7.5, 2.0), 0.0);
        assert!(RbfKernel::WendlandC2.evaluate(1.0, 2.0) > 0.0);
    }

    #[test]
    fn test_inverse_multiquadric_positive() {
        for x in [0.0, 1.0, 100.0] {
            assert!(RbfKernel::InverseMultiquadric.evaluate(x, 0.5) > 0.0);
        }
    }

    #[test]
    fn test_non_positive_radius_is_finite() {
        for kernel in ALL {
            for radius in [0.0, -1.0] {
                assert!(kernel.evaluate(0.0, radius).is_finite(), "{kernel:?}");
                assert!(kernel.evaluate(0.5, radius).is_finite(), "{kernel:?}");
            }
        }
    }

    #[test]
    fn test_apply_to_segment_leaves_rest() {
        let mut v = DVector::from_vec(vec![0.5, 0.5, 0.5, 0.5]);
        RbfKernel::Gaussian.apply_to_segment(&mut v, 1, 2, 1.0);
        assert_eq!(v[0], 0.5);
        assert_eq!(v[3], 0.5);
        assert_relative_eq!(v[1], RbfKernel::Gaussian.evaluate(0.5, 1.0));
    }
}
