//! Regularized least squares and weighted quaternion averaging.

use nalgebra::{DMatrix, DVector, Matrix4, Quaternion, SymmetricEigen, UnitQuaternion};

/// Moore-Penrose pseudo-inverse via SVD.
///
/// Singular values below `epsilon * max(rows, cols) * σ_max` are treated as
/// zero, so rank-deficient and ill-conditioned inputs never blow up.
///
/// # Examples
///
/// ```
/// use rig_rbf::pseudo_inverse;
/// use nalgebra::DMatrix;
///
/// let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
/// let inv = pseudo_inverse(&a, f64::EPSILON);
/// assert!((inv[(0, 0)] - 0.5).abs() < 1e-12);
/// assert!((inv[(1, 1)] - 0.25).abs() < 1e-12);
/// ```
#[must_use]
pub fn pseudo_inverse(a: &DMatrix<f64>, epsilon: f64) -> DMatrix<f64> {
    let svd = a.clone().svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
        return DMatrix::zeros(a.ncols(), a.nrows());
    };

    let max_singular = svd.singular_values.iter().copied().fold(0.0, f64::max);
    let tolerance = epsilon * a.nrows().max(a.ncols()) as f64 * max_singular;
    let inverted = svd
        .singular_values
        .map(|s| if s > tolerance { 1.0 / s } else { 0.0 });

    v_t.transpose() * DMatrix::from_diagonal(&inverted) * u.transpose()
}

/// Solves for the sample-weight matrix `theta` (samples × columns).
///
/// Each sample's target is its one-hot indicator, so `theta * row` gives the
/// contribution of every sample to a query rather than the outputs directly.
#[must_use]
pub fn solve_theta(m: &DMatrix<f64>, regularization: f64, epsilon: f64) -> DMatrix<f64> {
    let mt = m.transpose();
    let mut normal = &mt * m;
    for i in 0..normal.nrows() {
        normal[(i, i)] += regularization;
    }
    (pseudo_inverse(&normal, epsilon) * mt).transpose()
}

/// Scales weights to unit length. All-zero weights are returned unchanged.
#[must_use]
pub fn normalize_weights(weights: &DVector<f64>) -> DVector<f64> {
    weights
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(|| weights.clone())
}

/// Weighted average of unit quaternions.
///
/// Returns the dominant eigenvector of `Σ wᵢ² qᵢ qᵢᵀ`, which is insensitive
/// to the sign of each `qᵢ`. The result is canonicalized to `w >= 0`. With no
/// quaternions, or all weights zero, the identity is returned.
///
/// # Examples
///
/// ```
/// use rig_rbf::average_quaternion;
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let a = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.2);
/// let b = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.6);
/// let avg = average_quaternion(&[a, b], &[1.0, 1.0]);
/// assert!((avg.angle() - 0.4).abs() < 1e-3);
/// ```
#[must_use]
pub fn average_quaternion(quats: &[UnitQuaternion<f64>], weights: &[f64]) -> UnitQuaternion<f64> {
    let mut accumulator = Matrix4::zeros();
    let mut total = 0.0;
    for (q, w) in quats.iter().zip(weights) {
        let w2 = w * w;
        accumulator += q.coords * q.coords.transpose() * w2;
        total += w2;
    }
    if total <= f64::EPSILON {
        return UnitQuaternion::identity();
    }

    let eigen = SymmetricEigen::new(accumulator);
    let (dominant, _) = eigen.eigenvalues.argmax();
    let v = eigen.eigenvectors.column(dominant).into_owned();
    let q = Quaternion::from_vector(v);
    let q = if q.w < 0.0 { -q } else { q };
    UnitQuaternion::new_normalize(q)
}
