//! Per-bucket regression solver.
//!
//! A [`SolverState`] is built once from a set of samples and is never
//! patched afterwards. Changing samples or configuration means building a new
//! state; [`fingerprint`] tells the caller when that is needed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use nalgebra::{DMatrix, DVector, UnitQuaternion};
use tracing::debug;

use crate::features::FeatureSpace;
use crate::regression::{average_quaternion, normalize_weights, solve_theta};
use crate::{RbfConfig, RbfError, RbfResult, RotationDistance, Sample};

/// Feature and output counts shared by every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLayout {
    /// Scalar input features.
    pub values: usize,
    /// Rotation input features.
    pub rotations: usize,
    /// Scalar outputs.
    pub outputs: usize,
    /// Rotation outputs.
    pub output_rotations: usize,
}

impl SampleLayout {
    /// Reads the layout from the first sample and checks the others against it.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::DimensionMismatch`] naming the first sample that
    /// disagrees.
    pub fn of(samples: &[Sample]) -> RbfResult<Option<Self>> {
        let Some(first) = samples.first() else {
            return Ok(None);
        };
        let layout = Self {
            values: first.values.len(),
            rotations: first.rotations.len(),
            outputs: first.outputs.len(),
            output_rotations: first.output_rotations.len(),
        };
        for (i, s) in samples.iter().enumerate().skip(1) {
            let checks = [
                ("values", layout.values, s.values.len()),
                ("rotations", layout.rotations, s.rotations.len()),
                ("outputs", layout.outputs, s.outputs.len()),
                (
                    "output rotations",
                    layout.output_rotations,
                    s.output_rotations.len(),
                ),
            ];
            if let Some((field, expected, found)) = checks.into_iter().find(|(_, e, f)| e != f) {
                return Err(RbfError::DimensionMismatch {
                    sample: i,
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(Some(layout))
    }

    /// Checks a query against this layout.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::QueryMismatch`] if either count differs.
    pub fn check_query(&self, values: &[f64], rotations: &[UnitQuaternion<f64>]) -> RbfResult<()> {
        if values.len() != self.values {
            return Err(RbfError::QueryMismatch {
                field: "values",
                expected: self.values,
                found: values.len(),
            });
        }
        if rotations.len() != self.rotations {
            return Err(RbfError::QueryMismatch {
                field: "rotations",
                expected: self.rotations,
                found: rotations.len(),
            });
        }
        Ok(())
    }
}

/// Result of evaluating one solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput {
    /// Raw contribution of each sample (`theta * row`).
    pub weights: DVector<f64>,
    /// Interpolated scalar outputs.
    pub values: DVector<f64>,
    /// Interpolated rotation outputs.
    pub rotations: Vec<UnitQuaternion<f64>>,
}

impl SolverOutput {
    /// Output of a solver with fewer than two samples.
    pub fn empty() -> Self {
        Self {
            weights: DVector::zeros(0),
            values: DVector::zeros(0),
            rotations: Vec::new(),
        }
    }

    /// Whether the solver produced nothing (fewer than two samples).
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Solved state for one group of samples.
#[derive(Debug, Clone)]
pub struct SolverState {
    distance: RotationDistance,
    fingerprint: u64,
    sample_count: usize,
    layout: Option<SampleLayout>,
    features: Option<FeatureSpace>,
    theta: DMatrix<f64>,
    outputs: DMatrix<f64>,
    output_rotations: Vec<Vec<UnitQuaternion<f64>>>,
}

impl SolverState {
    /// An unsolved state that evaluates to empty results.
    pub fn empty(distance: RotationDistance) -> Self {
        Self {
            distance,
            fingerprint: 0,
            sample_count: 0,
            layout: None,
            features: None,
            theta: DMatrix::zeros(0, 0),
            outputs: DMatrix::zeros(0, 0),
            output_rotations: Vec::new(),
        }
    }

    /// Builds the solver for `samples`, comparing rotations per `distance`.
    ///
    /// Zero or one sample yields a state whose evaluations are empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the samples
    /// disagree on feature or output counts.
    pub fn build(
        samples: &[Sample],
        distance: RotationDistance,
        config: &RbfConfig,
    ) -> RbfResult<Self> {
        config.validate()?;
        let layout = SampleLayout::of(samples)?;

        let mut state = Self::empty(distance);
        state.fingerprint = fingerprint(samples, config);
        state.layout = layout;
        state.sample_count = samples.len();

        if samples.len() <= 1 {
            return Ok(state);
        }

        let (features, m) = FeatureSpace::build(samples, distance, config);
        state.theta = solve_theta(&m, config.regularization, config.pinv_epsilon);
        state.outputs = DMatrix::from_fn(samples.len(), layout.map_or(0, |l| l.outputs), |i, j| {
            samples[i].outputs[j]
        });
        state.output_rotations = samples.iter().map(|s| s.output_rotations.clone()).collect();

        debug!(
            samples = samples.len(),
            columns = features.columns(),
            ?distance,
            "built RBF solver"
        );
        state.features = Some(features);
        Ok(state)
    }

    /// Rotation comparison mode of this solver.
    pub fn distance(&self) -> RotationDistance {
        self.distance
    }

    /// Whether a solve happened (at least two samples).
    pub fn is_solved(&self) -> bool {
        self.features.is_some()
    }

    /// Number of samples the solver was built from.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Whether this state was built from different samples or configuration.
    pub fn is_stale(&self, fingerprint: u64) -> bool {
        self.fingerprint != fingerprint
    }

    /// Rotation outputs of sample `index`.
    pub fn output_rotations(&self, index: usize) -> &[UnitQuaternion<f64>] {
        self.output_rotations.get(index).map_or(&[][..], Vec::as_slice)
    }

    /// Raw per-sample weights for a query.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::QueryMismatch`] if the query does not match the
    /// training layout.
    pub fn weights(
        &self,
        values: &[f64],
        rotations: &[UnitQuaternion<f64>],
    ) -> RbfResult<DVector<f64>> {
        if let Some(layout) = &self.layout {
            layout.check_query(values, rotations)?;
        }
        let Some(features) = &self.features else {
            return Ok(DVector::zeros(0));
        };
        Ok(&self.theta * features.query_row(values, rotations))
    }

    /// Evaluates scalar and rotation outputs for a query.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::QueryMismatch`] if the query does not match the
    /// training layout.
    pub fn evaluate(
        &self,
        values: &[f64],
        rotations: &[UnitQuaternion<f64>],
    ) -> RbfResult<SolverOutput> {
        let weights = self.weights(values, rotations)?;
        if weights.is_empty() {
            return Ok(SolverOutput::empty());
        }

        let outputs = self.outputs.tr_mul(&weights);
        let normalized = normalize_weights(&weights);
        let rotation_count = self.layout.map_or(0, |l| l.output_rotations);
        let rotations = (0..rotation_count)
            .map(|p| {
                let quats: Vec<_> = self.output_rotations.iter().map(|s| s[p]).collect();
                average_quaternion(&quats, normalized.as_slice())
            })
            .collect();

        Ok(SolverOutput {
            weights,
            values: outputs,
            rotations,
        })
    }
}

/// Hashes every sample and configuration field that affects a solve.
pub fn fingerprint(samples: &[Sample], config: &RbfConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_config(config, &mut hasher);
    samples.len().hash(&mut hasher);
    for sample in samples {
        hash_sample(sample, &mut hasher);
    }
    hasher.finish()
}

fn hash_f64s<H: Hasher>(values: impl IntoIterator<Item = f64>, hasher: &mut H) {
    for v in values {
        v.to_bits().hash(hasher);
    }
}

fn hash_quats<H: Hasher>(quats: &[UnitQuaternion<f64>], hasher: &mut H) {
    quats.len().hash(hasher);
    for q in quats {
        hash_f64s(q.coords.iter().copied(), hasher);
    }
}

fn hash_config<H: Hasher>(config: &RbfConfig, hasher: &mut H) {
    config.kernel.hash(hasher);
    config.output_mode.hash(hasher);
    hash_f64s(
        [config.radius, config.regularization, config.pinv_epsilon],
        hasher,
    );
    hash_f64s(config.twist_axis.unit().iter().copied(), hasher);
}

fn hash_sample<H: Hasher>(sample: &Sample, hasher: &mut H) {
    sample.values.len().hash(hasher);
    hash_f64s(sample.values.iter().copied(), hasher);
    hash_quats(&sample.rotations, hasher);
    sample.outputs.len().hash(hasher);
    hash_f64s(sample.outputs.iter().copied(), hasher);
    hash_quats(&sample.output_rotations, hasher);
    sample.distance.hash(hasher);
    sample.radius.map(f64::to_bits).hash(hasher);
    sample.is_neutral.hash(hasher);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::RbfKernel;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn line_samples() -> Vec<Sample> {
        vec![
            Sample::scalar(vec![0.0]).with_outputs(vec![0.0]),
            Sample::scalar(vec![1.0]).with_outputs(vec![10.0]),
            Sample::scalar(vec![2.0]).with_outputs(vec![20.0]),
        ]
    }

    #[test]
    fn test_linear_interpolation_between_samples() {
        let state =
            SolverState::build(&line_samples(), RotationDistance::SwingTwist, &RbfConfig::default())
                .unwrap();
        let out = state.evaluate(&[0.5], &[]).unwrap();
        assert_relative_eq!(out.values[0], 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exact_at_training_points() {
        for kernel in [RbfKernel::Linear, RbfKernel::Gaussian, RbfKernel::Multiquadric] {
            let config = RbfConfig::default().with_kernel(kernel);
            let state =
                SolverState::build(&line_samples(), RotationDistance::SwingTwist, &config).unwrap();
            for (x, y) in [(0.0, 0.0), (1.0, 10.0), (2.0, 20.0)] {
                let out = state.evaluate(&[x], &[]).unwrap();
                assert_relative_eq!(out.values[0], y, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_rotation_output_at_training_point() {
        let bend = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.0);
        let samples = vec![
            Sample::new(vec![], vec![UnitQuaternion::identity()])
                .with_output_rotations(vec![UnitQuaternion::identity()]),
            Sample::new(vec![], vec![bend])
                .with_output_rotations(vec![UnitQuaternion::from_axis_angle(
                    &Vector3::x_axis(),
                    0.5,
                )]),
        ];
        let state =
            SolverState::build(&samples, RotationDistance::Swing, &RbfConfig::default()).unwrap();
        let out = state.evaluate(&[], &[bend]).unwrap();
        assert_relative_eq!(out.rotations[0].angle(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_and_one_sample_are_empty() {
        let config = RbfConfig::default();
        let none = SolverState::build(&[], RotationDistance::Swing, &config).unwrap();
        assert!(!none.is_solved());
        assert!(none.evaluate(&[1.0], &[]).unwrap().is_empty());

        let one =
            SolverState::build(&line_samples()[..1], RotationDistance::Swing, &config).unwrap();
        assert!(!one.is_solved());
        assert!(one.evaluate(&[1.0], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut samples = line_samples();
        samples[2].outputs.push(1.0);
        let err = SolverState::build(&samples, RotationDistance::Swing, &RbfConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RbfError::DimensionMismatch {
                sample: 2,
                field: "outputs",
                ..
            }
        ));
    }

    #[test]
    fn test_query_mismatch() {
        let state =
            SolverState::build(&line_samples(), RotationDistance::Swing, &RbfConfig::default())
                .unwrap();
        assert!(matches!(
            state.evaluate(&[1.0, 2.0], &[]),
            Err(RbfError::QueryMismatch { field: "values", .. })
        ));
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let config = RbfConfig::default();
        let samples = line_samples();
        let state = SolverState::build(&samples, RotationDistance::Swing, &config).unwrap();
        assert!(!state.is_stale(fingerprint(&samples, &config)));

        let mut moved = samples.clone();
        moved[1].values[0] = 1.5;
        assert!(state.is_stale(fingerprint(&moved, &config)));
        assert!(state.is_stale(fingerprint(&samples, &config.clone().with_radius(2.0))));
    }

    #[test]
    fn test_regularization_shrinks_towards_zero() {
        let plain =
            SolverState::build(&line_samples(), RotationDistance::Swing, &RbfConfig::default())
                .unwrap();
        let damped = SolverState::build(
            &line_samples(),
            RotationDistance::Swing,
            &RbfConfig::default().with_regularization(10.0),
        )
        .unwrap();
        let exact = plain.evaluate(&[2.0], &[]).unwrap().values[0];
        let shrunk = damped.evaluate(&[2.0], &[]).unwrap().values[0];
        assert!(shrunk.abs() < exact.abs());
    }
}
