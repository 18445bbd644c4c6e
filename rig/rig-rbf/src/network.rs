//! Pose-space RBF network.
//!
//! A network owns its samples and configuration and keeps one solved
//! [`NetworkState`] behind an [`Arc`]. Samples are split into three buckets by
//! [`RotationDistance`], each solved independently, and the bucket results
//! are merged at evaluation time.
//!
//! Rotation inputs are read relative to optional input rest rotations, so the
//! rest pose maps to the identity for every sample and query.
//!
//! # Output modes
//!
//! - [`OutputMode::Absolute`]: scalar outputs of all buckets are summed and
//!   rotation outputs of all buckets are averaged together. The raw weights of
//!   every bucket are merged first and normalized once.
//! - [`OutputMode::Relative`]: outputs are stored as offsets from the sample
//!   marked [`Sample::is_neutral`]. Rotation weight not claimed by other
//!   samples (`1 - Σw` of the raw weights, when positive) falls to the
//!   neutral pose.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use nalgebra::{DVector, UnitQuaternion};
use tracing::{debug, warn};

use crate::regression::{average_quaternion, normalize_weights};
use crate::solver::{SampleLayout, SolverState, fingerprint};
use crate::{OutputMode, RbfConfig, RbfError, RbfOutput, RbfResult, RotationDistance, Sample};

/// Samples of one [`RotationDistance`] and their solver.
#[derive(Debug, Clone)]
struct Bucket {
    solver: SolverState,
    /// Position of each bucket sample in the network's sample list.
    indices: Vec<usize>,
    neutral: Vec<bool>,
}

impl Bucket {
    fn empty(distance: RotationDistance) -> Self {
        Self {
            solver: SolverState::empty(distance),
            indices: Vec::new(),
            neutral: Vec::new(),
        }
    }
}

/// Immutable solved snapshot of an [`RbfNetwork`].
///
/// Snapshots are `Send + Sync` and may be evaluated from any thread.
#[derive(Debug, Clone)]
pub struct NetworkState {
    fingerprint: u64,
    output_mode: OutputMode,
    sample_count: usize,
    layout: Option<SampleLayout>,
    input_rest: Vec<UnitQuaternion<f64>>,
    neutral_values: Vec<f64>,
    neutral_rotations: Vec<UnitQuaternion<f64>>,
    buckets: [Bucket; 3],
}

impl NetworkState {
    fn empty() -> Self {
        Self {
            fingerprint: 0,
            output_mode: OutputMode::Absolute,
            sample_count: 0,
            layout: None,
            input_rest: Vec::new(),
            neutral_values: Vec::new(),
            neutral_rotations: Vec::new(),
            buckets: RotationDistance::ALL.map(Bucket::empty),
        }
    }

    /// Solves every bucket for the given samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the samples disagree
    /// on feature or output counts, or `input_rest` is neither empty nor one
    /// rotation per rotation feature.
    pub fn build(
        samples: &[Sample],
        config: &RbfConfig,
        input_rest: &[UnitQuaternion<f64>],
    ) -> RbfResult<Self> {
        config.validate()?;
        let layout = SampleLayout::of(samples)?;
        let rotation_count = layout.map_or(0, |l| l.rotations);
        if !input_rest.is_empty() && input_rest.len() != rotation_count {
            return Err(RbfError::RestMismatch {
                expected: rotation_count,
                found: input_rest.len(),
            });
        }

        let relative = config.output_mode == OutputMode::Relative;
        let (neutral_values, neutral_rotations) = match layout {
            Some(layout) if relative => neutral_outputs(samples, layout),
            _ => (Vec::new(), Vec::new()),
        };

        let prepared: Vec<Sample> = samples
            .iter()
            .map(|sample| {
                let mut s = sample.clone();
                s.rotations = rest_delta(&s.rotations, input_rest);
                if relative {
                    for (v, n) in s.outputs.iter_mut().zip(&neutral_values) {
                        *v -= n;
                    }
                    for (q, n) in s.output_rotations.iter_mut().zip(&neutral_rotations) {
                        *q = n.inverse() * *q;
                    }
                }
                s
            })
            .collect();

        let mut buckets = RotationDistance::ALL.map(Bucket::empty);
        for distance in RotationDistance::ALL {
            let indices: Vec<usize> = prepared
                .iter()
                .enumerate()
                .filter(|(_, s)| s.distance == distance)
                .map(|(i, _)| i)
                .collect();
            let subset: Vec<Sample> = indices.iter().map(|&i| prepared[i].clone()).collect();
            buckets[distance.index()] = Bucket {
                solver: SolverState::build(&subset, distance, config)?,
                neutral: indices.iter().map(|&i| samples[i].is_neutral).collect(),
                indices,
            };
        }

        debug!(
            samples = samples.len(),
            swing = buckets[0].indices.len(),
            twist = buckets[1].indices.len(),
            swing_twist = buckets[2].indices.len(),
            mode = ?config.output_mode,
            "rebuilt RBF network"
        );

        Ok(Self {
            fingerprint: network_fingerprint(samples, config, input_rest),
            output_mode: config.output_mode,
            sample_count: samples.len(),
            layout,
            input_rest: input_rest.to_vec(),
            neutral_values,
            neutral_rotations,
            buckets,
        })
    }

    /// Whether this snapshot was built from different inputs.
    pub fn is_stale(&self, fingerprint: u64) -> bool {
        self.fingerprint != fingerprint
    }

    /// Number of samples the snapshot was built from.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Solver for one bucket.
    pub fn solver(&self, distance: RotationDistance) -> &SolverState {
        &self.buckets[distance.index()].solver
    }

    /// Evaluates the network for a query.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::QueryMismatch`] if the query does not match the
    /// sample layout.
    pub fn evaluate(
        &self,
        values: &[f64],
        rotations: &[UnitQuaternion<f64>],
    ) -> RbfResult<RbfOutput> {
        let Some(layout) = self.layout else {
            return Ok(RbfOutput::default());
        };
        layout.check_query(values, rotations)?;

        let query = rest_delta(rotations, &self.input_rest);
        let relative = self.output_mode == OutputMode::Relative;

        let mut sum = DVector::zeros(layout.outputs);
        let mut weights = vec![0.0; self.sample_count];
        // (bucket, sample within bucket, raw weight) of every rotation contributor
        let mut contributors: Vec<(usize, usize, f64)> = Vec::new();
        let mut solved = false;

        for (b, bucket) in self.buckets.iter().enumerate() {
            let result = bucket.solver.evaluate(values, &query)?;
            if result.is_empty() {
                continue;
            }
            solved = true;
            sum += &result.values;
            let pairs = bucket.indices.iter().zip(result.weights.iter());
            for (local, (&global, &w)) in pairs.enumerate() {
                weights[global] = w;
                if relative && bucket.neutral[local] {
                    continue;
                }
                contributors.push((b, local, w));
            }
        }

        if !solved {
            return Ok(RbfOutput::default());
        }

        let values = sum
            .iter()
            .enumerate()
            .map(|(i, v)| v + self.neutral_values.get(i).copied().unwrap_or(0.0))
            .collect();

        let mut rotation_weights: Vec<f64> = contributors.iter().map(|c| c.2).collect();
        if relative {
            let claimed: f64 = rotation_weights.iter().sum();
            rotation_weights.push((1.0 - claimed).max(0.0));
        }
        let rotation_weights = normalize_weights(&DVector::from_vec(rotation_weights));

        let rotations = (0..layout.output_rotations)
            .map(|p| {
                let mut quats: Vec<UnitQuaternion<f64>> = contributors
                    .iter()
                    .map(|&(b, local, _)| self.buckets[b].solver.output_rotations(local)[p])
                    .collect();
                if relative {
                    quats.push(UnitQuaternion::identity());
                }
                let average = average_quaternion(&quats, rotation_weights.as_slice());
                match self.neutral_rotations.get(p) {
                    Some(neutral) if relative => neutral * average,
                    _ => average,
                }
            })
            .collect();

        Ok(RbfOutput {
            values,
            rotations,
            weights,
        })
    }
}

/// An RBF network that rebuilds itself lazily when its inputs change.
///
/// # Example
///
/// ```
/// use rig_rbf::{RbfConfig, RbfKernel, RbfNetwork, RotationDistance, Sample};
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let config = RbfConfig::default().with_kernel(RbfKernel::Gaussian);
/// let mut network = RbfNetwork::new(config).unwrap();
///
/// let rest = UnitQuaternion::identity();
/// let raised = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.4);
/// network.add_sample(Sample::new(vec![], vec![rest]).with_outputs(vec![0.0]));
/// network.add_sample(Sample::new(vec![], vec![raised]).with_outputs(vec![1.0]));
///
/// // Corrective shape weight driven by the shoulder rotation
/// let out = network.evaluate(&[], &[raised]).unwrap();
/// assert!((out.values[0] - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct RbfNetwork {
    config: RbfConfig,
    samples: Vec<Sample>,
    input_rest: Vec<UnitQuaternion<f64>>,
    state: Arc<NetworkState>,
}

impl RbfNetwork {
    /// Creates an empty network.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: RbfConfig) -> RbfResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            samples: Vec::new(),
            input_rest: Vec::new(),
            state: Arc::new(NetworkState::empty()),
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &RbfConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RbfError::InvalidConfig`] and keeps the old configuration if
    /// the new one is invalid.
    pub fn set_config(&mut self, config: RbfConfig) -> RbfResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Training samples in insertion order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Appends a sample.
    pub fn add_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Replaces all samples.
    pub fn set_samples(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
    }

    /// Mutable access to a sample.
    pub fn sample_mut(&mut self, index: usize) -> Option<&mut Sample> {
        self.samples.get_mut(index)
    }

    /// Sets the rest rotation of each rotation feature. Empty means identity.
    pub fn set_input_rest(&mut self, input_rest: Vec<UnitQuaternion<f64>>) {
        self.input_rest = input_rest;
    }

    /// Fingerprint of the current samples, configuration and rest rotations.
    pub fn fingerprint(&self) -> u64 {
        network_fingerprint(&self.samples, &self.config, &self.input_rest)
    }

    /// Whether the solved snapshot is out of date.
    pub fn is_stale(&self) -> bool {
        self.state.is_stale(self.fingerprint())
    }

    /// Returns an up-to-date snapshot, rebuilding it first if stale.
    ///
    /// The rebuild happens into a fresh snapshot; previously returned
    /// snapshots are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the samples or rest rotations are inconsistent.
    pub fn snapshot(&mut self) -> RbfResult<Arc<NetworkState>> {
        if self.is_stale() {
            self.state = Arc::new(NetworkState::build(
                &self.samples,
                &self.config,
                &self.input_rest,
            )?);
        }
        Ok(Arc::clone(&self.state))
    }

    /// Evaluates the network, rebuilding first if stale.
    ///
    /// # Errors
    ///
    /// Returns an error if a rebuild fails or the query does not match the
    /// samples.
    pub fn evaluate(
        &mut self,
        values: &[f64],
        rotations: &[UnitQuaternion<f64>],
    ) -> RbfResult<RbfOutput> {
        self.snapshot()?.evaluate(values, rotations)
    }
}

/// Outputs of the neutral sample, or zeros when none is marked.
fn neutral_outputs(
    samples: &[Sample],
    layout: SampleLayout,
) -> (Vec<f64>, Vec<UnitQuaternion<f64>>) {
    if let Some(neutral) = samples.iter().find(|s| s.is_neutral) {
        return (neutral.outputs.clone(), neutral.output_rotations.clone());
    }
    warn!(
        samples = samples.len(),
        "relative output mode without a neutral sample, offsets are taken from zero"
    );
    (
        vec![0.0; layout.outputs],
        vec![UnitQuaternion::identity(); layout.output_rotations],
    )
}

/// Expresses rotations relative to their rest rotations (`rest⁻¹ * q`).
fn rest_delta(
    rotations: &[UnitQuaternion<f64>],
    rest: &[UnitQuaternion<f64>],
) -> Vec<UnitQuaternion<f64>> {
    rotations
        .iter()
        .enumerate()
        .map(|(i, q)| rest.get(i).map_or(*q, |r| r.inverse() * q))
        .collect()
}

fn network_fingerprint(
    samples: &[Sample],
    config: &RbfConfig,
    input_rest: &[UnitQuaternion<f64>],
) -> u64 {
    let mut hasher = DefaultHasher::new();
    fingerprint(samples, config).hash(&mut hasher);
    input_rest.len().hash(&mut hasher);
    for q in input_rest {
        for c in q.coords.iter() {
            c.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::RbfKernel;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use rig_types::quaternion_distance;

    fn rz(angle: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
    }

    fn rx(angle: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle)
    }

    fn network(mode: OutputMode) -> RbfNetwork {
        RbfNetwork::new(RbfConfig::default().with_output_mode(mode)).unwrap()
    }

    #[test]
    fn test_empty_network_is_empty() {
        let mut net = network(OutputMode::Absolute);
        assert!(net.evaluate(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_sample_is_empty() {
        let mut net = network(OutputMode::Absolute);
        net.add_sample(Sample::scalar(vec![1.0]).with_outputs(vec![3.0]));
        assert!(net.evaluate(&[1.0], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_interpolation() {
        let mut net = network(OutputMode::Absolute);
        net.set_samples(vec![
            Sample::scalar(vec![0.0]).with_outputs(vec![0.0]),
            Sample::scalar(vec![1.0]).with_outputs(vec![10.0]),
            Sample::scalar(vec![2.0]).with_outputs(vec![20.0]),
        ]);
        let out = net.evaluate(&[0.5], &[]).unwrap();
        assert_relative_eq!(out.values[0], 5.0, epsilon = 1e-9);
        assert_eq!(out.weights.len(), 3);
    }

    #[test]
    fn test_buckets_sum_scalar_outputs() {
        let mut net = network(OutputMode::Absolute);
        net.set_samples(vec![
            Sample::new(vec![], vec![rz(0.0)])
                .with_outputs(vec![0.0])
                .with_distance(RotationDistance::Swing),
            Sample::new(vec![], vec![rz(1.0)])
                .with_outputs(vec![1.0])
                .with_distance(RotationDistance::Swing),
            Sample::new(vec![], vec![rx(0.0)])
                .with_outputs(vec![0.0])
                .with_distance(RotationDistance::Twist),
            Sample::new(vec![], vec![rx(1.0)])
                .with_outputs(vec![2.0])
                .with_distance(RotationDistance::Twist),
        ]);
        // Pure swing: swing bucket reads 1, twist bucket sees no twist
        let out = net.evaluate(&[], &[rz(1.0)]).unwrap();
        assert_relative_eq!(out.values[0], 1.0, epsilon = 1e-6);
        // Pure twist: only the twist bucket fires
        let out = net.evaluate(&[], &[rx(1.0)]).unwrap();
        assert_relative_eq!(out.values[0], 2.0, epsilon = 1e-6);
        let snapshot = net.snapshot().unwrap();
        assert_eq!(snapshot.solver(RotationDistance::Swing).sample_count(), 2);
        assert!(!snapshot.solver(RotationDistance::SwingTwist).is_solved());
    }

    #[test]
    fn test_relative_mode_neutral_and_pose() {
        let neutral_rot = rz(0.3);
        let posed_rot = neutral_rot * rx(0.8);
        let mut net = network(OutputMode::Relative);
        net.set_samples(vec![
            Sample::new(vec![], vec![UnitQuaternion::identity()])
                .with_outputs(vec![5.0])
                .with_output_rotations(vec![neutral_rot])
                .neutral(),
            Sample::new(vec![], vec![UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.0)])
                .with_outputs(vec![9.0])
                .with_output_rotations(vec![posed_rot]),
        ]);

        let at_rest = net.evaluate(&[], &[UnitQuaternion::identity()]).unwrap();
        assert_relative_eq!(at_rest.values[0], 5.0, epsilon = 1e-6);
        assert!(quaternion_distance(&at_rest.rotations[0], &neutral_rot) < 1e-4);

        let posed = net
            .evaluate(&[], &[UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.0)])
            .unwrap();
        assert_relative_eq!(posed.values[0], 9.0, epsilon = 1e-6);
        assert!(quaternion_distance(&posed.rotations[0], &posed_rot) < 1e-4);
    }

    #[test]
    fn test_relative_rotation_halfway() {
        let mut net = network(OutputMode::Relative);
        net.set_samples(vec![
            Sample::scalar(vec![0.0])
                .with_outputs(vec![0.0])
                .with_output_rotations(vec![UnitQuaternion::identity()])
                .neutral(),
            Sample::scalar(vec![1.0])
                .with_outputs(vec![1.0])
                .with_output_rotations(vec![rx(1.0)]),
        ]);

        let out = net.evaluate(&[0.5], &[]).unwrap();
        assert_relative_eq!(out.weights[0], 0.5, epsilon = 1e-9);
        assert_relative_eq!(out.weights[1], 0.5, epsilon = 1e-9);
        assert_relative_eq!(out.values[0], 0.5, epsilon = 1e-9);
        // Unclaimed weight goes to the neutral, so the rotation follows the scalar
        assert_relative_eq!(out.rotations[0].angle(), 0.5, epsilon = 1e-6);
        assert_relative_eq!(
            out.rotations[0].axis().unwrap().into_inner(),
            Vector3::x(),
            epsilon = 1e-9
        );

        let mut absolute = network(OutputMode::Absolute);
        absolute.set_samples(net.samples().to_vec());
        let abs = absolute.evaluate(&[0.5], &[]).unwrap();
        assert_relative_eq!(abs.rotations[0].angle(), out.rotations[0].angle(), epsilon = 1e-6);
    }

    #[test]
    fn test_buckets_merge_raw_rotation_weights() {
        let mut net = network(OutputMode::Absolute);
        net.set_samples(vec![
            Sample::scalar(vec![0.0])
                .with_output_rotations(vec![UnitQuaternion::identity()])
                .with_distance(RotationDistance::Swing),
            Sample::scalar(vec![1.0])
                .with_output_rotations(vec![rx(1.0)])
                .with_distance(RotationDistance::Swing),
            Sample::scalar(vec![0.0])
                .with_output_rotations(vec![UnitQuaternion::identity()])
                .with_distance(RotationDistance::Twist),
            Sample::scalar(vec![2.0])
                .with_output_rotations(vec![UnitQuaternion::identity()])
                .with_distance(RotationDistance::Twist),
        ]);

        // Swing bucket reads [0.5, 0.5], twist bucket [0.75, 0.25]
        let out = net.evaluate(&[0.5], &[]).unwrap();
        let expected = [0.5, 0.5, 0.75, 0.25];
        for (w, e) in out.weights.iter().zip(expected) {
            assert_relative_eq!(*w, e, epsilon = 1e-9);
        }

        // Dominant eigenvector of 0.875 * I + 0.25 * rx(1) in quaternion space
        let expected_angle = (0.25 * 1.0_f64.sin()).atan2(0.875 + 0.25 * 1.0_f64.cos());
        assert_relative_eq!(out.rotations[0].angle(), expected_angle, epsilon = 1e-6);
    }

    #[test]
    fn test_relative_without_neutral_matches_absolute() {
        let samples = vec![
            Sample::scalar(vec![0.0]).with_outputs(vec![1.0]),
            Sample::scalar(vec![1.0]).with_outputs(vec![3.0]),
        ];
        let mut absolute = network(OutputMode::Absolute);
        absolute.set_samples(samples.clone());
        let mut relative = network(OutputMode::Relative);
        relative.set_samples(samples);
        let a = absolute.evaluate(&[0.25], &[]).unwrap();
        let r = relative.evaluate(&[0.25], &[]).unwrap();
        assert_relative_eq!(a.values[0], r.values[0], epsilon = 1e-9);
    }

    #[test]
    fn test_input_rest_rotations() {
        let rest = rz(0.5);
        let mut net = network(OutputMode::Absolute);
        net.set_input_rest(vec![rest]);
        net.set_samples(vec![
            Sample::new(vec![], vec![rest]).with_outputs(vec![0.0]),
            Sample::new(vec![], vec![rest * rx(1.0)]).with_outputs(vec![1.0]),
        ]);
        let out = net.evaluate(&[], &[rest]).unwrap();
        assert_relative_eq!(out.values[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rest_mismatch() {
        let mut net = network(OutputMode::Absolute);
        net.set_input_rest(vec![rz(0.1), rz(0.2)]);
        net.set_samples(vec![
            Sample::new(vec![], vec![rz(0.0)]),
            Sample::new(vec![], vec![rz(1.0)]),
        ]);
        assert!(matches!(
            net.evaluate(&[], &[rz(0.0)]),
            Err(RbfError::RestMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_rebuild_on_change() {
        let mut net = network(OutputMode::Absolute);
        net.set_samples(vec![
            Sample::scalar(vec![0.0]).with_outputs(vec![0.0]),
            Sample::scalar(vec![1.0]).with_outputs(vec![1.0]),
        ]);
        let first = net.snapshot().unwrap();
        assert!(!net.is_stale());

        net.sample_mut(1).unwrap().outputs[0] = 4.0;
        assert!(net.is_stale());
        let out = net.evaluate(&[1.0], &[]).unwrap();
        assert_relative_eq!(out.values[0], 4.0, epsilon = 1e-9);

        // The earlier snapshot still answers with the old data
        let old = first.evaluate(&[1.0], &[]).unwrap();
        assert_relative_eq!(old.values[0], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_config_change_marks_stale() {
        let mut net = network(OutputMode::Absolute);
        net.add_sample(Sample::scalar(vec![0.0]));
        net.add_sample(Sample::scalar(vec![1.0]));
        net.snapshot().unwrap();
        net.set_config(RbfConfig::default().with_kernel(RbfKernel::Gaussian))
            .unwrap();
        assert!(net.is_stale());
        assert!(net.set_config(RbfConfig::default().with_radius(-1.0)).is_err());
        assert_eq!(net.config().kernel, RbfKernel::Gaussian);
    }

    #[test]
    fn test_snapshot_is_shareable() {
        let mut net = network(OutputMode::Absolute);
        net.set_samples(vec![
            Sample::scalar(vec![0.0]).with_outputs(vec![0.0]),
            Sample::scalar(vec![2.0]).with_outputs(vec![4.0]),
        ]);
        let snapshot = net.snapshot().unwrap();
        let handle = std::thread::spawn(move || snapshot.evaluate(&[2.0], &[]).unwrap());
        let out = handle.join().unwrap();
        assert_relative_eq!(out.values[0], 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_query_mismatch() {
        let mut net = network(OutputMode::Absolute);
        net.set_samples(vec![Sample::scalar(vec![0.0]), Sample::scalar(vec![1.0])]);
        assert!(matches!(
            net.evaluate(&[], &[]),
            Err(RbfError::QueryMismatch { field: "values", .. })
        ));
    }
}
