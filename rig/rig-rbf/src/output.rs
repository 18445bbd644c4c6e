//! Network evaluation result.

use nalgebra::{UnitQuaternion, Vector3};
use rig_types::euler_xyz;

/// Result of evaluating an [`RbfNetwork`](crate::RbfNetwork).
///
/// All vectors are empty when the network has fewer than two samples in every
/// bucket.
///
/// # Examples
///
/// ```
/// use rig_rbf::{RbfConfig, RbfNetwork, Sample};
///
/// let mut network = RbfNetwork::new(RbfConfig::default()).unwrap();
/// network.add_sample(Sample::scalar(vec![0.0]).with_outputs(vec![0.0]));
/// network.add_sample(Sample::scalar(vec![1.0]).with_outputs(vec![2.0]));
///
/// let out = network.evaluate(&[1.0], &[]).unwrap();
/// println!("{}", out.summary());
/// assert!((out.values[0] - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RbfOutput {
    /// Interpolated scalar outputs.
    pub values: Vec<f64>,
    /// Interpolated rotation outputs.
    pub rotations: Vec<UnitQuaternion<f64>>,
    /// Raw weight of each sample, in insertion order. Samples in buckets that
    /// could not be solved have weight zero.
    pub weights: Vec<f64>,
}

impl RbfOutput {
    /// Whether nothing was interpolated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.rotations.is_empty() && self.weights.is_empty()
    }

    /// Rotation outputs as XYZ Euler angles in radians.
    #[must_use]
    pub fn euler_rotations(&self) -> Vec<Vector3<f64>> {
        self.rotations.iter().map(euler_xyz).collect()
    }

    /// Index of the sample with the largest weight.
    #[must_use]
    pub fn dominant_sample(&self) -> Option<usize> {
        self.weights
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    /// One-line summary for logs.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "RBF output: {} values, {} rotations, {} samples (dominant: {})",
            self.values.len(),
            self.rotations.len(),
            self.weights.len(),
            self.dominant_sample()
                .map_or_else(|| "none".to_string(), |i| i.to_string()),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let out = RbfOutput::default();
        assert!(out.is_empty());
        assert_eq!(out.dominant_sample(), None);
        assert!(out.summary().contains("none"));
    }

    #[test]
    fn test_dominant_sample() {
        let out = RbfOutput {
            weights: vec![0.1, 0.7, 0.2],
            ..RbfOutput::default()
        };
        assert_eq!(out.dominant_sample(), Some(1));
    }
}
