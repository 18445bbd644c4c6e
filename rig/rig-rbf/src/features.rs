//! Feature normalization and distance-matrix construction.
//!
//! The distance matrix has one row per sample. Its columns are laid out as:
//!
//! ```text
//! [ scalar block: S columns ][ rotation 0: 2S columns ] ... [ rotation q-1: 2S columns ]
//! ```
//!
//! Column `s` of the scalar block holds the normalized feature distance of
//! every sample to sample `s`. Within a rotation block, columns `2s` and
//! `2s + 1` hold the swing and twist distances to sample `s`. The scalar block
//! is omitted when there are no scalar features.

use nalgebra::{DMatrix, DVector, Unit, UnitQuaternion, Vector3};
use rig_types::{SwingTwist, decompose_swing_twist, quaternion_distance};

use crate::{RbfConfig, RbfKernel, RotationDistance, Sample};

/// Rotation distances at or below this are treated as coincident when
/// picking a sample's radius.
const MIN_ROTATION_DISTANCE: f64 = 1e-6;

/// Upper bound on the automatic per-sample radius.
const MAX_SAMPLE_RADIUS: f64 = 1.0;

/// Normalized training features and the divisors needed to map a query into
/// the same space.
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    kernel: RbfKernel,
    radius: f64,
    distance: RotationDistance,
    axis: Unit<Vector3<f64>>,
    normalized: DMatrix<f64>,
    feature_norms: Vec<f64>,
    distance_norm: f64,
    rotations: Vec<Vec<SwingTwist>>,
    sample_radius: Vec<f64>,
}

impl FeatureSpace {
    /// Builds the feature space and the kernel-transformed distance matrix.
    ///
    /// All samples must share the same feature counts.
    pub fn build(
        samples: &[Sample],
        distance: RotationDistance,
        config: &RbfConfig,
    ) -> (Self, DMatrix<f64>) {
        let sample_count = samples.len();
        let value_count = samples.first().map_or(0, |s| s.values.len());
        let axis = config.twist_axis.unit();

        let mut normalized =
            DMatrix::from_fn(sample_count, value_count, |i, j| samples[i].values[j]);
        let mut feature_norms = Vec::with_capacity(value_count);
        for mut column in normalized.column_iter_mut() {
            let norm = column.norm();
            if norm != 0.0 {
                column.unscale_mut(norm);
            }
            feature_norms.push(norm);
        }

        let rotations: Vec<Vec<SwingTwist>> = samples
            .iter()
            .map(|s| {
                s.rotations
                    .iter()
                    .map(|q| decompose_swing_twist(q, &axis))
                    .collect()
            })
            .collect();

        let mut space = Self {
            kernel: config.kernel,
            radius: config.radius,
            distance,
            axis,
            normalized,
            feature_norms,
            distance_norm: 1.0,
            rotations,
            sample_radius: vec![MAX_SAMPLE_RADIUS; sample_count],
        };

        let mut m = DMatrix::zeros(sample_count, space.columns());

        if value_count > 0 {
            let mut block = DMatrix::from_fn(sample_count, sample_count, |i, s| {
                (space.normalized.row(i) - space.normalized.row(s)).norm()
            });
            let norm = block.norm();
            if norm > 0.0 {
                block.unscale_mut(norm);
                space.distance_norm = norm;
            }
            space.kernel.apply_to_matrix(&mut block, space.radius);
            m.view_mut((0, 0), (sample_count, sample_count))
                .copy_from(&block);
        }

        let rotation_count = space.rotation_count();
        if rotation_count > 0 {
            let mut blocks = vec![DMatrix::zeros(sample_count, 2 * sample_count); rotation_count];
            for a in 0..sample_count {
                for b in 0..sample_count {
                    for (r, block) in blocks.iter_mut().enumerate() {
                        let (swing, twist) =
                            space.masked_distance(&space.rotations[a][r], &space.rotations[b][r]);
                        for d in [swing, twist] {
                            if d > MIN_ROTATION_DISTANCE && d < space.sample_radius[a] {
                                space.sample_radius[a] = d;
                            }
                        }
                        block[(a, 2 * b)] = swing;
                        block[(a, 2 * b + 1)] = twist;
                    }
                }
            }

            for (radius, sample) in space.sample_radius.iter_mut().zip(samples) {
                if let Some(r) = sample.radius {
                    *radius = r;
                }
            }

            let offset = space.value_columns();
            for (r, mut block) in blocks.into_iter().enumerate() {
                for s in 0..sample_count {
                    let radius = space.sample_radius[s] * space.radius;
                    for x in block.columns_mut(2 * s, 2).iter_mut() {
                        *x = space.kernel.evaluate(*x, radius);
                    }
                }
                m.view_mut(
                    (0, offset + r * 2 * sample_count),
                    (sample_count, 2 * sample_count),
                )
                .copy_from(&block);
            }
        }

        (space, m)
    }

    /// Number of training samples.
    pub fn sample_count(&self) -> usize {
        self.normalized.nrows()
    }

    /// Number of scalar features.
    pub fn value_count(&self) -> usize {
        self.feature_norms.len()
    }

    /// Number of rotation features.
    pub fn rotation_count(&self) -> usize {
        self.rotations.first().map_or(0, Vec::len)
    }

    /// Width of the scalar block.
    fn value_columns(&self) -> usize {
        if self.value_count() > 0 {
            self.sample_count()
        } else {
            0
        }
    }

    /// Width of a distance row.
    pub fn columns(&self) -> usize {
        self.value_columns() + 2 * self.sample_count() * self.rotation_count()
    }

    /// Per-sample rotation radius, before scaling by the global radius.
    pub fn sample_radius(&self) -> &[f64] {
        &self.sample_radius
    }

    /// Builds the distance row for a query, laid out like a matrix row.
    ///
    /// Lengths must match the training features; extra entries are ignored
    /// and missing ones read as zero or identity.
    pub fn query_row(&self, values: &[f64], rotations: &[UnitQuaternion<f64>]) -> DVector<f64> {
        let sample_count = self.sample_count();
        let mut row = DVector::zeros(self.columns());

        if self.value_count() > 0 {
            let query = DVector::from_fn(self.value_count(), |j, _| {
                let v = values.get(j).copied().unwrap_or(0.0);
                let norm = self.feature_norms[j];
                if norm != 0.0 { v / norm } else { v }
            });
            for s in 0..sample_count {
                let d = (self.normalized.row(s).transpose() - &query).norm();
                row[s] = d / self.distance_norm;
            }
            self.kernel.apply_to_segment(&mut row, 0, sample_count, self.radius);
        }

        let offset = self.value_columns();
        for r in 0..self.rotation_count() {
            let q = rotations.get(r).copied().unwrap_or_else(UnitQuaternion::identity);
            let parts = decompose_swing_twist(&q, &self.axis);
            for s in 0..sample_count {
                let (swing, twist) = self.masked_distance(&parts, &self.rotations[s][r]);
                let idx = offset + r * 2 * sample_count + 2 * s;
                row[idx] = swing;
                row[idx + 1] = twist;
                self.kernel.apply_to_segment(
                    &mut row,
                    idx,
                    2,
                    self.sample_radius[s] * self.radius,
                );
            }
        }

        row
    }

    fn masked_distance(&self, a: &SwingTwist, b: &SwingTwist) -> (f64, f64) {
        self.distance.mask(
            quaternion_distance(&a.swing, &b.swing),
            quaternion_distance(&a.twist, &b.twist),
        )
    }
}
