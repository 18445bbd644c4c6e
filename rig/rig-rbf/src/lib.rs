//! Pose-space interpolation with radial basis functions.
//!
//! This crate interpolates scalar and rotation outputs from a set of training
//! poses. Inputs may be scalar features, rotations, or both; rotations are
//! compared through their swing and twist about a configurable axis.
//!
//! # Pipeline
//!
//! 1. Scalar features are normalized per column, then turned into a pairwise
//!    distance matrix scaled to unit Frobenius norm
//! 2. Each rotation feature adds swing and twist distance columns
//! 3. A kernel is applied: globally on scalar distances, with a per-sample
//!    radius on rotation distances
//! 4. Regularized least squares through an SVD pseudo-inverse yields per-sample
//!    weights for any query
//! 5. Scalar outputs are weighted sums; rotation outputs are weighted
//!    quaternion averages
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Quick Start
//!
//! ```
//! use rig_rbf::{RbfConfig, RbfNetwork, Sample};
//!
//! let mut network = RbfNetwork::new(RbfConfig::default()).unwrap();
//! network.add_sample(Sample::scalar(vec![0.0]).with_outputs(vec![0.0]));
//! network.add_sample(Sample::scalar(vec![1.0]).with_outputs(vec![10.0]));
//! network.add_sample(Sample::scalar(vec![2.0]).with_outputs(vec![20.0]));
//!
//! let out = network.evaluate(&[0.5], &[]).unwrap();
//! assert!((out.values[0] - 5.0).abs() < 1e-9);
//! ```
//!
//! # Kernels
//!
//! | Kernel | Characteristic |
//! |--------|----------------|
//! | Linear | Raw distances, no radius |
//! | Gaussian | Smooth, local |
//! | Thin plate | Smooth, global |
//! | Multiquadric | Grows with distance |
//! | Inverse multiquadric | Decays with distance |
//! | Wendland C2 | Compact support, zero past the radius |

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
// Sample counts are small; usize -> f64 is exact in practice
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_panics_doc)]

mod config;
mod error;
mod features;
mod kernel;
mod network;
mod output;
mod regression;
mod sample;
mod solver;

pub use config::{OutputMode, RbfConfig};
pub use error::{RbfError, RbfResult};
pub use features::FeatureSpace;
pub use kernel::{MIN_RADIUS, RbfKernel};
pub use network::{NetworkState, RbfNetwork};
pub use output::RbfOutput;
pub use regression::{average_quaternion, normalize_weights, pseudo_inverse, solve_theta};
pub use sample::{RotationDistance, Sample};
pub use solver::{SampleLayout, SolverOutput, SolverState, fingerprint};
