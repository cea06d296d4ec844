//! Quadratic Assignment Problems encoded as QUBO matrices, with a tracker that
//! re-solves the assignment as the flow matrix changes over time.

pub mod assignment;
pub mod config;
pub mod error;
pub mod group;
pub mod qubo;
pub mod sampler;
pub mod samplers;
pub mod tracker;
pub mod transition;

pub use assignment::Assignment;
pub use config::TrackerConfig;
pub use error::{QapError, StateError, ValidationError};
pub use group::{FacilityGroup, GroupPartition};
pub use qubo::{build_qubo, matrix_from_rows, QuboBuild};
pub use sampler::{Sample, SampleSet, Sampler};
pub use tracker::TemporalQap;
pub use transition::TransitionMode;
