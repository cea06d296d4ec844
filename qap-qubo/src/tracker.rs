//! Assignment state carried across successive flow matrices.
//!
//! A [`TemporalQap`] owns the distance matrix for its whole life and replaces
//! the flow matrix on every [`TemporalQap::evolve`]. Each evolution rebuilds the
//! QUBO from scratch and adds a relocation surcharge derived from the previous
//! assignment, so the sampler is steered towards keeping facilities in place.
//!
//! The tracker is single-owner: every mutating call takes `&mut self`.

use crate::{
    assignment::Assignment,
    config::TrackerConfig,
    error::{QapError, Result, StateError, ValidationError},
    group::GroupPartition,
    qubo::{build_qubo, QuboBuild},
    sampler::{SampleSet, Sampler},
    samplers::SimulatedAnnealing,
    transition::{apply_transition, transition_penalties},
};
use anyhow::anyhow;
use log::{info, warn};
use ndarray::Array2;

#[derive(Debug)]
pub struct TemporalQap<S: Sampler = SimulatedAnnealing> {
    flow: Array2<f64>,
    dist: Array2<f64>,
    size: usize,
    partition: Option<GroupPartition>,
    qubo: Array2<f64>,
    penalty_used: f64,
    previous_state: Option<Assignment>,
    current_state: Option<Assignment>,
    step_count: usize,
    sampler: S,
    config: TrackerConfig,
}

impl TemporalQap<SimulatedAnnealing> {
    /// Tracker with the default annealer and default configuration.
    pub fn new(
        flow: Array2<f64>,
        dist: Array2<f64>,
        group_cut: Option<usize>,
    ) -> Result<Self> {
        Self::with_sampler(
            flow,
            dist,
            group_cut,
            SimulatedAnnealing::default(),
            TrackerConfig::default(),
        )
    }
}

impl<S: Sampler> TemporalQap<S> {
    pub fn with_sampler(
        flow: Array2<f64>,
        dist: Array2<f64>,
        group_cut: Option<usize>,
        sampler: S,
        config: TrackerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let QuboBuild {
            matrix,
            penalty,
            partition,
        } = build_qubo(flow.view(), dist.view(), group_cut, config.penalty)?;
        let size = flow.nrows();
        Ok(Self {
            flow,
            dist,
            size,
            partition,
            qubo: matrix,
            penalty_used: penalty,
            previous_state: None,
            current_state: None,
            step_count: 0,
            sampler,
            config,
        })
    }

    /// Samples the initial QUBO and stores the best assignment found.
    pub fn initialize(&mut self) -> Result<Assignment> {
        if self.current_state.is_some() {
            return Err(StateError::AlreadyInitialized.into());
        }
        let (assignment, energy) = Self::solve(
            &mut self.sampler,
            &self.qubo,
            self.config.shots,
            self.size,
        )?;
        info!(
            "initialized {} facilities (energy: {}, cost: {})",
            self.size,
            energy,
            assignment.cost(&self.flow.view(), &self.dist.view())
        );
        self.current_state = Some(assignment.clone());
        Ok(assignment)
    }

    pub fn evolve(&mut self, new_flow: Array2<f64>) -> Result<Assignment> {
        self.evolve_with_penalty(new_flow, None)
    }

    /// Moves to `new_flow`. `penalty` overrides the configured one-hot penalty
    /// for this step only.
    pub fn evolve_with_penalty(
        &mut self,
        new_flow: Array2<f64>,
        penalty: Option<f64>,
    ) -> Result<Assignment> {
        let previous = self
            .current_state
            .clone()
            .ok_or(QapError::State(StateError::NotInitialized))?;

        let QuboBuild {
            matrix: mut qubo,
            penalty,
            ..
        } = build_qubo(
            new_flow.view(),
            self.dist.view(),
            self.partition.map(|p| p.cut()),
            penalty.or(self.config.penalty),
        )?;
        let grid = transition_penalties(
            &previous,
            &self.dist.view(),
            self.config.move_penalty_base,
            self.config.transition,
        );
        if !grid.iter().all(|v| v.is_finite()) {
            return Err(ValidationError::PenaltyOverflow.into());
        }
        apply_transition(&mut qubo, &grid);

        let (assignment, energy) =
            Self::solve(&mut self.sampler, &qubo, self.config.shots, self.size)?;

        let moved = assignment.moved_facilities(&previous);
        self.flow = new_flow;
        self.qubo = qubo;
        self.penalty_used = penalty;
        self.previous_state = Some(previous);
        self.current_state = Some(assignment.clone());
        self.step_count += 1;
        info!(
            "step {}: {} of {} facilities moved (energy: {}, cost: {})",
            self.step_count,
            moved.len(),
            self.size,
            energy,
            assignment.cost(&self.flow.view(), &self.dist.view())
        );
        Ok(assignment)
    }

    /// Raw sampler output over the current QUBO. `shots` defaults to the
    /// configured count. Tracker state is left untouched.
    pub fn sample(&mut self, shots: Option<usize>) -> Result<SampleSet> {
        let shots = self.shots(shots)?;
        Ok(self.sampler.sample_qubo(&self.qubo, shots)?)
    }

    /// As [`TemporalQap::sample`] with a caller-supplied sampler.
    pub fn sample_with<T: Sampler + ?Sized>(
        &self,
        sampler: &mut T,
        shots: Option<usize>,
    ) -> Result<SampleSet> {
        let shots = self.shots(shots)?;
        Ok(sampler.sample_qubo(&self.qubo, shots)?)
    }

    fn shots(&self, shots: Option<usize>) -> Result<usize> {
        match shots.unwrap_or(self.config.shots) {
            0 => Err(ValidationError::InvalidShots.into()),
            s => Ok(s),
        }
    }

    fn solve(
        sampler: &mut S,
        qubo: &Array2<f64>,
        shots: usize,
        size: usize,
    ) -> Result<(Assignment, f64)> {
        let samples = sampler.sample_qubo(qubo, shots)?;
        let best = samples
            .first()
            .ok_or_else(|| QapError::Sampler(anyhow!("Sampler returned no samples")))?;
        let assignment = Assignment::from_sample(&best.bits, size)?;
        if !assignment.is_permutation() {
            warn!(
                "best sample (energy {}) is not a permutation, the sampler may need more shots or sweeps",
                best.energy
            );
        }
        Ok((assignment, best.energy))
    }

    pub fn flow(&self) -> &Array2<f64> {
        &self.flow
    }

    pub fn dist(&self) -> &Array2<f64> {
        &self.dist
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn group_cut(&self) -> Option<usize> {
        self.partition.map(|p| p.cut())
    }

    pub fn partition(&self) -> Option<&GroupPartition> {
        self.partition.as_ref()
    }

    pub fn qubo(&self) -> &Array2<f64> {
        &self.qubo
    }

    pub fn penalty_used(&self) -> f64 {
        self.penalty_used
    }

    pub fn previous_state(&self) -> Option<&Assignment> {
        self.previous_state.as_ref()
    }

    pub fn current_state(&self) -> Option<&Assignment> {
        self.current_state.as_ref()
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// QAP objective of the current assignment under the current flow.
    pub fn current_cost(&self) -> Option<f64> {
        self.current_state
            .as_ref()
            .map(|a| a.cost(&self.flow.view(), &self.dist.view()))
    }

    pub fn into_sampler(self) -> S {
        self.sampler
    }
}
