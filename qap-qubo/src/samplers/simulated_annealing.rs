use super::FlipState;
use crate::{
    qubo::qubo_energy,
    sampler::{check_request, SampleSet, Sampler},
};
use anyhow::{anyhow, Result};
use log::debug;
use ndarray::Array2;
use qap_utils::{derive_seed, hyperparameter, u8s_from_str};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::{Map, Value};

pub const DEFAULT_NUM_SWEEPS: usize = 1000;

/// Single-flip Metropolis annealer with a geometric inverse-temperature schedule.
///
/// This is the sampler a tracker uses when none is supplied. Every call to
/// [`Sampler::sample_qubo`] draws from a fresh stream derived from the seed and
/// a call counter, so repeated calls explore differently yet the whole sequence
/// is reproducible.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    pub num_sweeps: usize,
    /// `(hot, cold)` inverse temperatures. Derived from the QUBO when `None`.
    pub beta_range: Option<(f64, f64)>,
    seed: [u8; 32],
    calls: u64,
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        Self::new(u8s_from_str("simulated_annealing"))
    }
}

impl SimulatedAnnealing {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            num_sweeps: DEFAULT_NUM_SWEEPS,
            beta_range: None,
            seed,
            calls: 0,
        }
    }

    /// Recognised keys: `num_sweeps`, `beta_min`, `beta_max`, `seed` (any string).
    pub fn from_hyperparameters(hyperparameters: &Option<Map<String, Value>>) -> Result<Self> {
        let seed: Option<String> = hyperparameter(hyperparameters, "seed", None)?;
        let mut sampler = match seed {
            Some(s) => Self::new(u8s_from_str(&s)),
            None => Self::default(),
        };
        sampler.num_sweeps = hyperparameter(hyperparameters, "num_sweeps", DEFAULT_NUM_SWEEPS)?;
        if sampler.num_sweeps == 0 {
            return Err(anyhow!("num_sweeps must be positive"));
        }
        let beta_min: Option<f64> = hyperparameter(hyperparameters, "beta_min", None)?;
        let beta_max: Option<f64> = hyperparameter(hyperparameters, "beta_max", None)?;
        sampler.beta_range = match (beta_min, beta_max) {
            (Some(lo), Some(hi)) if lo > 0.0 && hi >= lo => Some((lo, hi)),
            (None, None) => None,
            (lo, hi) => {
                return Err(anyhow!(
                    "beta_min ({:?}) and beta_max ({:?}) must both be given with 0 < beta_min <= beta_max",
                    lo,
                    hi
                ))
            }
        };
        Ok(sampler)
    }

    pub fn with_num_sweeps(mut self, num_sweeps: usize) -> Self {
        self.num_sweeps = num_sweeps.max(1);
        self
    }

    pub fn with_beta_range(mut self, hot: f64, cold: f64) -> Self {
        self.beta_range = Some((hot, cold));
        self
    }

    fn schedule(&self, qubo: &Array2<f64>) -> Vec<f64> {
        let (hot, cold) = self.beta_range.unwrap_or_else(|| default_beta_range(qubo));
        if self.num_sweeps == 1 {
            return vec![cold];
        }
        let ratio = cold / hot;
        let last = (self.num_sweeps - 1) as f64;
        (0..self.num_sweeps)
            .map(|t| hot * ratio.powf(t as f64 / last))
            .collect()
    }
}

/// Hot end accepts the largest possible uphill flip with probability 1/2, cold
/// end accepts the smallest one with probability 1/100.
fn default_beta_range(qubo: &Array2<f64>) -> (f64, f64) {
    let n = qubo.nrows();
    let mut max_delta: f64 = 0.0;
    let mut min_delta = f64::INFINITY;
    for k in 0..n {
        let mut bound = qubo[[k, k]].abs();
        if bound > 0.0 {
            min_delta = min_delta.min(bound);
        }
        for j in 0..n {
            if j != k {
                let coupling = (qubo[[k, j]] + qubo[[j, k]]).abs();
                bound += coupling;
                if coupling > 0.0 {
                    min_delta = min_delta.min(coupling);
                }
            }
        }
        max_delta = max_delta.max(bound);
    }
    if max_delta == 0.0 || !min_delta.is_finite() {
        return (1.0, 1.0);
    }
    let hot = 2f64.ln() / max_delta;
    let cold = 100f64.ln() / min_delta;
    (hot, cold.max(hot))
}

impl Sampler for SimulatedAnnealing {
    fn sample_qubo(&mut self, qubo: &Array2<f64>, shots: usize) -> Result<SampleSet> {
        let n = check_request(qubo, shots)?;
        let mut rng = SmallRng::from_seed(derive_seed(&self.seed, self.calls));
        self.calls += 1;
        let schedule = self.schedule(qubo);

        let mut reads = Vec::with_capacity(shots);
        for _ in 0..shots {
            let bits: Vec<u8> = (0..n).map(|_| rng.gen_range(0..=1u8)).collect();
            let mut state = FlipState::new(qubo, bits);
            for &beta in &schedule {
                for k in 0..state.len() {
                    let delta = state.delta(k);
                    if delta <= 0.0 || rng.gen::<f64>() < (-beta * delta).exp() {
                        state.flip(k);
                    }
                }
            }
            let energy = qubo_energy(qubo, &state.bits);
            reads.push((state.bits, energy));
        }

        let samples = SampleSet::from_reads(reads);
        debug!(
            "simulated annealing: {} reads over {} variables, {} distinct, best energy {:?}",
            shots,
            n,
            samples.len(),
            samples.first().map(|s| s.energy)
        );
        Ok(samples)
    }
}
