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

/// One-flip tabu search. Each read starts from a random vector and keeps the
/// best vector seen.
#[derive(Debug, Clone)]
pub struct TabuSearch {
    pub max_iterations: usize,
    /// Iterations a flipped bit stays frozen. `None` scales with the variable count.
    pub tenure: Option<usize>,
    seed: [u8; 32],
    calls: u64,
}

impl Default for TabuSearch {
    fn default() -> Self {
        Self::new(u8s_from_str("tabu_search"))
    }
}

impl TabuSearch {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            max_iterations: 200,
            tenure: None,
            seed,
            calls: 0,
        }
    }

    /// Recognised keys: `max_iterations`, `tenure`, `seed` (any string).
    pub fn from_hyperparameters(hyperparameters: &Option<Map<String, Value>>) -> Result<Self> {
        let seed: Option<String> = hyperparameter(hyperparameters, "seed", None)?;
        let mut sampler = match seed {
            Some(s) => Self::new(u8s_from_str(&s)),
            None => Self::default(),
        };
        sampler.max_iterations = hyperparameter(hyperparameters, "max_iterations", 200usize)?;
        sampler.tenure = hyperparameter(hyperparameters, "tenure", None)?;
        if sampler.max_iterations == 0 {
            return Err(anyhow!("max_iterations must be positive"));
        }
        Ok(sampler)
    }

    fn tenure_for(&self, n: usize) -> usize {
        self.tenure.unwrap_or((n / 4).max(1)).min(n.saturating_sub(1))
    }
}

impl Sampler for TabuSearch {
    fn sample_qubo(&mut self, qubo: &Array2<f64>, shots: usize) -> Result<SampleSet> {
        let n = check_request(qubo, shots)?;
        let mut rng = SmallRng::from_seed(derive_seed(&self.seed, self.calls));
        self.calls += 1;
        let tenure = self.tenure_for(n);

        let mut reads = Vec::with_capacity(shots);
        for _ in 0..shots {
            let bits: Vec<u8> = (0..n).map(|_| rng.gen_range(0..=1u8)).collect();
            let mut state = FlipState::new(qubo, bits);
            let mut best_bits = state.bits.clone();
            let mut best_energy = state.energy;
            let mut tabu_list = vec![0usize; n];

            for _ in 0..self.max_iterations {
                let mut best_move: Option<(usize, f64)> = None;
                for k in 0..n {
                    let delta = state.delta(k);
                    // Aspiration: a tabu move is allowed if it beats the best so far
                    let aspirates = state.energy + delta < best_energy;
                    if tabu_list[k] > 0 && !aspirates {
                        continue;
                    }
                    if best_move.map_or(true, |(_, d)| delta < d) {
                        best_move = Some((k, delta));
                    }
                }
                let Some((k, _)) = best_move else {
                    break;
                };
                state.flip(k);
                for t in tabu_list.iter_mut() {
                    *t = t.saturating_sub(1);
                }
                tabu_list[k] = tenure;
                if state.energy < best_energy {
                    best_energy = state.energy;
                    best_bits.clone_from(&state.bits);
                }
            }

            let energy = qubo_energy(qubo, &best_bits);
            reads.push((best_bits, energy));
        }

        let samples = SampleSet::from_reads(reads);
        debug!(
            "tabu search: {} reads over {} variables, best energy {:?}",
            shots,
            n,
            samples.first().map(|s| s.energy)
        );
        Ok(samples)
    }
}
