use super::FlipState;
use crate::{
    qubo::qubo_energy,
    sampler::{check_request, SampleSet, Sampler},
};
use anyhow::{anyhow, Result};
use ndarray::Array2;

pub const MAX_VARIABLES: usize = 20;

/// Enumerates every binary vector in Gray-code order and keeps the `shots`
/// lowest-energy ones. Only usable for tiny instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver;

impl Sampler for ExactSolver {
    fn sample_qubo(&mut self, qubo: &Array2<f64>, shots: usize) -> Result<SampleSet> {
        let n = check_request(qubo, shots)?;
        if n > MAX_VARIABLES {
            return Err(anyhow!(
                "Exact enumeration supports at most {} variables, got {}",
                MAX_VARIABLES,
                n
            ));
        }

        let mut state = FlipState::new(qubo, vec![0; n]);
        // (energy, code) sorted ascending, at most `shots` long
        let mut best: Vec<(f64, u32)> = vec![(state.energy, 0)];
        let mut code: u32 = 0;
        for g in 1u64..(1u64 << n) {
            let k = g.trailing_zeros() as usize;
            state.flip(k);
            code ^= 1 << k;
            let energy = state.energy;
            if best.len() == shots && energy >= best[best.len() - 1].0 {
                continue;
            }
            let pos = best.partition_point(|&(e, _)| e <= energy);
            best.insert(pos, (energy, code));
            best.truncate(shots);
        }

        let reads = best
            .into_iter()
            .map(|(_, code)| {
                let bits: Vec<u8> = (0..n).map(|k| ((code >> k) & 1) as u8).collect();
                let energy = qubo_energy(qubo, &bits);
                (bits, energy)
            })
            .collect();
        Ok(SampleSet::from_reads(reads))
    }
}
