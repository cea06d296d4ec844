pub mod exact;
pub mod simulated_annealing;
pub mod tabu_search;

pub use exact::ExactSolver;
pub use simulated_annealing::SimulatedAnnealing;
pub use tabu_search::TabuSearch;

use ndarray::Array2;

/// Bit vector with cached local fields, so that the energy change of a
/// single flip is O(1) and applying it is O(n).
pub(crate) struct FlipState<'a> {
    qubo: &'a Array2<f64>,
    pub bits: Vec<u8>,
    /// `fields[k] = sum_{j != k} (Q[k, j] + Q[j, k]) * x[j]`
    fields: Vec<f64>,
    pub energy: f64,
}

impl<'a> FlipState<'a> {
    pub fn new(qubo: &'a Array2<f64>, bits: Vec<u8>) -> Self {
        let n = bits.len();
        let mut fields = vec![0.0; n];
        for k in 0..n {
            for j in 0..n {
                if j != k && bits[j] != 0 {
                    fields[k] += qubo[[k, j]] + qubo[[j, k]];
                }
            }
        }
        let energy = crate::qubo::qubo_energy(qubo, &bits);
        Self {
            qubo,
            bits,
            fields,
            energy,
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn delta(&self, k: usize) -> f64 {
        let sign = if self.bits[k] == 0 { 1.0 } else { -1.0 };
        sign * (self.qubo[[k, k]] + self.fields[k])
    }

    pub fn flip(&mut self, k: usize) {
        let delta = self.delta(k);
        let sign = if self.bits[k] == 0 { 1.0 } else { -1.0 };
        self.bits[k] ^= 1;
        self.energy += delta;
        for j in 0..self.bits.len() {
            if j != k {
                self.fields[j] += sign * (self.qubo[[j, k]] + self.qubo[[k, j]]);
            }
        }
    }
}
