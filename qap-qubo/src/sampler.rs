use anyhow::{anyhow, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sample {
    pub bits: Vec<u8>,
    pub energy: f64,
    pub num_occurrences: usize,
}

/// Distinct samples ordered by ascending energy.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Merges duplicate bit vectors and sorts by energy. Ties keep the order in
    /// which each vector was first seen.
    pub fn from_reads(reads: Vec<(Vec<u8>, f64)>) -> Self {
        let mut index: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut samples: Vec<Sample> = Vec::new();
        for (bits, energy) in reads {
            match index.get(&bits) {
                Some(&i) => samples[i].num_occurrences += 1,
                None => {
                    index.insert(bits.clone(), samples.len());
                    samples.push(Sample {
                        bits,
                        energy,
                        num_occurrences: 1,
                    });
                }
            }
        }
        samples.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Self { samples }
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total_reads(&self) -> usize {
        self.samples.iter().map(|s| s.num_occurrences).sum()
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Anything that can minimise `x^T Q x` over binary `x`.
pub trait Sampler {
    fn sample_qubo(&mut self, qubo: &Array2<f64>, shots: usize) -> Result<SampleSet>;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn sample_qubo(&mut self, qubo: &Array2<f64>, shots: usize) -> Result<SampleSet> {
        (**self).sample_qubo(qubo, shots)
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn sample_qubo(&mut self, qubo: &Array2<f64>, shots: usize) -> Result<SampleSet> {
        (**self).sample_qubo(qubo, shots)
    }
}

/// Shared argument checks for the bundled samplers. Returns the variable count.
pub(crate) fn check_request(qubo: &Array2<f64>, shots: usize) -> Result<usize> {
    let (rows, cols) = qubo.dim();
    if rows != cols {
        return Err(anyhow!("QUBO must be square, got {}x{}", rows, cols));
    }
    if shots == 0 {
        return Err(anyhow!("Number of shots must be positive"));
    }
    Ok(rows)
}
