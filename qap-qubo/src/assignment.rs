use crate::error::ValidationError;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Facility by location 0/1 matrix. Row `i` marks where facility `i` sits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    matrix: Array2<u8>,
}

impl Assignment {
    /// Decodes a sample row-major: bit `i * n + m` becomes row `i`, column `m`.
    /// The one-hot structure is not checked, see [`Assignment::is_permutation`].
    pub fn from_sample(bits: &[u8], n: usize) -> Result<Self, ValidationError> {
        if bits.len() != n * n {
            return Err(ValidationError::SampleLength {
                expected: n * n,
                actual: bits.len(),
            });
        }
        let matrix = Array2::from_shape_fn((n, n), |(i, m)| u8::from(bits[i * n + m] != 0));
        Ok(Self { matrix })
    }

    pub fn from_locations(locations: &[usize]) -> Result<Self, ValidationError> {
        let n = locations.len();
        let mut matrix = Array2::zeros((n, n));
        for (i, &m) in locations.iter().enumerate() {
            if m >= n {
                return Err(ValidationError::LocationOutOfRange {
                    facility: i,
                    location: m,
                    size: n,
                });
            }
            matrix[[i, m]] = 1;
        }
        Ok(Self { matrix })
    }

    pub fn to_sample(&self) -> Vec<u8> {
        self.matrix.iter().copied().collect()
    }

    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn matrix(&self) -> &Array2<u8> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Array2<u8> {
        self.matrix
    }

    /// First maximal column of each row. A row with no bit set maps to 0.
    pub fn locations(&self) -> Vec<usize> {
        self.matrix
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for (m, &v) in row.iter().enumerate() {
                    if v > row[best] {
                        best = m;
                    }
                }
                best
            })
            .collect()
    }

    pub fn is_permutation(&self) -> bool {
        let one_set = |v: ndarray::ArrayView1<u8>| v.iter().filter(|&&b| b != 0).count() == 1;
        let rows_ok = self.matrix.rows().into_iter().all(one_set);
        let cols_ok = self.matrix.columns().into_iter().all(one_set);
        rows_ok && cols_ok
    }

    /// `sum flow[i, j] * dist[loc(i), loc(j)]` over every facility pair.
    pub fn cost(&self, flow: &ArrayView2<f64>, dist: &ArrayView2<f64>) -> f64 {
        let locations = self.locations();
        let mut total = 0.0;
        for (i, &p) in locations.iter().enumerate() {
            for (j, &q) in locations.iter().enumerate() {
                total += flow[[i, j]] * dist[[p, q]];
            }
        }
        total
    }

    /// Facilities whose location differs between `self` and `other`.
    pub fn moved_facilities(&self, other: &Assignment) -> Vec<usize> {
        self.locations()
            .into_iter()
            .zip(other.locations())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }
}
