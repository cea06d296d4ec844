use crate::{error::ValidationError, group::GroupPartition};
use log::{debug, warn};
use ndarray::{Array2, ArrayView2};

/// Penalty used when the cost matrix sums to zero and gives no scale of its own.
pub const MIN_DEFAULT_PENALTY: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct QuboBuild {
    pub matrix: Array2<f64>,
    pub penalty: f64,
    pub partition: Option<GroupPartition>,
}

/// Converts nested rows into a dense matrix, rejecting ragged input.
pub fn matrix_from_rows(
    name: &'static str,
    rows: Vec<Vec<f64>>,
) -> Result<Array2<f64>, ValidationError> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, |r| r.len());
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        return Err(ValidationError::RaggedRows {
            name,
            row,
            len: r.len(),
            expected: n_cols,
        });
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| ValidationError::RaggedRows {
        name,
        row: 0,
        len: n_cols,
        expected: n_cols,
    })
}

pub(crate) fn validate_square(
    name: &'static str,
    m: &ArrayView2<f64>,
) -> Result<usize, ValidationError> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(ValidationError::NotSquare { name, rows, cols });
    }
    if rows == 0 {
        return Err(ValidationError::Empty { name });
    }
    for ((row, col), &value) in m.indexed_iter() {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { name, row, col });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative {
                name,
                row,
                col,
                value,
            });
        }
    }
    Ok(rows)
}

/// Checks both matrices and returns their common size.
pub fn validate_pair(
    flow: &ArrayView2<f64>,
    dist: &ArrayView2<f64>,
) -> Result<usize, ValidationError> {
    let n_flow = validate_square("flow", flow)?;
    let n_dist = validate_square("distance", dist)?;
    if n_flow != n_dist {
        return Err(ValidationError::ShapeMismatch {
            flow: n_flow,
            dist: n_dist,
        });
    }
    Ok(n_flow)
}

pub(crate) fn validate_penalty(penalty: f64) -> Result<f64, ValidationError> {
    if penalty.is_finite() && penalty > 0.0 {
        Ok(penalty)
    } else {
        Err(ValidationError::InvalidPenalty(penalty))
    }
}

/// Entry `(i * n + m, j * n + k)` is `a[i, j] * b[m, k]`.
pub fn kronecker(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Array2<f64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(r, c)| {
        a[[r / br, c / bc]] * b[[r % br, c % bc]]
    })
}

/// Row groups (one facility, every location) followed by column groups (one
/// location, every facility).
pub fn constraint_groups(n: usize) -> Vec<Vec<usize>> {
    let mut groups = Vec::with_capacity(2 * n);
    for i in 0..n {
        groups.push((0..n).map(|m| i * n + m).collect());
    }
    for m in 0..n {
        groups.push((0..n).map(|i| m + n * i).collect());
    }
    groups
}

/// Largest objective any assignment can reach: the sum of the cost matrix.
pub fn objective_bound(flow: &ArrayView2<f64>, dist: &ArrayView2<f64>) -> f64 {
    flow.sum() * dist.sum()
}

/// `x^T Q x` for a 0/1 vector.
pub fn qubo_energy(qubo: &Array2<f64>, bits: &[u8]) -> f64 {
    let active: Vec<usize> = bits
        .iter()
        .enumerate()
        .filter(|(_, b)| **b != 0)
        .map(|(i, _)| i)
        .collect();
    let mut energy = 0.0;
    for &i in &active {
        for &j in &active {
            energy += qubo[[i, j]];
        }
    }
    energy
}

pub fn is_symmetric(qubo: &Array2<f64>) -> bool {
    let (rows, cols) = qubo.dim();
    rows == cols && (0..rows).all(|i| (i + 1..cols).all(|j| qubo[[i, j]] == qubo[[j, i]]))
}

fn apply_one_hot(qubo: &mut Array2<f64>, group: &[usize], penalty: f64) {
    for (a, &var_i) in group.iter().enumerate() {
        qubo[[var_i, var_i]] -= penalty;
        for &var_j in &group[a + 1..] {
            qubo[[var_i, var_j]] += penalty;
            qubo[[var_j, var_i]] += penalty;
        }
    }
}

fn apply_partition(qubo: &mut Array2<f64>, partition: &GroupPartition, penalty: f64) {
    for var in partition.forbidden_variables() {
        qubo[[var, var]] += penalty;
    }
}

/// Encodes the QAP on `flow` and `dist` as a symmetric QUBO over `n * n`
/// variables, where variable `i * n + m` places facility `i` at location `m`.
///
/// Without an explicit `penalty` the sum of the cost matrix is used, which
/// bounds every achievable objective from above so that breaking a one-hot
/// constraint never pays off.
pub fn build_qubo(
    flow: ArrayView2<f64>,
    dist: ArrayView2<f64>,
    group_cut: Option<usize>,
    penalty: Option<f64>,
) -> Result<QuboBuild, ValidationError> {
    let n = validate_pair(&flow, &dist)?;
    let partition = group_cut
        .map(|cut| GroupPartition::new(cut, n))
        .transpose()?;
    let penalty = penalty.map(validate_penalty).transpose()?;

    let mut qubo = kronecker(&flow, &dist);
    let bound = objective_bound(&flow, &dist);
    if !bound.is_finite() {
        return Err(ValidationError::PenaltyOverflow);
    }
    let penalty = match penalty {
        Some(p) => {
            if p < bound {
                warn!(
                    "penalty {} is below the objective bound {}, constraint violations may be preferred",
                    p, bound
                );
            }
            p
        }
        None if bound > 0.0 => bound,
        None => MIN_DEFAULT_PENALTY,
    };

    for group in constraint_groups(n) {
        apply_one_hot(&mut qubo, &group, penalty);
    }
    if let Some(partition) = &partition {
        apply_partition(&mut qubo, partition, penalty);
    }
    debug!(
        "built {}x{} QUBO for {} facilities (penalty: {}, group cut: {:?})",
        n * n,
        n * n,
        n,
        penalty,
        group_cut
    );

    Ok(QuboBuild {
        matrix: qubo,
        penalty,
        partition,
    })
}
