use crate::assignment::Assignment;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MOVE_PENALTY_BASE: f64 = 10.0;

/// How the relocation surcharge accumulates over facilities.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// One running product seeded once and carried from facility to facility.
    #[default]
    Carried,
    /// The running product restarts at the base for every facility.
    PerFacility,
}

/// Location each facility held in `previous`: the first maximal column of its row.
pub fn previous_locations(previous: &Assignment) -> Vec<usize> {
    previous.locations()
}

/// Surcharge grid: entry `(i, m)` is added to the QUBO diagonal at `i * n + m`.
///
/// Walking facilities in order and locations in order, the running value is
/// multiplied by `dist[prev(i), m]` before each entry is written.
pub fn transition_penalties(
    previous: &Assignment,
    dist: &ArrayView2<f64>,
    base: f64,
    mode: TransitionMode,
) -> Array2<f64> {
    let n = previous.size();
    let mut grid = Array2::zeros((n, n));
    let mut running = base;
    for (i, prev) in previous_locations(previous).into_iter().enumerate() {
        if mode == TransitionMode::PerFacility {
            running = base;
        }
        for m in 0..n {
            running *= dist[[prev, m]];
            grid[[i, m]] = running;
        }
    }
    grid
}

/// Adds `grid[i, m]` to `qubo[i * n + m, i * n + m]`.
pub fn apply_transition(qubo: &mut Array2<f64>, grid: &Array2<f64>) {
    let n = grid.nrows();
    for ((i, m), &surcharge) in grid.indexed_iter() {
        let var = i * n + m;
        qubo[[var, var]] += surcharge;
    }
}
