use ndarray::{array, Array2};
use qap_qubo::{
    build_qubo,
    qubo::qubo_energy,
    samplers::{ExactSolver, SimulatedAnnealing, TabuSearch},
    Assignment, SampleSet, Sampler,
};
use serde_json::{json, Map, Value};

fn scenario_qubo() -> Array2<f64> {
    let flow = array![[0.0, 5.0, 2.0], [5.0, 0.0, 3.0], [2.0, 3.0, 0.0]];
    let dist = array![[0.0, 8.0, 15.0], [8.0, 0.0, 13.0], [15.0, 13.0, 0.0]];
    build_qubo(flow.view(), dist.view(), None, None).unwrap().matrix
}

fn hyperparameters(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn brute_force_min(qubo: &Array2<f64>) -> f64 {
    let n = qubo.nrows();
    (0..(1usize << n))
        .map(|code| {
            let bits: Vec<u8> = (0..n).map(|k| ((code >> k) & 1) as u8).collect();
            qubo_energy(qubo, &bits)
        })
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_sample_set_merges_and_sorts() {
    let set = SampleSet::from_reads(vec![
        (vec![1, 0], 3.0),
        (vec![0, 1], -1.0),
        (vec![1, 0], 3.0),
        (vec![1, 1], 0.5),
    ]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.total_reads(), 4);
    let energies: Vec<f64> = set.iter().map(|s| s.energy).collect();
    assert_eq!(energies, vec![-1.0, 0.5, 3.0]);
    assert_eq!(set.first().unwrap().bits, vec![0, 1]);
    assert_eq!(set.samples()[2].num_occurrences, 2);
    assert!(SampleSet::default().first().is_none());
}

#[test]
fn test_exact_solver_finds_global_minimum() {
    let qubo = scenario_qubo();
    let samples = ExactSolver.sample_qubo(&qubo, 6).unwrap();
    assert_eq!(samples.len(), 6);
    assert_eq!(samples.first().unwrap().energy, brute_force_min(&qubo));
    // the six permutations are the six lowest states
    for s in &samples {
        assert!(Assignment::from_sample(&s.bits, 3).unwrap().is_permutation());
    }
    let energies: Vec<f64> = samples.iter().map(|s| s.energy).collect();
    assert!(energies.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_exact_solver_limits() {
    let too_big = Array2::<f64>::zeros((21, 21));
    assert!(ExactSolver.sample_qubo(&too_big, 1).is_err());
    assert!(ExactSolver.sample_qubo(&scenario_qubo(), 0).is_err());
    assert!(ExactSolver.sample_qubo(&Array2::zeros((2, 3)), 1).is_err());
}

#[test]
fn test_simulated_annealing_finds_permutation() {
    let qubo = scenario_qubo();
    let mut sampler = SimulatedAnnealing::default().with_num_sweeps(200);
    let samples = sampler.sample_qubo(&qubo, 20).unwrap();
    assert_eq!(samples.total_reads(), 20);
    let best = samples.first().unwrap();
    assert!(Assignment::from_sample(&best.bits, 3).unwrap().is_permutation());
    assert_eq!(best.energy, qubo_energy(&qubo, &best.bits));
}

#[test]
fn test_simulated_annealing_is_reproducible() {
    let qubo = scenario_qubo();
    let mut a = SimulatedAnnealing::new([7u8; 32]).with_num_sweeps(50);
    let mut b = SimulatedAnnealing::new([7u8; 32]).with_num_sweeps(50);
    assert_eq!(
        a.sample_qubo(&qubo, 10).unwrap(),
        b.sample_qubo(&qubo, 10).unwrap()
    );
}

#[test]
fn test_simulated_annealing_hyperparameters() {
    let sampler = SimulatedAnnealing::from_hyperparameters(&hyperparameters(json!({
        "num_sweeps": 300,
        "beta_min": 0.1,
        "beta_max": 5.0,
        "seed": "abc"
    })))
    .unwrap();
    assert_eq!(sampler.num_sweeps, 300);
    assert_eq!(sampler.beta_range, Some((0.1, 5.0)));

    let sampler = SimulatedAnnealing::from_hyperparameters(&None).unwrap();
    assert_eq!(sampler.num_sweeps, 1000);
    assert_eq!(sampler.beta_range, None);

    for bad in [
        json!({"num_sweeps": 0}),
        json!({"beta_min": 1.0}),
        json!({"beta_min": 2.0, "beta_max": 1.0}),
        json!({"num_sweeps": "many"}),
    ] {
        assert!(SimulatedAnnealing::from_hyperparameters(&hyperparameters(bad)).is_err());
    }
}

#[test]
fn test_tabu_search_finds_global_minimum() {
    let qubo = scenario_qubo();
    let mut sampler = TabuSearch::from_hyperparameters(&hyperparameters(json!({
        "max_iterations": 100,
        "tenure": 2,
        "seed": "tabu"
    })))
    .unwrap();
    assert_eq!(sampler.tenure, Some(2));
    let samples = sampler.sample_qubo(&qubo, 20).unwrap();
    assert_eq!(samples.first().unwrap().energy, brute_force_min(&qubo));
    let zero_iterations = hyperparameters(json!({"max_iterations": 0}));
    assert!(TabuSearch::from_hyperparameters(&zero_iterations).is_err());
}

#[test]
fn test_samplers_reject_zero_shots() {
    let qubo = scenario_qubo();
    assert!(SimulatedAnnealing::default().sample_qubo(&qubo, 0).is_err());
    assert!(TabuSearch::default().sample_qubo(&qubo, 0).is_err());
}
