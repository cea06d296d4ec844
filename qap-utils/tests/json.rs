use qap_utils::{dejsonify, hyperparameter, jsonify};
use serde_json::{json, Map, Value};

#[test]
fn test_jsonify_sorts_keys() {
    let value = json!({"b": 1, "a": {"d": [ {"z": 0, "y": 1} ], "c": 2}});
    assert_eq!(
        jsonify(&value).unwrap(),
        r#"{"a":{"c":2,"d":[{"y":1,"z":0}]},"b":1}"#
    );
}

#[test]
fn test_dejsonify() {
    let v: Vec<Vec<f64>> = dejsonify("[[0.0,1.5],[2.0,3.0]]").unwrap();
    assert_eq!(v, vec![vec![0.0, 1.5], vec![2.0, 3.0]]);
    assert!(dejsonify::<Vec<f64>>("{not json").is_err());
}

#[test]
fn test_hyperparameter() {
    let mut map = Map::new();
    map.insert("num_sweeps".to_string(), Value::from(250));
    let hyperparameters = Some(map);

    assert_eq!(hyperparameter(&hyperparameters, "num_sweeps", 1000usize).unwrap(), 250);
    assert_eq!(hyperparameter(&hyperparameters, "tenure", 7usize).unwrap(), 7);
    assert_eq!(hyperparameter(&None, "num_sweeps", 1000usize).unwrap(), 1000);
    assert!(hyperparameter(&hyperparameters, "num_sweeps", true).is_err());
}
