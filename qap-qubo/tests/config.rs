use qap_qubo::{TrackerConfig, TransitionMode};

#[test]
fn test_defaults() {
    let config = TrackerConfig::default();
    assert_eq!(config.shots, 1000);
    assert_eq!(config.penalty, None);
    assert_eq!(config.move_penalty_base, 10.0);
    assert_eq!(config.transition, TransitionMode::Carried);
    assert_eq!(TrackerConfig::from_json("{}").unwrap(), config);
}

#[test]
fn test_from_json() {
    let config =
        TrackerConfig::from_json(r#"{"shots": 5000, "penalty": 400, "transition": "per_facility"}"#)
            .unwrap();
    assert_eq!(config.shots, 5000);
    assert_eq!(config.penalty, Some(400.0));
    assert_eq!(config.move_penalty_base, 10.0);
    assert_eq!(config.transition, TransitionMode::PerFacility);
}

#[test]
fn test_from_json_rejects_invalid() {
    assert!(TrackerConfig::from_json(r#"{"shots": 0}"#).is_err());
    assert!(TrackerConfig::from_json(r#"{"penalty": -5}"#).is_err());
    assert!(TrackerConfig::from_json(r#"{"transition": "sometimes"}"#).is_err());
    assert!(TrackerConfig::from_json("not json").is_err());
}

#[test]
fn test_json_round_trip() {
    let config = TrackerConfig {
        shots: 10,
        penalty: Some(1.5),
        move_penalty_base: 3.0,
        transition: TransitionMode::PerFacility,
    };
    let json = config.to_json().unwrap();
    assert_eq!(
        json,
        r#"{"move_penalty_base":3.0,"penalty":1.5,"shots":10,"transition":"per_facility"}"#
    );
    assert_eq!(TrackerConfig::from_json(&json).unwrap(), config);
}
