use qap_utils::{derive_seed, u8s_from_str};

#[test]
fn test_u8s_from_str_is_blake3() {
    assert_eq!(u8s_from_str("qap"), *blake3::hash(b"qap").as_bytes());
    assert_ne!(u8s_from_str("qap"), u8s_from_str("qubo"));
}

#[test]
fn test_derive_seed() {
    let seed = u8s_from_str("seed");
    assert_eq!(derive_seed(&seed, 0), derive_seed(&seed, 0));
    assert_ne!(derive_seed(&seed, 0), derive_seed(&seed, 1));
    assert_ne!(derive_seed(&seed, 0), seed);
}
