pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Derives an independent 32 byte seed for the `counter`-th use of `seed`.
pub fn derive_seed(seed: &[u8; 32], counter: u64) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(seed);
    hasher.update(&counter.to_le_bytes());
    hasher.finalize().into()
}
