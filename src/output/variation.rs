//! Deterministic phrase selection.
//!
//! Templates are picked with a 64-bit FNV-1a checksum of a composite key
//! reduced modulo the pool size. The checksum depends only on the key bytes,
//! so the same analysis yields the same wording in every process and on every
//! platform.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a checksum of `key`
pub fn stable_hash(key: &str) -> u64 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Index into a pool of `len` variants for `key`. `len` must be non-zero.
pub fn variant_index(key: &str, len: usize) -> usize {
    (stable_hash(key) % len as u64) as usize
}

/// Pick one variant from `pool` for `key`
pub fn select<'a, T>(pool: &'a [T], key: &str) -> &'a T {
    &pool[variant_index(key, pool.len())]
}

/// Pick two different variants from `pool`, the second keyed by `second_key`.
/// When both keys land on the same slot the second moves to the next one.
pub fn select_pair<'a, T>(pool: &'a [T], first_key: &str, second_key: &str) -> (&'a T, &'a T) {
    let first = variant_index(first_key, pool.len());
    let mut second = variant_index(second_key, pool.len());
    if second == first && pool.len() > 1 {
        second = (second + 1) % pool.len();
    }
    (&pool[first], &pool[second])
}

/// Render a score the way it appears in generated text: "85", "34.1"
pub fn format_score(score: f64) -> String {
    format!("{}", score)
}
