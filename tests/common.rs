//! Test helpers and deterministic random data for `ncmt`.
//!
//! Shared by the `tests/*` files. It provides:
//! - A tiny PRNG (XorShift64) with deterministic seeding
//! - Namespaced data generators and tree fixtures
//! - A `tracing` subscriber hooked into the test harness output
//!
//! Usage in tests:
//! ```ignore
//! mod common;
//! use common::*;
//!
//! #[test]
//! fn my_test() {
//!     init_tracing();
//!     let mut rng = rng_from_env(); // honors TEST_SEED if set
//!     let tree = built_tree(16, 32, &mut rng);
//! }
//! ```

use std::env;

use ncmt::{NamespaceId, NamespacedData, Ncmt};

#[allow(dead_code)]
pub const DEFAULT_TEST_SEED: u64 = 0xA11C_1A9E_C0FF_EE42;

/// Minimal, fast, deterministic PRNG (XorShift64).
/// Not cryptographically secure, only for tests and benches.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    #[inline]
    pub fn new(seed: u64) -> Self {
        // All-zero state never leaves zero.
        let s = if seed == 0 { DEFAULT_TEST_SEED } else { seed };
        Self { state: s }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Fill `buf` with pseudo-random bytes.
    #[inline]
    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}

/// Seed from env (`TEST_SEED`), or fallback to DEFAULT_TEST_SEED.
/// Accepts decimal or `0x` hex values.
#[allow(dead_code)]
pub fn seed_from_env() -> u64 {
    match env::var("TEST_SEED") {
        Ok(s) => {
            let s = s.trim();
            match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16).unwrap_or(DEFAULT_TEST_SEED),
                None => s.parse::<u64>().unwrap_or(DEFAULT_TEST_SEED),
            }
        }
        Err(_) => DEFAULT_TEST_SEED,
    }
}

#[allow(dead_code)]
pub fn rng_from_env() -> XorShift64 {
    XorShift64::new(seed_from_env())
}

/// Deterministic bytes of length `len`.
#[allow(dead_code)]
pub fn random_bytes(len: usize, rng: &mut XorShift64) -> Vec<u8> {
    let mut v = vec![0u8; len];
    rng.fill_bytes(&mut v);
    v
}

/// Choose `k` unique indices in `[0, n)` (Floyd's algorithm), sorted.
#[allow(dead_code)]
pub fn choose_k_of_n(n: usize, k: usize, rng: &mut XorShift64) -> Vec<usize> {
    assert!(k <= n, "k must be <= n");
    let mut chosen = std::collections::BTreeSet::new();
    for i in (n - k)..n {
        let t = (rng.next_u64() as usize) % (i + 1);
        if !chosen.insert(t) {
            chosen.insert(i);
        }
    }
    chosen.into_iter().collect()
}

/// 8-byte big-endian namespace.
#[allow(dead_code)]
pub fn ns(i: u64) -> NamespaceId {
    NamespaceId::from_u64(i, 8)
}

/// `count` blocks with namespaces `0..count` and random payloads.
#[allow(dead_code)]
pub fn sequential_data(count: usize, payload_len: usize, rng: &mut XorShift64) -> Vec<NamespacedData> {
    (0..count)
        .map(|i| NamespacedData::new(ns(i as u64), random_bytes(payload_len, rng)))
        .collect()
}

/// Default-options tree with `count` sequential blocks pushed, not built.
#[allow(dead_code)]
pub fn pushed_tree(count: usize, payload_len: usize, rng: &mut XorShift64) -> Ncmt {
    let mut tree = Ncmt::new();
    for d in sequential_data(count, payload_len, rng) {
        tree.push(d).expect("sequential push");
    }
    tree
}

/// Same as [`pushed_tree`], then built.
#[allow(dead_code)]
pub fn built_tree(count: usize, payload_len: usize, rng: &mut XorShift64) -> Ncmt {
    let mut tree = pushed_tree(count, payload_len, rng);
    tree.build().expect("build");
    tree
}

/// Route `tracing` output to the test harness (captured unless `--nocapture`).
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=ncmt=trace`.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Small hex encoder for assert messages.
#[allow(dead_code)]
pub fn to_hex(data: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut s = String::with_capacity(data.len() * 2);
    for &b in data {
        s.push(LUT[(b >> 4) as usize] as char);
        s.push(LUT[(b & 0x0f) as usize] as char);
    }
    s
}

#[cfg(test)]
mod selfcheck {
    use super::*;

    #[test]
    fn xorshift_is_deterministic() {
        let mut a = XorShift64::new(1);
        let mut b = XorShift64::new(1);
        assert_eq!(random_bytes(33, &mut a), random_bytes(33, &mut b));
        assert_ne!(a.next_u64(), 0);
    }

    #[test]
    fn choose_k_unique() {
        let mut rng = XorShift64::new(123);
        let v = choose_k_of_n(10, 5, &mut rng);
        assert_eq!(v.len(), 5);
        assert!(v.windows(2).all(|w| w[0] < w[1]));
        assert!(v.iter().all(|&x| x < 10));
    }

    #[test]
    fn sequential_data_is_sorted() {
        let mut rng = XorShift64::new(7);
        let data = sequential_data(10, 4, &mut rng);
        assert!(data.windows(2).all(|w| w[0].namespace_id() < w[1].namespace_id()));
    }
}
