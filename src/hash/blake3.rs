//! BLAKE3-256 backend with an optional parallel update path.
//!
//! Parallel update is used **only** when the `rayon` feature is compiled in
//! (it is propagated to `blake3`) and a single chunk exceeds
//! `PAR_THRESHOLD`. Leaf payloads rarely get that large, but nothing stops a
//! caller from pushing big blobs. `update` and `update_rayon` produce the
//! same digest, so mixing them is deterministic.

use super::{Digest32, HashFn};

/// Minimum chunk size (in bytes) to consider the parallel update path.
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
const PAR_THRESHOLD: usize = 256 * 1024; // 256 KiB

#[derive(Debug, Clone)]
pub struct Blake3Hash(::blake3::Hasher);

impl HashFn for Blake3Hash {
    #[inline]
    fn new() -> Self {
        Self(::blake3::Hasher::new())
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        #[cfg(feature = "rayon")]
        {
            if data.len() >= PAR_THRESHOLD {
                self.0.update_rayon(data);
                return;
            }
        }
        self.0.update(data);
    }

    #[inline]
    fn finalize(self) -> Digest32 {
        *self.0.finalize().as_bytes()
    }
}
