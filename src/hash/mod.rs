//! Streaming hash capability used to commit tree nodes.
//!
//! This module provides:
//! - `HashFn`: a small trait for 256-bit hash functions with streaming update.
//! - `Sha256Hash` (default), `Blake3Hash` and `Sha3Hash` implementations.
//! - `finalize_with_prefix`, which lays out a stored node hash as
//!   `prefix || digest`. The tree uses it to embed `min || max` namespace
//!   bounds in front of every digest.
//!
//! ### Digest size
//! We standardize on 32-byte digests (`[u8; 32]`); all three backends fit.
//! Stored node hashes are longer than that because of the namespace prefix,
//! so they travel as `Vec<u8>`.

use core::fmt;

mod blake3;
mod keccak;
mod sha256;

pub use self::blake3::Blake3Hash;
pub use self::keccak::Sha3Hash;
pub use self::sha256::Sha256Hash;

/// A 256-bit digest produced by every [`HashFn`].
pub type Digest32 = [u8; 32];

/// Minimal interface for a streaming 256-bit hash.
///
/// A fresh instance is created for every leaf and every node, the same way a
/// hash constructor is called once per commitment. Implementations must be
/// stateless between instances.
pub trait HashFn: Sized + fmt::Debug {
    /// Create a new, empty hasher.
    fn new() -> Self;

    /// Feed additional bytes.
    fn update(&mut self, data: &[u8]);

    /// Finalize and return the 32-byte digest. Consumes `self`.
    fn finalize(self) -> Digest32;

    /// Finalize and return `prefix || digest`.
    #[inline]
    fn finalize_with_prefix(self, prefix: &[u8]) -> Vec<u8> {
        let digest = self.finalize();
        let mut out = Vec::with_capacity(prefix.len() + digest.len());
        out.extend_from_slice(prefix);
        out.extend_from_slice(&digest);
        out
    }

    /// Digest of the empty input.
    #[inline]
    fn empty() -> Digest32 {
        Self::new().finalize()
    }

    /// Hash several chunks as if concatenated.
    #[inline]
    fn hash_many<'a, I>(parts: I) -> Digest32
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut h = Self::new();
        for p in parts {
            h.update(p);
        }
        h.finalize()
    }
}

/* ----------------------------------- Tests ----------------------------------- */
