//! SHA-256 backend (`sha2`). This is the default node hash.

use sha2::{Digest as _, Sha256};

use super::{Digest32, HashFn};

#[derive(Debug, Clone)]
pub struct Sha256Hash(Sha256);

impl HashFn for Sha256Hash {
    #[inline]
    fn new() -> Self {
        Self(Sha256::new())
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[inline]
    fn finalize(self) -> Digest32 {
        let out = self.0.finalize();
        let mut o = [0u8; 32];
        o.copy_from_slice(&out);
        o
    }
}
