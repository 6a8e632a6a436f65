//! SHA3-256 backend (RustCrypto `sha3`).

use sha3::{Digest as _, Sha3_256};

use super::{Digest32, HashFn};

#[derive(Debug, Clone)]
pub struct Sha3Hash(Sha3_256);

impl HashFn for Sha3Hash {
    #[inline]
    fn new() -> Self {
        Self(Sha3_256::new())
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    #[inline]
    fn finalize(self) -> Digest32 {
        let out = self.0.finalize();
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&out);
        arr
    }
}
