//! Reed–Solomon codec over GF(2^8).
//!
//! Thin façade around `reed-solomon-erasure` (`galois_8`) that follows the
//! doubling convention used by the tree: N data symbols produce N parity
//! symbols, so a code instance is RS(2N, N). GF(2^8) caps the total shard
//! count at 256, hence at most 128 data symbols per call.
//!
//! A backend instance is built per call. Building it is cheap next to the
//! encoding work and keeps [`Rsgf8`] stateless, so one value can be shared
//! freely across threads.

use reed_solomon_erasure::galois_8::ReedSolomon;

use super::{ensure_equal_len, Codec, CodecError};

/// Largest number of data symbols a single GF(2^8) RS(2N, N) call supports.
pub const RSGF8_MAX_SYMBOLS: usize = 128;

/// RS(2N, N) codec over GF(2^8).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rsgf8;

impl Rsgf8 {
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    fn backend(&self, data_shards: usize) -> Result<ReedSolomon, CodecError> {
        if data_shards == 0 {
            return Err(CodecError::InvalidArg("at least one data symbol is required"));
        }
        if data_shards > RSGF8_MAX_SYMBOLS {
            return Err(CodecError::TooManySymbols {
                got: data_shards,
                max: RSGF8_MAX_SYMBOLS,
            });
        }
        ReedSolomon::new(data_shards, data_shards).map_err(|e| CodecError::Backend(format!("{e:?}")))
    }
}

impl Codec for Rsgf8 {
    fn encode(&self, data: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, CodecError> {
        let k = data.len();
        let rs = self.backend(k)?;
        let shard_len = ensure_equal_len(data)?;

        // Data shards first, then zeroed parity shards for the backend to fill.
        let mut shards: Vec<Vec<u8>> = Vec::with_capacity(2 * k);
        shards.extend_from_slice(data);
        shards.resize(2 * k, vec![0u8; shard_len]);

        rs.encode(&mut shards)
            .map_err(|e| CodecError::Backend(format!("{e:?}")))?;

        Ok(shards.split_off(k))
    }

    fn decode(&self, shards: &[Option<Vec<u8>>]) -> Result<Vec<Vec<u8>>, CodecError> {
        if shards.len() % 2 != 0 {
            return Err(CodecError::InvalidArg("decode expects data || parity (even slot count)"));
        }
        let k = shards.len() / 2;
        let rs = self.backend(k)?;

        let present = shards.iter().flatten().count();
        if present < k {
            return Err(CodecError::NotEnoughShards { need: k, have: present });
        }
        ensure_equal_len(shards.iter().flatten())?;

        let mut owned = shards.to_vec();
        rs.reconstruct_data(&mut owned)
            .map_err(|e| CodecError::Backend(format!("{e:?}")))?;

        owned
            .into_iter()
            .take(k)
            .map(|s| s.ok_or(CodecError::Backend("data symbol left unrecovered".into())))
            .collect()
    }

    #[inline]
    fn max_symbols(&self) -> usize {
        RSGF8_MAX_SYMBOLS
    }
}

/* --------------------------------- Tests -------------------------------- */
