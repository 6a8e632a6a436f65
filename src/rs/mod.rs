//! Erasure-coding capability consumed by the tree builder.
//!
//! The tree treats a codec as an opaque transform applied uniformly to raw
//! leaf payloads and to node hashes:
//!
//! - `encode`: N equal-length data symbols in, N parity symbols out.
//! - `decode`: a 2N-slot set (data followed by parity, `None` = missing) in,
//!   the N original data symbols out. Any N present slots suffice.
//! - `max_symbols`: the largest N a single `encode` call accepts.
//!
//! ## Concurrency
//! Every method takes `&self` and implementations are expected to be pure
//! functions of their input. A backend that does carry internal state must
//! guard it itself; the builder calls the codec once per layer, sequentially.
//!
//! The default implementation is [`Rsgf8`], a Reed–Solomon code over GF(2^8)
//! backed by `reed-solomon-erasure`.

use core::fmt;

mod codec;

pub use codec::Rsgf8;

/// Codec error type (backend-agnostic).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid argument: {0}")]
    InvalidArg(&'static str),
    #[error("too many symbols: got {got}, codec supports at most {max}")]
    TooManySymbols { got: usize, max: usize },
    #[error("all symbols must have identical, non-zero length")]
    ShardLenMismatch,
    #[error("not enough symbols present to decode (need at least {need}, have {have})")]
    NotEnoughShards { need: usize, have: usize },
    #[error("backend error: {0}")]
    Backend(String),
}

/// Erasure-coding engine used to extend each tree layer.
pub trait Codec: fmt::Debug + Send + Sync {
    /// Produce one parity symbol per input symbol.
    fn encode(&self, data: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, CodecError>;

    /// Recover the original data symbols from `data || parity` slots.
    fn decode(&self, shards: &[Option<Vec<u8>>]) -> Result<Vec<Vec<u8>>, CodecError>;

    /// Maximum number of data symbols accepted by a single `encode`.
    fn max_symbols(&self) -> usize;
}

impl<C: Codec + ?Sized> Codec for &C {
    #[inline]
    fn encode(&self, data: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, CodecError> {
        (**self).encode(data)
    }

    #[inline]
    fn decode(&self, shards: &[Option<Vec<u8>>]) -> Result<Vec<Vec<u8>>, CodecError> {
        (**self).decode(shards)
    }

    #[inline]
    fn max_symbols(&self) -> usize {
        (**self).max_symbols()
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    #[inline]
    fn encode(&self, data: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, CodecError> {
        (**self).encode(data)
    }

    #[inline]
    fn decode(&self, shards: &[Option<Vec<u8>>]) -> Result<Vec<Vec<u8>>, CodecError> {
        (**self).decode(shards)
    }

    #[inline]
    fn max_symbols(&self) -> usize {
        (**self).max_symbols()
    }
}

/// Check that every symbol has the same non-zero length; returns that length.
#[inline]
pub(crate) fn ensure_equal_len<'a, T: AsRef<[u8]> + 'a>(
    shards: impl IntoIterator<Item = &'a T>,
) -> Result<usize, CodecError> {
    let mut it = shards.into_iter();
    let Some(first) = it.next() else { return Ok(0) };
    let len0 = first.as_ref().len();
    if len0 == 0 {
        return Err(CodecError::ShardLenMismatch);
    }
    for s in it {
        if s.as_ref().len() != len0 {
            return Err(CodecError::ShardLenMismatch);
        }
    }
    Ok(len0)
}

/* --------------------------------- Tests -------------------------------- */
