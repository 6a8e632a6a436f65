//! Core value types: [`NamespaceId`], [`NamespacedData`] and [`LeafRange`].
//!
//! - **NamespaceId**: byte identifier whose width is fixed per tree instance
//!   (configured through `Options::namespace_size`). Ordering is plain
//!   byte-lexicographic comparison.
//! - **NamespacedData**: a `(namespace, payload)` pair; the unit callers push.
//! - **LeafRange**: a half-open `[start, end)` span of leaf indices.

use core::fmt;
use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Namespace identifier (lexicographic order).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespaceId(Vec<u8>);

impl NamespaceId {
    /// Wrap raw id bytes.
    #[inline]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Width of this id in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Big-endian encoding of `x`, truncated or zero-extended on the left to
    /// `size` bytes. Handy for fixtures: `from_u64(7, 8)` is `00..07`.
    pub fn from_u64(x: u64, size: usize) -> Self {
        let be = x.to_be_bytes();
        let mut out = vec![0u8; size];
        if size >= be.len() {
            out[size - be.len()..].copy_from_slice(&be);
        } else {
            out.copy_from_slice(&be[be.len() - size..]);
        }
        Self(out)
    }

    /// The all-`0xFF` sentinel namespace of the given width.
    ///
    /// Parity leaves do **not** use this: they inherit the namespace of the
    /// leaf they were encoded from, so range lookups keep working over the
    /// extended data. The sentinel sorts after every other id of the same
    /// width, which makes it useful as an upper bound in range queries.
    #[inline]
    pub fn parity(size: usize) -> Self {
        Self(vec![0xFF; size])
    }
}

impl AsRef<[u8]> for NamespaceId {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for NamespaceId {
    #[inline]
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for NamespaceId {
    #[inline]
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// A data block tagged with its namespace.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespacedData {
    id: NamespaceId,
    payload: Vec<u8>,
}

impl NamespacedData {
    /// Pair a namespace with a payload.
    #[inline]
    pub fn new(id: impl Into<NamespaceId>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }

    /// Split a namespace-prefixed buffer: the first `size` bytes are the id,
    /// the rest is the payload. Returns `None` if `bytes` is shorter than
    /// `size`.
    pub fn from_prefixed(size: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() < size {
            return None;
        }
        let (id, payload) = bytes.split_at(size);
        Some(Self::new(id, payload))
    }

    #[inline]
    pub fn namespace_id(&self) -> &NamespaceId {
        &self.id
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The prefixed form `id || payload`.
    pub fn to_prefixed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.id.size() + self.payload.len());
        out.extend_from_slice(self.id.as_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    #[inline]
    pub fn into_parts(self) -> (NamespaceId, Vec<u8>) {
        (self.id, self.payload)
    }
}

/// The contiguous set of leaves `[start, end)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LeafRange {
    pub start: usize,
    pub end: usize,
}

impl LeafRange {
    #[inline]
    pub const fn singleton(index: usize) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/* --------------------------------- Tests ----------------------------------- */
