//! Error types for the coded Merkle tree.
//!
//! Every error is local to the `push` or `build` call that returned it;
//! nothing here is fatal to the process. Codec failures are not transient,
//! so retrying a build without changing its input reproduces the failure.

use core::fmt;

use crate::ncmt::types::NamespaceId;
use crate::rs::CodecError;

/// Which step of a build was erasure-extending when the codec failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRef {
    /// Extending the leaf payloads (producing layer 0).
    Leaves,
    /// Extending node layer `k` (producing layer `k + 1`).
    Nodes(usize),
}

impl fmt::Display for LayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerRef::Leaves => f.write_str("leaves"),
            LayerRef::Nodes(k) => write!(f, "layer {k}"),
        }
    }
}

/// Canonical error for tree construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NcmtError {
    /// Pushed data carries a namespace id of the wrong width.
    #[error("invalid push: expected namespace id of size {expected}, received size {got}")]
    InvalidNamespaceSize { expected: usize, got: usize },

    /// Pushed namespace id sorts before the previously pushed one.
    #[error("invalid push: namespace {got} is less than the last pushed namespace {last}")]
    OutOfOrderPush { last: NamespaceId, got: NamespaceId },

    /// Leaf count is not a multiple of the batch size.
    #[error("number of leaves ({leaves}) must be divisible by the batch size ({batch_size})")]
    UnbatchableLeafCount { leaves: usize, batch_size: usize },

    /// Build was called before any leaf was pushed.
    #[error("cannot build a tree without leaves")]
    NoLeaves,

    /// The erasure codec failed while extending a layer.
    #[error("failed to extend {layer}: {source}")]
    Codec {
        layer: LayerRef,
        #[source]
        source: CodecError,
    },

    /// Tree options are unusable.
    #[error("invalid options: {0}")]
    InvalidOptions(&'static str),

    /// The worker pool for batch hashing could not be built.
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

/// Convenience alias for results that use [`NcmtError`].
pub type NcmtResult<T> = Result<T, NcmtError>;
