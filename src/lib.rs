//! ncmt: namespaced coded Merkle trees.
//!
//! Data blocks tagged with a namespace are pushed in namespace order, then
//! every level of the tree is erasure-extended with Reed–Solomon parity and
//! hashed in batches until a single root remains. The root carries the
//! namespace range it covers.
//!
//! Features:
//! - `rayon` : hash the batches of each layer on a thread pool
//! - `serde` : Serialize/Deserialize for namespace ids, data blocks, ranges
//!
//! ```ignore
//! use ncmt::{Ncmt, NamespacedData, NamespaceId};
//!
//! let mut tree = Ncmt::new();
//! for i in 0..8u64 {
//!     tree.push(NamespacedData::new(NamespaceId::from_u64(i, 8), vec![i as u8; 64]))?;
//! }
//! let root = tree.build()?;
//! ```
//!
//! Logging goes through `tracing`; install any subscriber to see build
//! spans (`ncmt_build`) and per-layer events.

#![deny(rust_2018_idioms, unused_must_use)]

pub mod error;
pub mod hash;
pub mod ncmt;
pub mod rs;
pub mod utils;

pub use crate::error::{LayerRef, NcmtError, NcmtResult};
pub use crate::hash::{Blake3Hash, Digest32, HashFn, Sha256Hash, Sha3Hash};
pub use crate::ncmt::{
    Layer, Leaf, LeafRange, NamespaceId, NamespacedData, Ncmt, Node, Options, TreeState,
};
pub use crate::rs::{Codec, CodecError, Rsgf8};
pub use crate::utils::PoolConfig;
